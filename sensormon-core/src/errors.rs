//! Error Types for Monitor Construction
//!
//! ## Design Philosophy
//!
//! The scheduler itself never fails at runtime: a sensor that cannot produce
//! a value returns `None` and an unknown id passed to `force_update` is
//! ignored. Errors only exist for the setup phase, where the caller can still
//! react (resize the table, fix the configuration).
//!
//! Like the rest of the crate, errors are small, `Copy`, and carry only
//! `&'static str` messages so they can be returned on devices without a heap.
//!
//! ## Error Categories
//!
//! - `CapacityExceeded`: more sensors registered than the table holds
//! - `DuplicateSensor`: the same id registered twice
//! - `InvalidConfig`: timing or delta parameters that make no sense
//!
//! ```rust
//! use sensormon_core::{MonitorBuilder, MonitorError, MockClock};
//!
//! let clock = MockClock::new(0);
//! let builder = MonitorBuilder::<_, _, _, 1>::with_capacity(
//!     |_id: u8| Some(21.0_f32),
//!     |_id: u8, _value: f32| {},
//!     &clock,
//! )
//! .register(1)
//! .unwrap();
//!
//! match builder.register(2) {
//!     Err(MonitorError::CapacityExceeded { capacity }) => assert_eq!(capacity, 1),
//!     _ => unreachable!(),
//! }
//! ```

use thiserror_no_std::Error;

use crate::slot::SensorId;

/// Result type for monitor setup operations
pub type MonitorResult<T> = Result<T, MonitorError>;

/// Setup errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MonitorError {
    /// Slot table is full
    #[error("Sensor table full: capacity {capacity}")]
    CapacityExceeded {
        /// Compile-time capacity of the table
        capacity: usize,
    },

    /// Sensor id registered more than once
    #[error("Sensor {id} already registered")]
    DuplicateSensor {
        /// The offending id
        id: SensorId,
    },

    /// Configuration rejected by `MonitorConfig::validate`
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Which constraint failed
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for MonitorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::CapacityExceeded { capacity } => {
                defmt::write!(fmt, "Sensor table full ({})", capacity)
            }
            Self::DuplicateSensor { id } => {
                defmt::write!(fmt, "Sensor {} already registered", id)
            }
            Self::InvalidConfig { reason } => {
                defmt::write!(fmt, "Invalid configuration: {}", reason)
            }
        }
    }
}
