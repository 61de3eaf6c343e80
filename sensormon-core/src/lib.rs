//! Polling scheduler for periodic sensor readings
//!
//! Decides, once per pass of the firmware's main loop, which of a small,
//! fixed set of sensors should be read again and which readings are worth
//! passing on to a consumer (radio, display, logger).
//!
//! Key constraints:
//! - Fixed-capacity sensor table, no heap allocation
//! - `tick` is non-blocking and O(N)
//! - Runs on 8/32-bit MCUs with a wrapping millisecond counter
//!
//! ```no_run
//! use sensormon_core::{MonitorBuilder, StdClock, FixedSeed};
//!
//! # fn read_sensor(_id: u8) -> Option<f32> { Some(21.0) }
//! # fn transmit(_id: u8, _value: f32) {}
//! let mut monitor = MonitorBuilder::new(read_sensor, transmit, StdClock::new())
//!     .register(1)?
//!     .register(2)?
//!     .begin(&mut FixedSeed(0x5eed))?;
//!
//! loop {
//!     monitor.tick();
//! }
//! # Ok::<(), sensormon_core::MonitorError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
pub mod logging;

pub mod config;
pub mod constants;
pub mod errors;
pub mod monitor;
pub mod requests;
pub mod slot;
pub mod stats;
pub mod time;
pub mod traits;

// Public API
pub use config::MonitorConfig;
pub use errors::{MonitorError, MonitorResult};
pub use logging::{ReportCause, TraceEvent, Tracer};
pub use monitor::{Monitor, MonitorBuilder};
pub use requests::ForceRequests;
pub use slot::{SensorId, SensorSlot};
pub use stats::{MonitorStats, TickOutcome};
pub use time::{Clock, Millis, MockClock};
#[cfg(feature = "std")]
pub use time::StdClock;
pub use traits::{EntropySource, FixedSeed, ReadingSource, UpdateSink};

/// Crate version from Cargo metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
