//! Constants for SensorMon Core
//!
//! Default scheduling parameters. Every value here can be overridden at
//! runtime through [`MonitorConfig`](crate::config::MonitorConfig), except
//! the table capacity which is a const generic on the monitor.
//!
//! ## Organization
//!
//! - **Time**: poll throttling, report ceiling and jitter
//! - **Sensors**: change threshold and table capacity

/// Poll and report cadences in milliseconds.
pub mod time;

/// Sensor table sizing and change detection.
pub mod sensors;

pub use sensors::{MAX_SENSORS, VALUE_DELTA};
pub use time::{JITTER_DIVISOR, MIN_POLL_DELAY_MS, REPORT_INTERVAL_MS};
