//! Time-Related Constants
//!
//! Cadences used by the scheduler. All values are milliseconds measured on
//! a wrapping 32-bit monotonic counter.

/// Minimum delay between two polls of the same sensor (milliseconds).
///
/// Throttles how often the underlying hardware is sampled. Many cheap
/// sensors (DHT22, DS18B20) need more than a second between conversions.
pub const MIN_POLL_DELAY_MS: u32 = 1500;

/// Maximum time between two reports of the same sensor (milliseconds).
///
/// Bounds how stale the consumer's view can get while a value is static.
pub const REPORT_INTERVAL_MS: u32 = 15000;

/// Divisor applied to the poll delay to obtain the jitter window.
///
/// A divisor of 2 lets report times drift up to half a poll delay earlier,
/// enough to break up sensors that were registered together.
pub const JITTER_DIVISOR: u32 = 2;

// Reporting faster than polling would make the timeout gate meaningless
const _: () = assert!(REPORT_INTERVAL_MS >= MIN_POLL_DELAY_MS);
