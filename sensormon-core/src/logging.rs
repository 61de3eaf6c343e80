//! Optional logging and trace hooks
//!
//! Two independent channels:
//!
//! - Internal macros forward to `log` (std builds) or `defmt` (embedded
//!   builds) and compile to nothing when neither feature is enabled.
//! - A [`Tracer`] function pointer injected through the builder receives a
//!   [`TraceEvent`] for every scheduling decision. This is the hook for
//!   serial debug output on boards where pulling in a logger is too costly.

use crate::slot::SensorId;
use crate::time::Millis;

#[cfg(feature = "log")]
macro_rules! sm_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(all(feature = "defmt", not(feature = "log")))]
macro_rules! sm_trace {
    ($($arg:tt)*) => { defmt::trace!($($arg)*) };
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! sm_trace {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! sm_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(all(feature = "defmt", not(feature = "log")))]
macro_rules! sm_debug {
    ($($arg:tt)*) => { defmt::debug!($($arg)*) };
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! sm_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! sm_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(all(feature = "defmt", not(feature = "log")))]
macro_rules! sm_warn {
    ($($arg:tt)*) => { defmt::warn!($($arg)*) };
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! sm_warn {
    ($($arg:tt)*) => {};
}

/// Why a report was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReportCause {
    /// First value ever read for the sensor
    FirstValue,
    /// Value moved by at least the configured delta
    Delta,
    /// Report interval expired
    Timeout,
    /// A `force_update` was pending
    Forced,
}

impl ReportCause {
    /// Short lowercase name for log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstValue => "first",
            Self::Delta => "delta",
            Self::Timeout => "timeout",
            Self::Forced => "forced",
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ReportCause {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.as_str())
    }
}

/// Scheduling decision observed by a [`Tracer`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceEvent {
    /// Reading source invoked
    Polled {
        /// Sensor polled
        id: SensorId,
        /// Poll time
        at: Millis,
    },
    /// Reading source returned nothing usable
    NoReading {
        /// Sensor polled
        id: SensorId,
    },
    /// Update sink invoked
    Reported {
        /// Sensor reported
        id: SensorId,
        /// Value delivered
        value: f32,
        /// Gate that fired
        cause: ReportCause,
    },
    /// Force request applied to a slot
    Forced {
        /// Sensor forced
        id: SensorId,
    },
}

/// Trace hook; plain function pointer so it can live in a `static` config
pub type Tracer = fn(&TraceEvent);

/// Invoke the tracer if one is installed
#[inline]
pub(crate) fn emit(tracer: Option<Tracer>, event: TraceEvent) {
    if let Some(trace) = tracer {
        trace(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};

    static SEEN: AtomicU32 = AtomicU32::new(0);

    fn count(event: &TraceEvent) {
        if let TraceEvent::Reported { cause: ReportCause::Delta, .. } = event {
            SEEN.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn emit_calls_installed_tracer() {
        let event = TraceEvent::Reported { id: 1, value: 2.0, cause: ReportCause::Delta };
        emit(None, event);
        assert_eq!(SEEN.load(Ordering::Relaxed), 0);

        emit(Some(count), event);
        emit(Some(count), TraceEvent::Forced { id: 1 });
        assert_eq!(SEEN.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn cause_names() {
        assert_eq!(ReportCause::FirstValue.as_str(), "first");
        assert_eq!(ReportCause::Timeout.as_str(), "timeout");
    }
}
