//! Runtime scheduling parameters
//!
//! Defaults come from [`crate::constants`]. Presets cover the two common
//! deployments: battery nodes that should sleep as much as possible and
//! mains-powered displays that want snappy updates.

use crate::constants::{JITTER_DIVISOR, MIN_POLL_DELAY_MS, REPORT_INTERVAL_MS, VALUE_DELTA};
use crate::errors::{MonitorError, MonitorResult};
use crate::time::Millis;

/// Scheduling parameters shared by every sensor in a monitor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonitorConfig {
    /// Minimum delay between two polls of one sensor
    pub min_poll_delay_ms: Millis,

    /// Maximum delay between two reports of one sensor
    pub report_interval_ms: Millis,

    /// Change in value that forces an immediate report
    pub value_delta: f32,

    /// Jitter window is `min_poll_delay_ms / jitter_divisor`
    pub jitter_divisor: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            min_poll_delay_ms: MIN_POLL_DELAY_MS,
            report_interval_ms: REPORT_INTERVAL_MS,
            value_delta: VALUE_DELTA,
            jitter_divisor: JITTER_DIVISOR,
        }
    }
}

impl MonitorConfig {
    /// Battery node: sample every 10s, heartbeat every 5 minutes
    pub fn low_power() -> Self {
        Self {
            min_poll_delay_ms: 10_000,
            report_interval_ms: 300_000,
            value_delta: 1.0,
            jitter_divisor: JITTER_DIVISOR,
        }
    }

    /// Local display: sample every 500ms, small changes show up immediately
    pub fn responsive() -> Self {
        Self {
            min_poll_delay_ms: 500,
            report_interval_ms: 5_000,
            value_delta: 0.1,
            jitter_divisor: JITTER_DIVISOR,
        }
    }

    /// Set the minimum poll delay
    pub fn min_poll_delay_ms(mut self, ms: Millis) -> Self {
        self.min_poll_delay_ms = ms;
        self
    }

    /// Set the report ceiling
    pub fn report_interval_ms(mut self, ms: Millis) -> Self {
        self.report_interval_ms = ms;
        self
    }

    /// Set the change threshold
    pub fn value_delta(mut self, delta: f32) -> Self {
        self.value_delta = delta;
        self
    }

    /// Set the jitter divisor
    pub fn jitter_divisor(mut self, divisor: u32) -> Self {
        self.jitter_divisor = divisor;
        self
    }

    /// Upper bound (exclusive) of the random offsets applied to timestamps
    ///
    /// Zero means jitter is disabled.
    pub fn jitter_window_ms(&self) -> Millis {
        self.min_poll_delay_ms / self.jitter_divisor.max(1)
    }

    /// Check the parameters are usable
    pub fn validate(&self) -> MonitorResult<()> {
        if self.min_poll_delay_ms == 0 {
            return Err(MonitorError::InvalidConfig {
                reason: "min_poll_delay_ms must be non-zero",
            });
        }

        if self.report_interval_ms < self.min_poll_delay_ms {
            return Err(MonitorError::InvalidConfig {
                reason: "report_interval_ms shorter than min_poll_delay_ms",
            });
        }

        if !self.value_delta.is_finite() || self.value_delta < 0.0 {
            return Err(MonitorError::InvalidConfig {
                reason: "value_delta must be finite and non-negative",
            });
        }

        if self.jitter_divisor == 0 {
            return Err(MonitorError::InvalidConfig {
                reason: "jitter_divisor must be at least 1",
            });
        }

        Ok(())
    }
}
