//! Scheduler counters
//!
//! Track monitor health without affecting scheduling. All counters wrap,
//! so a device that runs for months never panics on overflow.

/// Lifetime counters for a monitor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonitorStats {
    /// Calls to `tick`
    pub ticks: u32,
    /// Reading source invocations
    pub polls: u32,
    /// Update sink invocations
    pub reports: u32,
    /// Polls that returned no usable value
    pub missed_readings: u32,
    /// Force requests applied to registered sensors
    pub forced: u32,
}

impl MonitorStats {
    /// All counters at zero
    pub const fn new() -> Self {
        Self {
            ticks: 0,
            polls: 0,
            reports: 0,
            missed_readings: 0,
            forced: 0,
        }
    }

    /// Fraction of polls that produced no value (0.0 before the first poll)
    pub fn miss_ratio(&self) -> f32 {
        if self.polls == 0 {
            return 0.0;
        }
        self.missed_readings as f32 / self.polls as f32
    }

    /// Fraction of polls that led to a report
    pub fn report_ratio(&self) -> f32 {
        if self.polls == 0 {
            return 0.0;
        }
        self.reports as f32 / self.polls as f32
    }
}

/// What a single `tick` did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Sensors whose reading source was invoked
    pub polled: usize,
    /// Sensors reported to the update sink
    pub reported: usize,
    /// Polls that returned no usable value
    pub missed: usize,
}

impl TickOutcome {
    /// Nothing was due this tick
    pub fn is_idle(&self) -> bool {
        self.polled == 0
    }
}
