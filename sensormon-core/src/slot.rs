//! Per-sensor scheduling state
//!
//! One `SensorSlot` per registered sensor, stored in registration order.
//!
//! ```text
//! SensorSlot layout:
//! ├── id:           1 byte
//! ├── force_poll:   1 byte
//! ├── force_report: 1 byte
//! ├── last_poll:    4 bytes (Millis)
//! ├── last_report:  4 bytes (Millis)
//! └── last_value:   8 bytes (Option<f32>)
//! ```
//!
//! `last_value` is `None` exactly until the first reading is reported, which
//! keeps "never reported" distinct from "sensor returned nothing".

use crate::time::{has_elapsed, Millis};

/// Sensor identifier chosen by the firmware
pub type SensorId = u8;

/// Timing and value state for one sensor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorSlot {
    pub(crate) id: SensorId,
    pub(crate) last_poll: Millis,
    pub(crate) last_report: Millis,
    pub(crate) last_value: Option<f32>,
    /// Next poll ignores the poll delay; cleared by that poll
    pub(crate) force_poll: bool,
    /// Next real value is reported; cleared by that report
    pub(crate) force_report: bool,
}

impl SensorSlot {
    /// Fresh slot, never polled and never reported
    pub const fn new(id: SensorId) -> Self {
        Self {
            id,
            last_poll: 0,
            last_report: 0,
            last_value: None,
            force_poll: false,
            force_report: false,
        }
    }

    /// Sensor identifier
    pub fn id(&self) -> SensorId {
        self.id
    }

    /// When the reading source was last asked for this sensor
    pub fn last_poll(&self) -> Millis {
        self.last_poll
    }

    /// When the consumer last received a value (jitter included)
    pub fn last_report(&self) -> Millis {
        self.last_report
    }

    /// Last value handed to the consumer
    pub fn last_value(&self) -> Option<f32> {
        self.last_value
    }

    /// Pending `force_update` not yet satisfied by a report
    pub fn is_forced(&self) -> bool {
        self.force_poll || self.force_report
    }

    /// Poll gate
    pub(crate) fn poll_due(&self, now: Millis, min_poll_delay: Millis) -> bool {
        self.force_poll || has_elapsed(now, self.last_poll, min_poll_delay)
    }

    /// Timeout gate
    pub(crate) fn report_timed_out(&self, now: Millis, report_interval: Millis) -> bool {
        has_elapsed(now, self.last_report, report_interval)
    }

    /// Delta gate; `false` before the first report
    pub(crate) fn delta_reached(&self, value: f32, delta: f32) -> bool {
        match self.last_value {
            Some(last) => (value - last).abs() >= delta,
            None => false,
        }
    }

    /// Make the sensor due for both polling and reporting
    pub(crate) fn force(&mut self) {
        self.last_poll = 0;
        self.last_report = 0;
        self.force_poll = true;
        self.force_report = true;
    }
}
