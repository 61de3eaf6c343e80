//! Callback contracts between the monitor and the firmware
//!
//! The monitor never touches hardware. It asks a [`ReadingSource`] for
//! values and hands anything worth surfacing to an [`UpdateSink`]. Both are
//! implemented for plain closures, so most firmware never names the traits.
//! Keep them simple - they are called from the hot loop.

use crate::slot::SensorId;

/// Source of sensor readings
///
/// Called synchronously from `Monitor::tick` for every sensor that is due.
/// Must return promptly; a blocking read stalls every other sensor.
pub trait ReadingSource {
    /// Read sensor `id`, returning `None` when no value is available right now
    fn read(&mut self, id: SensorId) -> Option<f32>;
}

impl<F> ReadingSource for F
where
    F: FnMut(SensorId) -> Option<f32>,
{
    fn read(&mut self, id: SensorId) -> Option<f32> {
        self(id)
    }
}

/// Consumer of reportable values (radio, display, logger)
///
/// Called at most once per sensor per tick. Must not re-enter the monitor.
pub trait UpdateSink {
    /// Deliver a value for sensor `id`
    fn on_update(&mut self, id: SensorId, value: f32);
}

impl<F> UpdateSink for F
where
    F: FnMut(SensorId, f32),
{
    fn on_update(&mut self, id: SensorId, value: f32) {
        self(id, value)
    }
}

/// One-shot entropy used to seed the jitter generator in `begin`
///
/// On Arduino-class boards this is typically a floating ADC pin; on chips
/// with a TRNG use that instead.
pub trait EntropySource {
    /// Produce a seed
    fn entropy(&mut self) -> u64;
}

impl<F> EntropySource for F
where
    F: FnMut() -> u64,
{
    fn entropy(&mut self) -> u64 {
        self()
    }
}

/// Deterministic seed for tests and reproducible simulations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSeed(pub u64);

impl EntropySource for FixedSeed {
    fn entropy(&mut self) -> u64 {
        self.0
    }
}

/// Readings the scheduler accepts as real values
///
/// NaN and infinities are treated like "no reading": they can't be
/// compared against a delta and must never reach the consumer.
pub trait Reportable {
    /// Check if the value may be reported
    fn is_reportable(&self) -> bool;
}

impl Reportable for f32 {
    fn is_reportable(&self) -> bool {
        self.is_finite()
    }
}
