//! Sensor Table Constants

/// Change in reading that triggers an immediate report.
///
/// Expressed in the sensor's own units; the monitor never interprets them.
pub const VALUE_DELTA: f32 = 0.5;

/// Default capacity of the sensor table.
///
/// Keep this as small as the application needs: each slot costs
/// roughly 20 bytes of RAM.
pub const MAX_SENSORS: usize = 5;
