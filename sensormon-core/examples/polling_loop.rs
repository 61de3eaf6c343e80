//! Simulated Firmware Main Loop Example
//!
//! This example runs three simulated sensors through a monitor for two
//! minutes of simulated time and prints every report the "radio" would send.
//!
//! ## What You'll Learn
//!
//! - Wiring a reading source and an update sink as closures
//! - How the delta gate and the report interval interact
//! - Forcing a reading from "interrupt" context with `ForceRequests`
//!
//! ## Sensors
//!
//! 1. **Temperature (id 1)**: slow drift, reported on the interval or when
//!    the drift accumulates past the delta
//! 2. **Door contact (id 2)**: 0.0/1.0, every flip is reported immediately
//! 3. **Soil moisture (id 3)**: fails to answer every fourth poll
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example polling_loop
//! ```

use std::cell::Cell;

use sensormon_core::{Clock, FixedSeed, ForceRequests, MockClock, MonitorBuilder, SensorId};

static BUTTON: ForceRequests = ForceRequests::new();

fn main() -> Result<(), sensormon_core::MonitorError> {
    println!("SensorMon Polling Loop Example");
    println!("==============================\n");

    let clock = MockClock::new(0);
    let soil_polls = Cell::new(0u32);

    let reader = |id: SensorId| -> Option<f32> {
        let t = clock.now_ms() as f32 / 1000.0;
        match id {
            1 => Some(21.0 + t * 0.02),
            2 => Some(if (40.0..70.0).contains(&t) { 1.0 } else { 0.0 }),
            3 => {
                soil_polls.set(soil_polls.get() + 1);
                if soil_polls.get() % 4 == 0 {
                    None
                } else {
                    Some(37.5)
                }
            }
            _ => None,
        }
    };

    let sink = |id: SensorId, value: f32| {
        let name = match id {
            1 => "temperature",
            2 => "door",
            3 => "soil",
            _ => "unknown",
        };
        println!("[{:>6} ms] {:<12} -> {:.2}", clock.now_ms(), name, value);
    };

    let mut monitor = MonitorBuilder::new(reader, sink, &clock)
        .force_requests(&BUTTON)
        .register(1)?
        .register(2)?
        .register(3)?
        .begin(&mut FixedSeed(0x5eed))?;

    // 50ms main loop for two simulated minutes
    while clock.now_ms() < 120_000 {
        clock.advance(50);

        // Someone presses the "refresh" button at t=90s
        if clock.now_ms() == 90_000 {
            println!("[ 90000 ms] button pressed, forcing soil sensor");
            BUTTON.request(3);
        }

        monitor.tick();
    }

    let stats = monitor.stats();
    println!("\n=== Statistics ===");
    println!("Ticks:          {}", stats.ticks);
    println!("Polls:          {}", stats.polls);
    println!("Reports:        {}", stats.reports);
    println!("Missed:         {} ({:.0}%)", stats.missed_readings, stats.miss_ratio() * 100.0);
    println!("Forced:         {}", stats.forced);

    Ok(())
}
