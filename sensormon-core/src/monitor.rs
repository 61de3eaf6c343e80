//! Polling scheduler
//!
//! ## Design Goals
//!
//! 1. **Fixed Memory**: the slot table is a `heapless::Vec` sized at compile time
//! 2. **Non-blocking**: `tick` does O(N) work and returns; it never sleeps
//! 3. **Desynchronized**: random offsets keep sensors sharing one loop from
//!    polling and reporting in bursts
//!
//! ## Two Cadences
//!
//! ```text
//!          min_poll_delay                     report_interval
//!  poll ───┬────────┬────────┬────────┬ ... ┬────────┬
//!          │        │        │        │     │        │
//! report ──●        │        ●(delta) │     │        ●(timeout)
//! ```
//!
//! `min_poll_delay` throttles how often the sensor is sampled at all.
//! `report_interval` bounds how stale the consumer's view may get. A change
//! of at least `value_delta` skips the interval and is reported on the poll
//! that sees it.
//!
//! ## Lifecycle
//!
//! ```rust
//! use sensormon_core::{MonitorBuilder, MockClock, FixedSeed};
//!
//! let clock = MockClock::new(10_000);
//! let mut reports = 0;
//!
//! let mut monitor = MonitorBuilder::new(
//!     |_id: u8| Some(21.5_f32),
//!     |_id: u8, _value: f32| reports += 1,
//!     &clock,
//! )
//! .register(1)?
//! .register(2)?
//! .begin(&mut FixedSeed(42))?;
//!
//! let outcome = monitor.tick();
//! assert_eq!(outcome.polled, 2);
//! assert_eq!(outcome.reported, 2);
//! # drop(monitor);
//! # assert_eq!(reports, 2);
//! # Ok::<(), sensormon_core::MonitorError>(())
//! ```

use heapless::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::MonitorConfig;
use crate::constants::MAX_SENSORS;
use crate::errors::{MonitorError, MonitorResult};
use crate::logging::{emit, ReportCause, TraceEvent, Tracer};
use crate::requests::ForceRequests;
use crate::slot::{SensorId, SensorSlot};
use crate::stats::{MonitorStats, TickOutcome};
use crate::time::{Clock, Millis};
use crate::traits::{EntropySource, ReadingSource, Reportable, UpdateSink};

/// Setup phase of a monitor
///
/// Sensors can only be registered here. `begin` consumes the builder, so
/// registering after startup or ticking before it does not compile.
pub struct MonitorBuilder<R, U, C, const N: usize = MAX_SENSORS> {
    reader: R,
    sink: U,
    clock: C,
    slots: Vec<SensorSlot, N>,
    config: MonitorConfig,
    tracer: Option<Tracer>,
    requests: Option<&'static ForceRequests>,
}

impl<R, U, C> MonitorBuilder<R, U, C>
where
    R: ReadingSource,
    U: UpdateSink,
    C: Clock,
{
    /// Builder with the default capacity of [`MAX_SENSORS`]
    pub fn new(reader: R, sink: U, clock: C) -> Self {
        Self::with_capacity(reader, sink, clock)
    }
}

impl<R, U, C, const N: usize> MonitorBuilder<R, U, C, N>
where
    R: ReadingSource,
    U: UpdateSink,
    C: Clock,
{
    /// Builder with a table of `N` slots
    pub fn with_capacity(reader: R, sink: U, clock: C) -> Self {
        Self {
            reader,
            sink,
            clock,
            slots: Vec::new(),
            config: MonitorConfig::default(),
            tracer: None,
            requests: None,
        }
    }

    /// Replace the default scheduling parameters
    pub fn config(mut self, config: MonitorConfig) -> Self {
        self.config = config;
        self
    }

    /// Install a trace hook
    pub fn tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// Drain force requests from `requests` at the start of every tick
    pub fn force_requests(mut self, requests: &'static ForceRequests) -> Self {
        self.requests = Some(requests);
        self
    }

    /// Add a sensor to the table
    pub fn register(mut self, id: SensorId) -> MonitorResult<Self> {
        if self.slots.iter().any(|slot| slot.id == id) {
            return Err(MonitorError::DuplicateSensor { id });
        }

        self.slots
            .push(SensorSlot::new(id))
            .map_err(|_| MonitorError::CapacityExceeded { capacity: N })?;

        sm_debug!("registered sensor {} ({}/{})", id, self.slots.len(), N);
        Ok(self)
    }

    /// Number of sensors registered so far
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// No sensor registered yet
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Validate the configuration, seed the jitter generator and spread the
    /// first polls over one poll delay
    pub fn begin<E: EntropySource>(self, entropy: &mut E) -> MonitorResult<Monitor<R, U, C, N>> {
        self.config.validate()?;

        let mut rng = SmallRng::seed_from_u64(entropy.entropy());
        let mut slots = self.slots;
        for slot in slots.iter_mut() {
            slot.last_poll = rng.gen_range(0..self.config.min_poll_delay_ms);
        }

        sm_debug!(
            "monitor started: {} sensors, poll {}ms, report {}ms",
            slots.len(),
            self.config.min_poll_delay_ms,
            self.config.report_interval_ms
        );

        Ok(Monitor {
            reader: self.reader,
            sink: self.sink,
            clock: self.clock,
            slots,
            config: self.config,
            rng,
            tracer: self.tracer,
            requests: self.requests,
            stats: MonitorStats::new(),
        })
    }
}

/// Running scheduler
///
/// Call [`Monitor::tick`] from the main loop as often as convenient; sensors
/// that aren't due are skipped cheaply.
pub struct Monitor<R, U, C, const N: usize = MAX_SENSORS> {
    reader: R,
    sink: U,
    clock: C,
    slots: Vec<SensorSlot, N>,
    config: MonitorConfig,
    rng: SmallRng,
    tracer: Option<Tracer>,
    requests: Option<&'static ForceRequests>,
    stats: MonitorStats,
}

/// Random offset in `[0, window)`, zero when the window is empty
fn jitter(rng: &mut SmallRng, window: Millis) -> Millis {
    if window == 0 {
        0
    } else {
        rng.gen_range(0..window)
    }
}

impl<R, U, C, const N: usize> Monitor<R, U, C, N>
where
    R: ReadingSource,
    U: UpdateSink,
    C: Clock,
{
    /// Poll every due sensor and report the ones that changed or timed out
    pub fn tick(&mut self) -> TickOutcome {
        self.stats.ticks = self.stats.ticks.wrapping_add(1);
        self.apply_requests();

        let Self {
            reader,
            sink,
            clock,
            slots,
            config,
            rng,
            tracer,
            stats,
            ..
        } = self;
        let tracer = *tracer;
        let window = config.jitter_window_ms();
        let mut outcome = TickOutcome::default();

        for slot in slots.iter_mut() {
            let now = clock.now_ms();
            if !slot.poll_due(now, config.min_poll_delay_ms) {
                continue;
            }

            slot.last_poll = now;
            slot.force_poll = false;
            outcome.polled += 1;
            stats.polls = stats.polls.wrapping_add(1);
            emit(tracer, TraceEvent::Polled { id: slot.id, at: now });

            let value = match reader.read(slot.id) {
                Some(value) if value.is_reportable() => value,
                reading => {
                    if reading.is_some() {
                        sm_warn!("sensor {} returned a non-finite reading", slot.id);
                    } else {
                        sm_trace!("sensor {} has no reading", slot.id);
                    }
                    outcome.missed += 1;
                    stats.missed_readings = stats.missed_readings.wrapping_add(1);
                    emit(tracer, TraceEvent::NoReading { id: slot.id });
                    continue;
                }
            };

            let cause = if slot.force_report {
                ReportCause::Forced
            } else if slot.last_value.is_none() {
                ReportCause::FirstValue
            } else if slot.delta_reached(value, config.value_delta) {
                ReportCause::Delta
            } else if slot.report_timed_out(now, config.report_interval_ms) {
                ReportCause::Timeout
            } else {
                continue;
            };

            slot.last_value = Some(value);
            slot.force_report = false;
            sink.on_update(slot.id, value);
            // Next timeout lands slightly early so equal sensors drift apart
            slot.last_report = now.wrapping_sub(jitter(rng, window));

            outcome.reported += 1;
            stats.reports = stats.reports.wrapping_add(1);
            sm_debug!("sensor {} reported {} ({})", slot.id, value, cause.as_str());
            emit(tracer, TraceEvent::Reported { id: slot.id, value, cause });
        }

        outcome
    }

    /// Make sensor `id` due for polling and reporting on the next tick
    ///
    /// Returns `false` (and does nothing) for an unknown id. From interrupt
    /// context use a [`ForceRequests`] set instead.
    pub fn force_update(&mut self, id: SensorId) -> bool {
        match self.slots.iter_mut().find(|slot| slot.id == id) {
            Some(slot) => {
                slot.force();
                self.stats.forced = self.stats.forced.wrapping_add(1);
                sm_debug!("sensor {} forced", id);
                emit(self.tracer, TraceEvent::Forced { id });
                true
            }
            None => {
                sm_trace!("force for unknown sensor {} ignored", id);
                false
            }
        }
    }

    /// Apply pending interrupt-side requests
    ///
    /// Bits for unregistered ids are left untouched.
    fn apply_requests(&mut self) {
        let Some(requests) = self.requests else {
            return;
        };

        for index in 0..self.slots.len() {
            let id = self.slots[index].id;
            if requests.take(id) {
                self.force_update(id);
            }
        }
    }

    /// Number of registered sensors
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// No sensor registered
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Table capacity
    pub fn capacity(&self) -> usize {
        N
    }

    /// Active configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Lifetime counters
    pub fn stats(&self) -> &MonitorStats {
        &self.stats
    }

    /// Zero the lifetime counters
    pub fn reset_stats(&mut self) {
        self.stats = MonitorStats::new();
    }

    /// Slots in registration order
    pub fn slots(&self) -> impl Iterator<Item = &SensorSlot> {
        self.slots.iter()
    }

    /// Slot for sensor `id`
    pub fn slot(&self, id: SensorId) -> Option<&SensorSlot> {
        self.slots.iter().find(|slot| slot.id == id)
    }
}
