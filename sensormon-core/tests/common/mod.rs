//! Common test utilities for integration tests
//!
//! Provides a `Harness` that owns a mock clock and scripted sensor values,
//! and records every poll and report the monitor makes.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use sensormon_core::{
    Clock, FixedSeed, Millis, MockClock, Monitor, MonitorBuilder, ReadingSource, SensorId,
    UpdateSink,
};

/// Seed used by every harness-built monitor
pub const SEED: u64 = 0x5eed;

/// Well past boot, so the randomized initial polls are all due
pub const START: Millis = 60_000;

/// A report seen by the sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    pub id: SensorId,
    pub value: f32,
    pub at: Millis,
}

/// Scripted sensors plus poll/report recording
pub struct Harness {
    pub clock: MockClock,
    readings: RefCell<HashMap<SensorId, Option<f32>>>,
    polls: RefCell<Vec<(SensorId, Millis)>>,
    reports: RefCell<Vec<Report>>,
}

impl Harness {
    pub fn new(start: Millis) -> Self {
        Self {
            clock: MockClock::new(start),
            readings: RefCell::new(HashMap::new()),
            polls: RefCell::new(Vec::new()),
            reports: RefCell::new(Vec::new()),
        }
    }

    /// Value returned for sensor `id` from now on
    pub fn set(&self, id: SensorId, value: Option<f32>) {
        self.readings.borrow_mut().insert(id, value);
    }

    pub fn reader(&self) -> impl FnMut(SensorId) -> Option<f32> + '_ {
        move |id| {
            self.polls.borrow_mut().push((id, self.clock.now_ms()));
            self.readings.borrow().get(&id).copied().flatten()
        }
    }

    pub fn sink(&self) -> impl FnMut(SensorId, f32) + '_ {
        move |id, value| {
            self.reports.borrow_mut().push(Report {
                id,
                value,
                at: self.clock.now_ms(),
            })
        }
    }

    pub fn builder(
        &self,
    ) -> MonitorBuilder<impl ReadingSource + '_, impl UpdateSink + '_, &MockClock> {
        MonitorBuilder::new(self.reader(), self.sink(), &self.clock)
    }

    /// Monitor with default config and the given sensors, already started
    pub fn monitor(
        &self,
        ids: &[SensorId],
    ) -> Monitor<impl ReadingSource + '_, impl UpdateSink + '_, &MockClock> {
        let mut builder = self.builder();
        for &id in ids {
            builder = builder.register(id).expect("register");
        }
        builder.begin(&mut FixedSeed(SEED)).expect("begin")
    }

    /// Advance in `step` increments, ticking after each, until `duration` passed
    pub fn run<R, U, C, const N: usize>(
        &self,
        monitor: &mut Monitor<R, U, C, N>,
        duration: Millis,
        step: Millis,
    ) where
        R: ReadingSource,
        U: UpdateSink,
        C: Clock,
    {
        let mut elapsed = 0;
        while elapsed < duration {
            self.clock.advance(step);
            elapsed += step;
            monitor.tick();
        }
    }

    pub fn polls_of(&self, id: SensorId) -> Vec<Millis> {
        self.polls
            .borrow()
            .iter()
            .filter(|(polled, _)| *polled == id)
            .map(|(_, at)| *at)
            .collect()
    }

    pub fn reports_of(&self, id: SensorId) -> Vec<Report> {
        self.reports
            .borrow()
            .iter()
            .filter(|report| report.id == id)
            .copied()
            .collect()
    }

    pub fn all_polls(&self) -> Vec<(SensorId, Millis)> {
        self.polls.borrow().clone()
    }

    pub fn all_reports(&self) -> Vec<Report> {
        self.reports.borrow().clone()
    }

    pub fn clear_log(&self) {
        self.polls.borrow_mut().clear();
        self.reports.borrow_mut().clear();
    }
}
