//! Time management for the polling loop
//!
//! The scheduler only needs a monotonic millisecond counter. On most MCUs
//! this is a 32-bit tick that wraps after ~49.7 days, so every comparison
//! goes through wrapping subtraction and never through `<` on raw stamps.
//!
//! Provided clocks:
//! - `StdClock`: milliseconds since construction (requires `std`)
//! - `MockClock`: manually driven clock for tests and simulations

use core::cell::Cell;

/// Milliseconds on a wrapping monotonic counter
pub type Millis = u32;

/// Monotonic millisecond source
///
/// Implement this over the board's timer peripheral (SysTick, RTC counter,
/// `embassy_time::Instant`, ...). Only the low 32 bits are used.
pub trait Clock {
    /// Current time in milliseconds
    fn now_ms(&self) -> Millis;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}

/// Milliseconds elapsed from `since` to `now`, correct across one wrap
#[inline]
pub fn elapsed(now: Millis, since: Millis) -> Millis {
    now.wrapping_sub(since)
}

/// Whether at least `period` milliseconds separate `since` from `now`
#[inline]
pub fn has_elapsed(now: Millis, since: Millis, period: Millis) -> bool {
    elapsed(now, since) >= period
}

/// Clock backed by `std::time::Instant`
///
/// Starts at 0 on construction and wraps like a hardware counter.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct StdClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Start counting from now
    pub fn new() -> Self {
        Self { start: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_ms(&self) -> Millis {
        // Truncation is the wraparound
        self.start.elapsed().as_millis() as Millis
    }
}

/// Manually driven clock for testing
///
/// Uses a `Cell` so a test can keep a shared reference, hand `&clock` to
/// the monitor, and still move time forward between ticks.
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    now: Cell<Millis>,
}

impl MockClock {
    /// Create a clock reading `start`
    pub const fn new(start: Millis) -> Self {
        Self { now: Cell::new(start) }
    }

    /// Jump to an absolute time
    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }

    /// Move forward by `ms`, wrapping like a hardware counter
    pub fn advance(&self, ms: Millis) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}
