//! Interrupt-Safe Force Requests
//!
//! ## Overview
//!
//! A button press or a GPIO edge often means "read this sensor now". The
//! interrupt handler can't borrow the monitor (the main loop owns it), so it
//! records the request in a `static ForceRequests` instead. The monitor
//! drains the set at the start of every tick and applies a `force_update`
//! for each pending id.
//!
//! ```text
//! ISR                             main loop
//!  │                                 │
//!  ├─ REQUESTS.request(id) ──┐       │
//!  │   (atomic fetch_or)     │       ├─ monitor.tick()
//!  │                         └──────►│   ├─ REQUESTS.take(id) (atomic fetch_and)
//!  │                                 │   └─ slot.force()
//! ```
//!
//! ## Storage
//!
//! One bit per possible `SensorId` (256 bits in eight `AtomicU32` words).
//! Setting and clearing a bit are single read-modify-write atomics, so the
//! producer never blocks and the slot's two timestamps are only ever written
//! from the tick context.
//!
//! Targets without atomic RMW (thumbv6m, AVR) need a `critical-section`
//! based implementation instead.
//!
//! ## Example
//!
//! ```rust
//! use sensormon_core::ForceRequests;
//!
//! static REQUESTS: ForceRequests = ForceRequests::new();
//!
//! // Interrupt handler
//! fn on_button() {
//!     REQUESTS.request(3);
//! }
//!
//! on_button();
//! assert!(REQUESTS.is_pending(3));
//! assert!(REQUESTS.take(3));
//! assert!(!REQUESTS.take(3));
//! ```

use core::sync::atomic::{AtomicU32, Ordering};

use crate::slot::SensorId;

const WORD_BITS: usize = 32;
const WORDS: usize = (SensorId::MAX as usize + 1) / WORD_BITS;

/// Pending force requests keyed by sensor id
pub struct ForceRequests {
    pending: [AtomicU32; WORDS],
}

impl ForceRequests {
    /// Empty request set, usable in a `static`
    pub const fn new() -> Self {
        #[allow(clippy::declare_interior_mutable_const)]
        const CLEAR: AtomicU32 = AtomicU32::new(0);
        Self { pending: [CLEAR; WORDS] }
    }

    #[inline]
    fn locate(id: SensorId) -> (usize, u32) {
        let bit = id as usize;
        (bit / WORD_BITS, 1 << (bit % WORD_BITS))
    }

    /// Ask for sensor `id` to be polled and reported on the next tick
    ///
    /// Safe to call from interrupt context. Repeated requests before the
    /// next tick collapse into one.
    pub fn request(&self, id: SensorId) {
        let (word, mask) = Self::locate(id);
        self.pending[word].fetch_or(mask, Ordering::Release);
    }

    /// Clear and return the pending flag for `id`
    pub fn take(&self, id: SensorId) -> bool {
        let (word, mask) = Self::locate(id);
        self.pending[word].fetch_and(!mask, Ordering::Acquire) & mask != 0
    }

    /// Check for a pending request without clearing it
    pub fn is_pending(&self, id: SensorId) -> bool {
        let (word, mask) = Self::locate(id);
        self.pending[word].load(Ordering::Acquire) & mask != 0
    }

    /// Whether any request is pending
    pub fn any_pending(&self) -> bool {
        self.pending.iter().any(|w| w.load(Ordering::Acquire) != 0)
    }

    /// Drop every pending request
    pub fn clear(&self) {
        for word in &self.pending {
            word.store(0, Ordering::Release);
        }
    }
}

impl Default for ForceRequests {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ForceRequests {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ForceRequests")
            .field("any_pending", &self.any_pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_and_take() {
        let requests = ForceRequests::new();
        assert!(!requests.any_pending());

        requests.request(0);
        requests.request(31);
        requests.request(32);
        requests.request(255);
        assert!(requests.any_pending());

        for id in [0, 31, 32, 255] {
            assert!(requests.is_pending(id));
            assert!(requests.take(id));
            assert!(!requests.take(id));
        }
        assert!(!requests.any_pending());
    }

    #[test]
    fn repeated_requests_collapse() {
        let requests = ForceRequests::new();
        requests.request(9);
        requests.request(9);
        assert!(requests.take(9));
        assert!(!requests.is_pending(9));
    }

    #[test]
    fn neighbours_are_independent() {
        let requests = ForceRequests::new();
        requests.request(4);
        assert!(!requests.take(5));
        assert!(requests.is_pending(4));

        requests.clear();
        assert!(!requests.is_pending(4));
    }

    #[cfg(feature = "std")]
    #[test]
    fn concurrent_producers() {
        use std::sync::Arc;
        use std::thread;

        let requests = Arc::new(ForceRequests::new());
        let handles: Vec<_> = (0..4u8)
            .map(|t| {
                let requests = Arc::clone(&requests);
                thread::spawn(move || {
                    for id in (t..=255).step_by(4) {
                        requests.request(id);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        for id in 0..=255u8 {
            assert!(requests.take(id), "id {} lost", id);
        }
    }
}
