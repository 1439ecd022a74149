//! Wake-up contract for deferred desktop work.
//!
//! The runtime owns its timer queue; a scheduler only promises to call back into the runtime's
//! `tick` no earlier than the requested delay. Hosts without timers may ignore requests and tick
//! from their own loop instead.

use std::cell::RefCell;

/// Host service that requests a future runtime tick.
pub trait TickScheduler {
    /// Requests a tick after `delay_ms` milliseconds.
    fn request_tick(&self, delay_ms: u64);
}

#[derive(Debug, Clone, Copy, Default)]
/// Scheduler for hosts that tick on their own cadence.
pub struct NoopScheduler;

impl TickScheduler for NoopScheduler {
    fn request_tick(&self, _delay_ms: u64) {}
}

#[derive(Debug, Default)]
/// Scheduler that records requested delays.
pub struct MemoryScheduler {
    requested: RefCell<Vec<u64>>,
}

impl MemoryScheduler {
    /// Delays requested so far, in request order.
    pub fn requested(&self) -> Vec<u64> {
        self.requested.borrow().clone()
    }
}

impl TickScheduler for MemoryScheduler {
    fn request_tick(&self, delay_ms: u64) {
        self.requested.borrow_mut().push(delay_ms);
    }
}
