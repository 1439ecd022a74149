//! Deadline-ordered queue for deferred reducer work.

use std::collections::BTreeMap;

use crate::reducer::DeferredAction;

/// Pending deferred actions keyed by absolute deadline, then by scheduling order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerQueue {
    entries: BTreeMap<(u64, u64), DeferredAction>,
    next_seq: u64,
}

impl TimerQueue {
    /// Queues `action` to fire `delay_ms` after `now_ms` and returns its deadline.
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, action: DeferredAction) -> u64 {
        let deadline = now_ms.saturating_add(delay_ms);
        self.entries.insert((deadline, self.next_seq), action);
        self.next_seq += 1;
        deadline
    }

    /// Removes and returns every action due at `now_ms`, earliest deadline first.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<DeferredAction> {
        let later = match now_ms.checked_add(1) {
            Some(bound) => self.entries.split_off(&(bound, 0)),
            None => BTreeMap::new(),
        };
        std::mem::replace(&mut self.entries, later)
            .into_values()
            .collect()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.keys().next().map(|(deadline, _)| *deadline)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
