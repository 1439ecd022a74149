//! Toast notification contract and in-memory adapters.

use std::cell::RefCell;

/// Host service for short-lived, user-visible notices.
///
/// Delivery is fire-and-forget: the core never waits on or inspects the outcome.
pub trait ToastService {
    /// Shows a notice with the given text.
    fn notify(&self, message: &str);
}

#[derive(Debug, Clone, Copy, Default)]
/// Toast service that drops every notice.
pub struct NoopToastService;

impl ToastService for NoopToastService {
    fn notify(&self, message: &str) {
        tracing::debug!("dropping toast: {message}");
    }
}

#[derive(Debug, Default)]
/// Toast service that records notices in delivery order.
pub struct MemoryToasts {
    messages: RefCell<Vec<String>>,
}

impl MemoryToasts {
    /// Notices delivered so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    /// Number of delivered notices whose text contains `needle`.
    pub fn count_containing(&self, needle: &str) -> usize {
        self.messages
            .borrow()
            .iter()
            .filter(|message| message.contains(needle))
            .count()
    }
}

impl ToastService for MemoryToasts {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
