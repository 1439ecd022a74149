//! Slide-in toast notices.

use platform_host::ToastService;

use crate::dom;

#[derive(Debug, Clone, PartialEq, Eq)]
/// [`ToastService`] that appends a `.notification` element and removes it after its lifetime.
pub struct WebToastService {
    container_id: Option<String>,
    visible_ms: u64,
    exit_ms: u64,
}

impl WebToastService {
    /// Shows notices for `visible_ms`, then lets the exit animation run for `exit_ms`.
    pub fn new(visible_ms: u64, exit_ms: u64) -> Self {
        Self {
            container_id: None,
            visible_ms,
            exit_ms,
        }
    }

    /// Appends notices to the given element instead of the document body.
    pub fn in_container(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = Some(container_id.into());
        self
    }
}

impl Default for WebToastService {
    fn default() -> Self {
        Self::new(3_000, 300)
    }
}

impl ToastService for WebToastService {
    fn notify(&self, message: &str) {
        dom::show_toast(
            self.container_id.as_deref(),
            message,
            self.visible_ms,
            self.exit_ms,
        );
    }
}
