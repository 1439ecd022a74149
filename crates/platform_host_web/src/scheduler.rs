//! `setTimeout`-backed tick scheduling.

use std::{cell::RefCell, fmt, rc::Rc};

use platform_host::TickScheduler;

type TickCallback = Rc<dyn Fn()>;

/// Calls the installed callback after each requested delay.
///
/// The scheduler is bundled into host services before the runtime exists, so the callback that
/// ticks the runtime is installed afterwards through [`WebTickScheduler::set_callback`]. Clones
/// share the slot.
#[derive(Clone, Default)]
pub struct WebTickScheduler {
    callback: Rc<RefCell<Option<TickCallback>>>,
}

impl fmt::Debug for WebTickScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebTickScheduler")
            .field("installed", &self.callback.borrow().is_some())
            .finish()
    }
}

impl WebTickScheduler {
    /// Installs the callback run when a requested delay elapses.
    pub fn set_callback(&self, callback: impl Fn() + 'static) {
        *self.callback.borrow_mut() = Some(Rc::new(callback));
    }
}

impl TickScheduler for WebTickScheduler {
    fn request_tick(&self, delay_ms: u64) {
        let Some(callback) = self.callback.borrow().clone() else {
            tracing::debug!(delay_ms, "tick requested before a callback was installed");
            return;
        };
        crate::dom::set_timeout(delay_ms, Box::new(move || callback()));
    }
}
