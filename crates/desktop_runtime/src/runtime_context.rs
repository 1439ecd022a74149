//! Long-lived desktop runtime: owns the model, the timer queue, and the feature handler tables,
//! and drives host services with reducer-emitted effects.
//!
//! Features receive the runtime by reference; nothing in the core is reachable through globals.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use platform_host::HostServices;
use tracing::{debug, info};

use crate::catalog::static_panels;
use crate::config::DesktopConfig;
use crate::context_menu::{ContextAction, ContextHandler, ContextMenuDispatch};
use crate::effect_executor::run_host_effect;
use crate::input::{route_input, InputEvent};
use crate::model::{DesktopState, InteractionState};
use crate::reducer::{reduce_desktop, DesktopAction, ReduceEnv, RuntimeEffect};
use crate::timers::TimerQueue;

type ShortcutHandler = Box<dyn FnMut()>;

pub struct DesktopRuntime {
    config: DesktopConfig,
    host: HostServices,
    state: DesktopState,
    interaction: InteractionState,
    timers: TimerQueue,
    context_menu: ContextMenuDispatch,
    shortcuts: HashMap<String, ShortcutHandler>,
}

impl fmt::Debug for DesktopRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DesktopRuntime")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("interaction", &self.interaction)
            .field("timers", &self.timers)
            .field("context_menu", &self.context_menu)
            .field("shortcuts", &self.shortcuts.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl DesktopRuntime {
    pub fn new(config: DesktopConfig, host: HostServices) -> Self {
        Self {
            state: DesktopState::new(&config),
            config,
            host,
            interaction: InteractionState::default(),
            timers: TimerQueue::default(),
            context_menu: ContextMenuDispatch::with_builtin_handlers(),
            shortcuts: HashMap::new(),
        }
    }

    /// Registers every static panel whose frame is present on the surface.
    pub fn boot(&mut self) {
        for descriptor in static_panels() {
            match self.host.surface.frame_size(descriptor.dom_id) {
                Some(size) => self.dispatch(DesktopAction::RegisterPanel {
                    panel: descriptor.id,
                    size,
                }),
                None => debug!(panel = descriptor.dom_id, "panel frame not present"),
            }
        }
        info!(
            windows = self.state.windows.windows().len(),
            "desktop runtime booted"
        );
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    /// Adds a feature handler for a context-menu action.
    pub fn register_context_handler(&mut self, action: ContextAction, handler: ContextHandler) {
        self.context_menu.register(action, handler);
    }

    /// Installs the callback run when a generic shortcut with `key` is activated.
    pub fn on_shortcut(&mut self, key: impl Into<String>, handler: impl FnMut() + 'static) {
        self.shortcuts.insert(key.into(), Box::new(handler));
    }

    /// Applies `action` and every action its effects lead to, in order.
    pub fn dispatch(&mut self, action: DesktopAction) {
        let mut pending = VecDeque::from([action]);
        while let Some(action) = pending.pop_front() {
            debug!(?action, "dispatch");
            let env = ReduceEnv {
                config: &self.config,
                viewport: self.host.surface.viewport(),
                desktop: self.host.surface.desktop_size(),
                now_ms: self.host.clock.now_ms(),
                random: &*self.host.random,
            };
            let effects = reduce_desktop(&mut self.state, &mut self.interaction, &env, action);
            for effect in effects {
                if let Some(follow_up) = self.run_effect(effect) {
                    pending.push_back(follow_up);
                }
            }
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        let viewport = self.host.surface.viewport();
        for action in route_input(&self.state, &self.interaction, viewport, event) {
            self.dispatch(action);
        }
    }

    /// Fires every deferred action due on the host clock. Returns how many fired.
    pub fn tick(&mut self) -> usize {
        let now_ms = self.host.clock.now_ms();
        self.tick_at(now_ms)
    }

    /// Fires every deferred action due at `now_ms`. Returns how many fired.
    pub fn tick_at(&mut self, now_ms: u64) -> usize {
        let due = self.timers.drain_due(now_ms);
        let fired = due.len();
        for action in due {
            self.dispatch(DesktopAction::Deferred(action));
        }
        fired
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    fn run_effect(&mut self, effect: RuntimeEffect) -> Option<DesktopAction> {
        let effect = run_host_effect(&self.host, &self.state, &self.interaction, effect)?;
        match effect {
            RuntimeEffect::Schedule { delay_ms, action } => {
                let now_ms = self.host.clock.now_ms();
                self.timers.schedule(now_ms, delay_ms, action);
                self.host.scheduler.request_tick(delay_ms);
                None
            }
            RuntimeEffect::RunContextAction { action, target } => {
                let resolved = self.context_menu.invoke(action, &target, &self.state);
                if resolved.is_none() {
                    debug!(action = action.as_str(), ?target, "context action had no effect");
                }
                resolved
            }
            RuntimeEffect::ActivateShortcut(key) => {
                match self.shortcuts.get_mut(&key) {
                    Some(handler) => handler(),
                    None => debug!(key = %key, "no handler for shortcut"),
                }
                None
            }
            other => {
                debug!(?other, "effect left unhandled");
                None
            }
        }
    }
}
