//! Window-management core for the retro web desktop.
//!
//! [`WindowManager`] gives every panel drag, bring-to-front, and maximize behavior under a single
//! global drag lock. [`DesktopIconRegistry`] owns the desktop shortcuts. Both sit inside
//! [`DesktopState`], which only changes through [`reduce_desktop`]; [`DesktopRuntime`] executes the
//! resulting [`RuntimeEffect`] intents against injected [`platform_host::HostServices`].

pub mod catalog;
pub mod config;
pub mod context_menu;
mod effect_executor;
pub mod icons;
pub mod input;
pub mod logging;
pub mod model;
pub mod reducer;
pub mod runtime_context;
pub mod timers;
pub mod window_manager;

pub use catalog::{gallery_descriptor, panel_descriptor, GalleryDescriptor, PanelDescriptor};
pub use config::{ConfigError, DesktopConfig};
pub use context_menu::{
    ContextAction, ContextHandler, ContextMenuDispatch, ContextMenuState, ContextTarget,
};
pub use icons::{DesktopIconRegistry, Rejection};
pub use input::{route_input, HitTarget, InputEvent, Key, PointerButton, WindowControl};
pub use model::*;
pub use reducer::{reduce_desktop, DeferredAction, DesktopAction, ReduceEnv, RuntimeEffect};
pub use runtime_context::DesktopRuntime;
pub use timers::TimerQueue;
pub use window_manager::{WindowLimits, WindowManager};
