//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! The desktop surface projects window, icon, and context-menu styles onto existing page
//! elements; toasts, sound cues, and tick wake-ups go through the DOM as well. DOM access is
//! split under `dom/` into a `wasm32` transport and an inert native one, so the crate builds and
//! tests on any target.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod adapters;
mod dom;
pub mod logging;
pub mod mount;
pub mod scheduler;
pub mod sound;
pub mod surface;
pub mod toasts;

pub use adapters::build_host_services;
pub use logging::{ConsoleMakeWriter, ConsoleWriter};
pub use mount::{mount, DesktopController};
pub use scheduler::WebTickScheduler;
pub use sound::{WebSoundService, SOUND_EVENT};
pub use surface::{action_label, DomSurface, DomSurfaceConfig};
pub use toasts::WebToastService;
