//! Typed host capability contracts consumed by the desktop window/icon core.
//!
//! The core never touches a rendering tree directly. It reads geometry from and writes styling to a
//! [`DesktopSurface`], emits user-visible notices through a [`ToastService`], plays cues through a
//! [`SoundService`], and asks a [`TickScheduler`] to wake it when deferred work falls due. Browser
//! adapters live in `platform_host_web`; the in-memory adapters here back native hosts and tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod geometry;
pub mod host;
pub mod notifications;
pub mod random;
pub mod scheduler;
pub mod sound;
pub mod surface;
pub mod time;

pub use geometry::{Point, Rect, Size};
pub use host::{HostServices, MemoryHost};
pub use notifications::{MemoryToasts, NoopToastService, ToastService};
pub use random::{HostRandom, RandomSource, SequenceRandom};
pub use scheduler::{MemoryScheduler, NoopScheduler, TickScheduler};
pub use sound::{MemorySounds, NoopSoundService, SoundCue, SoundService};
pub use surface::{
    ContextMenuStyle, DesktopSurface, IconStyle, MemorySurface, WindowPlacement, WindowStyle,
};
pub use time::{unix_time_ms_now, Clock, ManualClock, SystemClock};
