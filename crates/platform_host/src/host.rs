//! Host service bundle injected into the desktop runtime.

use std::rc::Rc;

use crate::{
    geometry::Size, Clock, DesktopSurface, ManualClock, MemoryScheduler, MemorySounds,
    MemorySurface, MemoryToasts, RandomSource, SoundService, TickScheduler, ToastService,
};

/// Runtime-selected host service bundle.
///
/// All environment-specific adapter selection happens before this bundle crosses into the
/// runtime, which keeps the window/icon core free of browser details.
#[derive(Clone)]
pub struct HostServices {
    /// Rendering surface.
    pub surface: Rc<dyn DesktopSurface>,
    /// User-visible notices.
    pub toasts: Rc<dyn ToastService>,
    /// UI sound cues.
    pub sounds: Rc<dyn SoundService>,
    /// Placement randomness.
    pub random: Rc<dyn RandomSource>,
    /// Millisecond clock.
    pub clock: Rc<dyn Clock>,
    /// Deferred-work wake-ups.
    pub scheduler: Rc<dyn TickScheduler>,
}

/// Fully in-memory host whose adapters stay inspectable after they are bundled.
#[derive(Clone)]
pub struct MemoryHost {
    /// Recording surface.
    pub surface: Rc<MemorySurface>,
    /// Recorded notices.
    pub toasts: Rc<MemoryToasts>,
    /// Recorded cues.
    pub sounds: Rc<MemorySounds>,
    /// Hand-driven clock.
    pub clock: Rc<ManualClock>,
    /// Recorded wake-up requests.
    pub scheduler: Rc<MemoryScheduler>,
}

impl MemoryHost {
    /// Wraps an already configured surface.
    pub fn new(surface: MemorySurface) -> Self {
        Self {
            surface: Rc::new(surface),
            toasts: Rc::new(MemoryToasts::default()),
            sounds: Rc::new(MemorySounds::default()),
            clock: Rc::new(ManualClock::new(1_000)),
            scheduler: Rc::new(MemoryScheduler::default()),
        }
    }

    /// Host with an empty surface of the given viewport size.
    pub fn with_viewport(viewport: Size) -> Self {
        Self::new(MemorySurface::new(viewport))
    }

    /// Bundles the adapters with the given random source.
    pub fn services(&self, random: Rc<dyn RandomSource>) -> HostServices {
        HostServices {
            surface: self.surface.clone(),
            toasts: self.toasts.clone(),
            sounds: self.sounds.clone(),
            random,
            clock: self.clock.clone(),
            scheduler: self.scheduler.clone(),
        }
    }
}
