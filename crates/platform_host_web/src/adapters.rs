//! Browser host-service bundle assembly.

use std::rc::Rc;

use platform_host::{HostRandom, HostServices, SystemClock};

use crate::{DomSurface, DomSurfaceConfig, WebSoundService, WebTickScheduler, WebToastService};

/// Builds the browser [`HostServices`] bundle.
///
/// `scheduler` is kept by the caller so it can install the tick callback once the runtime exists.
pub fn build_host_services(
    surface: DomSurfaceConfig,
    toasts: WebToastService,
    scheduler: &WebTickScheduler,
) -> HostServices {
    HostServices {
        surface: Rc::new(DomSurface::new(surface)),
        toasts: Rc::new(toasts),
        sounds: Rc::new(WebSoundService),
        random: Rc::new(HostRandom::default()),
        clock: Rc::new(SystemClock),
        scheduler: Rc::new(scheduler.clone()),
    }
}
