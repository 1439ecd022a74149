//! Sound cues forwarded to the page's audio feature.

use platform_host::{SoundCue, SoundService};

/// DOM event type carrying a cue name in `detail`.
pub const SOUND_EVENT: &str = "desktop-sound";

#[derive(Debug, Clone, Copy, Default)]
/// [`SoundService`] that dispatches a [`SOUND_EVENT`] custom event on `window`.
pub struct WebSoundService;

impl SoundService for WebSoundService {
    fn play(&self, cue: SoundCue) {
        crate::dom::dispatch_custom_event(SOUND_EVENT, cue.as_str());
    }
}
