//! UI sound-cue contract.
//!
//! Synthesis lives outside the desktop core; the core only names which cue should play.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

/// Named UI sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Generic interaction click.
    Click,
    /// Pointer entering an interactive target.
    Hover,
    /// Something opened or was created.
    Startup,
    /// An icon finished its trip to the trash.
    Delete,
    /// A request could not proceed.
    Error,
}

impl SoundCue {
    /// Stable token for diagnostics and host lookups.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Hover => "hover",
            Self::Startup => "startup",
            Self::Delete => "delete",
            Self::Error => "error",
        }
    }
}

/// Host service that plays sound cues.
pub trait SoundService {
    /// Plays a cue; failures are the host's concern.
    fn play(&self, cue: SoundCue);
}

#[derive(Debug, Clone, Copy, Default)]
/// Sound service for muted or audio-less hosts.
pub struct NoopSoundService;

impl SoundService for NoopSoundService {
    fn play(&self, _cue: SoundCue) {}
}

#[derive(Debug, Default)]
/// Sound service that records cues in play order.
pub struct MemorySounds {
    played: RefCell<Vec<SoundCue>>,
}

impl MemorySounds {
    /// Cues played so far.
    pub fn played(&self) -> Vec<SoundCue> {
        self.played.borrow().clone()
    }

    /// Number of times `cue` was played.
    pub fn count(&self, cue: SoundCue) -> usize {
        self.played.borrow().iter().filter(|c| **c == cue).count()
    }
}

impl SoundService for MemorySounds {
    fn play(&self, cue: SoundCue) {
        self.played.borrow_mut().push(cue);
    }
}
