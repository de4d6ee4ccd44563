//! Audio playback capability.
//!
//! Nodes may run without an audio device (headless installs, CI). The
//! capability is therefore optional: callers hold an
//! `Option<Arc<dyn PlaybackBackend>>` and degrade to no-ops when it is absent.

use std::path::Path;

use thiserror::Error;

/// How many times a clip plays once started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackLoops {
    /// A single playthrough.
    Once,
    /// One playthrough followed by the given number of repeats.
    Repeat(u32),
    /// Repeats until stopped.
    Forever,
}

impl PlaybackLoops {
    /// Maps a play request onto a loop mode. A positive `repeat` count wins
    /// over the `looping` flag.
    #[must_use]
    pub fn from_request(looping: bool, repeat: u32) -> Self {
        if repeat > 0 {
            Self::Repeat(repeat)
        } else if looping {
            Self::Forever
        } else {
            Self::Once
        }
    }
}

/// Failure reported by a playback backend.
#[derive(Debug, Error)]
#[error("playback backend error: {0}")]
pub struct BackendError(pub String);

/// An audio output device.
pub trait PlaybackBackend: Send + Sync {
    /// Loads the asset at `path`. Returns once the backend no longer needs to
    /// read the file.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the asset cannot be opened or decoded.
    fn load(&self, path: &Path) -> Result<(), BackendError>;

    /// Starts playback of the most recently loaded asset.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the device refuses to start.
    fn play(&self, loops: PlaybackLoops) -> Result<(), BackendError>;

    /// Stops playback.
    fn stop(&self);

    /// Sets the output volume in `[0.0, 1.0]`.
    fn set_volume(&self, volume: f64);
}
