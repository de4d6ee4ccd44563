//! Node-side playback control: volume ceiling, loop mapping and pacing.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use echotrace_core::payload::RuntimePayload;
use echotrace_core::playback::{PlaybackBackend, PlaybackLoops};
use tempfile::TempPath;
use tracing::{debug, error, info, warn};

use crate::paced_asset::{PacedAssetSlot, discard, produce_paced_copy};

/// Paces closer to unity than this play the original asset.
pub const PACE_TOLERANCE: f64 = 0.02;

/// Arguments for [`AudioPacingEngine::play`] derived from a runtime payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackRequest {
    /// Tempo multiplier.
    pub pace: f64,
    /// Extra playthroughs per trigger.
    pub repeat: u32,
}

/// Playback controller for one node.
///
/// Holds the loaded source, a volume ceiling and at most one paced copy of
/// the source. The paced copy is deleted when superseded, when a new source
/// is loaded, after the backend has loaded it, or when the engine is dropped.
pub struct AudioPacingEngine {
    backend: Option<Arc<dyn PlaybackBackend>>,
    source: Mutex<Option<PathBuf>>,
    safety_limit: Mutex<f64>,
    paced: PacedAssetSlot,
}

impl fmt::Debug for AudioPacingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioPacingEngine")
            .field("has_backend", &self.backend.is_some())
            .field("source", &self.loaded_source())
            .field("safety_limit", &self.safety_limit())
            .field("paced", &self.paced)
            .finish()
    }
}

impl AudioPacingEngine {
    /// Creates an engine driving `backend`, or a headless engine when `None`.
    #[must_use]
    pub fn new(backend: Option<Arc<dyn PlaybackBackend>>) -> Self {
        Self {
            backend,
            source: Mutex::new(None),
            safety_limit: Mutex::new(1.0),
            paced: PacedAssetSlot::new(),
        }
    }

    /// Creates an engine with no audio device. Every playback call is a
    /// logged no-op.
    #[must_use]
    pub fn headless() -> Self {
        Self::new(None)
    }

    /// Returns `true` if a playback backend is attached.
    #[must_use]
    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Sets the volume ceiling, clamped to `[0.0, 1.0]`.
    pub fn set_safety_limit(&self, limit: f64) {
        *lock(&self.safety_limit) = unit_interval(limit);
    }

    /// Current volume ceiling.
    #[must_use]
    pub fn safety_limit(&self) -> f64 {
        *lock(&self.safety_limit)
    }

    /// Applies `requested` volume under the ceiling and returns the effective
    /// volume.
    pub fn set_volume(&self, requested: f64) -> f64 {
        let effective = unit_interval(requested).min(self.safety_limit());
        match &self.backend {
            Some(backend) => {
                backend.set_volume(effective);
                debug!(requested, effective, "volume set");
            }
            None => debug!(requested, effective, "no playback backend; volume not applied"),
        }
        effective
    }

    /// Records `asset` as the source for subsequent plays, discarding any
    /// paced copy of the previous source.
    pub fn load(&self, asset: impl Into<PathBuf>) {
        self.paced.clear();
        let asset = asset.into();
        debug!(source = %asset.display(), "audio source loaded");
        *lock(&self.source) = Some(asset);
    }

    /// The source recorded by the last [`load`](Self::load).
    #[must_use]
    pub fn loaded_source(&self) -> Option<PathBuf> {
        lock(&self.source).clone()
    }

    /// Plays the loaded source.
    ///
    /// A positive `repeat` plays the clip that many extra times; otherwise
    /// `looping` repeats until stopped. A pace at least [`PACE_TOLERANCE`]
    /// away from unity plays a paced copy when one can be produced, and the
    /// copy is deleted once the backend has loaded it.
    pub fn play(&self, looping: bool, pace: f64, repeat: u32) {
        let Some(source) = self.loaded_source() else {
            warn!("play requested with no audio loaded");
            return;
        };
        let Some(backend) = self.backend.as_deref() else {
            info!(source = %source.display(), "no playback backend; play ignored");
            return;
        };

        // The copy is owned here until the backend has loaded it, so a
        // concurrent cleanup cannot delete it first.
        let paced = if (pace - 1.0).abs() >= PACE_TOLERANCE {
            self.paced.clear();
            paced_copy_of(&source, pace)
        } else {
            None
        };
        let target = paced.as_deref().unwrap_or(&source).to_path_buf();
        let loops = PlaybackLoops::from_request(looping, repeat);

        let loaded = backend.load(&target);
        if let Some(paced) = paced {
            discard(paced);
        }

        match loaded.and_then(|()| backend.play(loops)) {
            Ok(()) => debug!(asset = %target.display(), ?loops, pace, "playback started"),
            Err(err) => error!(asset = %target.display(), error = %err, "playback failed"),
        }
    }

    /// Stops playback.
    pub fn stop(&self) {
        if let Some(backend) = &self.backend {
            backend.stop();
        }
    }

    /// Writes a copy of the loaded source paced by `pace` and returns its
    /// path, replacing any previous paced copy.
    ///
    /// Returns `None` when nothing is loaded, the source is not a WAV asset,
    /// or the copy cannot be written.
    pub fn make_paced_copy(&self, pace: f64) -> Option<PathBuf> {
        let Some(source) = self.loaded_source() else {
            debug!("no audio loaded; nothing to pace");
            return None;
        };
        self.paced.clear();
        paced_copy_of(&source, pace).map(|asset| self.paced.replace(asset))
    }

    /// Path of the current paced copy.
    #[must_use]
    pub fn paced_asset(&self) -> Option<PathBuf> {
        self.paced.current()
    }

    /// Deletes the current paced copy. Safe to call repeatedly.
    pub fn cleanup_paced_asset(&self) {
        self.paced.clear();
    }

    /// Applies a runtime payload pushed by the hub.
    ///
    /// With `safety_limiter` on the ceiling becomes `limiter_ceiling`,
    /// otherwise 1.0. The payload volume is then applied and the pacing
    /// arguments for the next [`play`](Self::play) are returned.
    pub fn apply_payload(&self, payload: &RuntimePayload, limiter_ceiling: f64) -> PlaybackRequest {
        let limit = if payload.accessibility.safety_limiter {
            limiter_ceiling
        } else {
            1.0
        };
        self.set_safety_limit(limit);
        let volume = self.set_volume(payload.audio.volume);
        info!(
            volume,
            limit = self.safety_limit(),
            pace = payload.accessibility.pace,
            repeat = payload.accessibility.repeat,
            "runtime payload applied"
        );
        PlaybackRequest {
            pace: payload.accessibility.pace,
            repeat: payload.accessibility.repeat,
        }
    }
}

fn paced_copy_of(source: &Path, pace: f64) -> Option<TempPath> {
    match produce_paced_copy(source, pace) {
        Ok(asset) => Some(asset),
        Err(err) => {
            warn!(source = %source.display(), pace, error = %err, "paced copy unavailable");
            None
        }
    }
}

fn unit_interval(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
