//! Test playback backend: records every call instead of making sound.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use echotrace_core::playback::{BackendError, PlaybackBackend, PlaybackLoops};

/// A call received by [`RecordingPlaybackBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    /// `load` was called; `existed` records whether the file was present.
    Load {
        /// The path handed to the backend.
        path: PathBuf,
        /// Whether the file existed when the backend was asked to load it.
        existed: bool,
    },
    /// `play` was called.
    Play(PlaybackLoops),
    /// `stop` was called.
    Stop,
    /// `set_volume` was called.
    SetVolume(f64),
}

/// A playback backend that records calls. Optionally fails every `load`.
#[derive(Debug, Default)]
pub struct RecordingPlaybackBackend {
    calls: Mutex<Vec<BackendCall>>,
    fail_loads: bool,
}

impl RecordingPlaybackBackend {
    /// Creates a backend that accepts every call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend whose `load` always fails.
    #[must_use]
    pub fn failing_loads() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_loads: true,
        }
    }

    /// Returns a snapshot of all recorded calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the paths handed to `load`, in order.
    pub fn loaded_paths(&self) -> Vec<PathBuf> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                BackendCall::Load { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }
}

impl PlaybackBackend for RecordingPlaybackBackend {
    fn load(&self, path: &Path) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(BackendCall::Load {
            path: path.to_path_buf(),
            existed: path.exists(),
        });
        if self.fail_loads {
            return Err(BackendError(format!("cannot open {}", path.display())));
        }
        Ok(())
    }

    fn play(&self, loops: PlaybackLoops) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(BackendCall::Play(loops));
        Ok(())
    }

    fn stop(&self) {
        self.calls.lock().unwrap().push(BackendCall::Stop);
    }

    fn set_volume(&self, volume: f64) {
        self.calls.lock().unwrap().push(BackendCall::SetVolume(volume));
    }
}
