//! Shared test doubles and fixtures for EchoTrace.

mod clock;
mod playback;
mod repository;
mod wav;

pub use clock::FixedClock;
pub use playback::{BackendCall, RecordingPlaybackBackend};
pub use repository::{FailingProfileRepository, InMemoryProfileRepository};
pub use wav::write_test_wav;
