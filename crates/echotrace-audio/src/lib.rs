//! EchoTrace node audio playback.
//!
//! Wraps an optional playback backend with a volume safety ceiling and
//! tempo adjustment. Tempo changes are produced by rewriting a WAV asset at a
//! scaled sample rate, which shifts pitch along with tempo.

pub mod paced_asset;
pub mod pacing;

pub use pacing::{AudioPacingEngine, PlaybackRequest};
