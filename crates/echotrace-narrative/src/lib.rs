//! EchoTrace: narrative trigger tracking.
//!
//! Records which whisper nodes have been triggered and unlocks the shared
//! mystery narrative once enough distinct fragments have been heard.

pub mod domain;

pub use domain::tracker::{NarrativeSnapshot, NarrativeTracker};
