//! Runtime payload pushed from the hub to a node.
//!
//! The payload is always derived, never persisted. Nodes consume it to drive
//! their audio and LED output.

use serde::{Deserialize, Serialize};

/// Fully resolved settings for one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimePayload {
    /// Audio output settings.
    pub audio: AudioSettings,
    /// Accessibility settings.
    pub accessibility: AccessibilitySettings,
}

/// Audio group of the runtime payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Output volume in `[0.0, 1.0]`.
    pub volume: f64,
}

/// Accessibility group of the runtime payload.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccessibilitySettings {
    /// Whether captions are shown.
    pub captions: bool,
    /// Whether the LED pulses with audio.
    pub visual_pulse: bool,
    /// Whether the LED glows when a visitor is near.
    pub proximity_glow: bool,
    /// Extra dwell time before a node re-arms, in `[0, 60000]` ms.
    pub mobility_buffer_ms: u32,
    /// Extra playthroughs per trigger, in `[0, 2]`.
    pub repeat: u32,
    /// Playback tempo multiplier, in `[0.85, 1.15]`.
    pub pace: f64,
    /// Whether the node applies its volume ceiling.
    pub safety_limiter: bool,
}
