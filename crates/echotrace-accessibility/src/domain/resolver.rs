//! Resolves global settings and a per-node override into a runtime payload.
//!
//! Precedence per field: explicit override, then a computed default (which
//! may read global settings and the quiet-hours verdict), then a base default.
//! Malformed numeric values never fail resolution; they fall back to the
//! default the field would otherwise have had.

use echotrace_core::payload::{AccessibilitySettings, AudioSettings, RuntimePayload};
use serde_json::Value;

use super::profiles::Settings;

/// Bounds for `mobility_buffer_ms`.
pub const MOBILITY_BUFFER_RANGE: (i64, i64) = (0, 60_000);
/// Base `mobility_buffer_ms` when neither override nor global sets one.
pub const DEFAULT_MOBILITY_BUFFER_MS: i64 = 800;
/// Bounds for `repeat`.
pub const REPEAT_RANGE: (i64, i64) = (0, 2);
/// Bounds for `pace`.
pub const PACE_RANGE: (f64, f64) = (0.85, 1.15);
/// Default pace when the installation runs sensory friendly.
pub const SENSORY_FRIENDLY_PACE: f64 = 0.9;
/// Base volume.
pub const DEFAULT_VOLUME: f64 = 0.7;
/// Volume ceiling for sensory-friendly operation.
pub const SENSORY_FRIENDLY_VOLUME_CAP: f64 = 0.55;
/// Volume ceiling during quiet hours.
pub const QUIET_HOURS_VOLUME_CAP: f64 = 0.45;

/// Resolves the runtime payload for one node.
///
/// This is a pure function of its inputs.
#[must_use]
pub fn resolve(global: &Settings, node_override: &Settings, quiet_active: bool) -> RuntimePayload {
    let sensory_friendly = explicit(global, "sensory_friendly").is_some_and(truthy);

    let captions = explicit(node_override, "captions")
        .or_else(|| explicit(global, "captions"))
        .is_some_and(truthy);
    let visual_pulse = explicit(node_override, "visual_pulse").is_some_and(truthy);
    let proximity_glow = explicit(node_override, "proximity_glow").map_or(!quiet_active, truthy);
    let safety_limiter = explicit(node_override, "safety_limiter")
        .or_else(|| explicit(global, "safety_limiter"))
        .is_none_or(truthy);

    let default_buffer = clamped_int(explicit(global, "mobility_buffer_ms"), MOBILITY_BUFFER_RANGE)
        .unwrap_or(DEFAULT_MOBILITY_BUFFER_MS);
    let mobility_buffer_ms =
        clamped_int(explicit(node_override, "mobility_buffer_ms"), MOBILITY_BUFFER_RANGE)
            .unwrap_or(default_buffer);
    let repeat = clamped_int(explicit(node_override, "repeat"), REPEAT_RANGE).unwrap_or(0);

    let base_pace = if sensory_friendly {
        SENSORY_FRIENDLY_PACE
    } else {
        1.0
    };
    let pace = clamped_float(explicit(node_override, "pace"), PACE_RANGE).unwrap_or(base_pace);

    let volume = clamped_float(explicit(node_override, "volume"), (0.0, 1.0))
        .unwrap_or_else(|| default_volume(sensory_friendly, quiet_active));

    RuntimePayload {
        audio: AudioSettings { volume },
        accessibility: AccessibilitySettings {
            captions,
            visual_pulse,
            proximity_glow,
            mobility_buffer_ms: to_u32(mobility_buffer_ms),
            repeat: to_u32(repeat),
            pace,
            safety_limiter,
        },
    }
}

fn default_volume(sensory_friendly: bool, quiet_active: bool) -> f64 {
    let mut volume = DEFAULT_VOLUME;
    if sensory_friendly {
        volume = volume.min(SENSORY_FRIENDLY_VOLUME_CAP);
    }
    if quiet_active {
        volume = volume.min(QUIET_HOURS_VOLUME_CAP);
    }
    volume.clamp(0.0, 1.0)
}

/// Returns the value for `key` unless it is absent or null.
fn explicit<'a>(settings: &'a Settings, key: &str) -> Option<&'a Value> {
    settings.get(key).filter(|value| !value.is_null())
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(flag) => Some(i64::from(*flag)),
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|n| n.trunc() as i64)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn as_float(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Bool(flag) => Some(f64::from(u8::from(*flag))),
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }?;
    (!number.is_nan()).then_some(number)
}

fn clamped_int(value: Option<&Value>, (min, max): (i64, i64)) -> Option<i64> {
    value.and_then(as_int).map(|n| n.clamp(min, max))
}

fn clamped_float(value: Option<&Value>, (min, max): (f64, f64)) -> Option<f64> {
    value.and_then(as_float).map(|n| n.clamp(min, max))
}

fn to_u32(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(0)
}
