//! Quiet-hours evaluation.
//!
//! A `quiet_hours` value is null, a single `"HH:MM-HH:MM"` string, or a list
//! of them. Each window is half-open on the 24-hour clock and wraps past
//! midnight when its start is later than its end.

use chrono::NaiveTime;
use echotrace_core::error::DomainError;
use serde_json::Value;

/// A daily window during which sensory output is dampened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuietWindow {
    /// Inclusive start.
    pub start: NaiveTime,
    /// Exclusive end.
    pub end: NaiveTime,
}

impl QuietWindow {
    /// Returns `true` if `now` falls inside the window.
    #[must_use]
    pub fn contains(&self, now: NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= now && now < self.end
        } else {
            now >= self.start || now < self.end
        }
    }
}

/// Parses one `"HH:MM-HH:MM"` window. Returns `None` for anything malformed.
#[must_use]
pub fn parse_window(text: &str) -> Option<QuietWindow> {
    let (start, end) = text.trim().split_once('-')?;
    Some(QuietWindow {
        start: parse_time(start)?,
        end: parse_time(end)?,
    })
}

fn parse_time(token: &str) -> Option<NaiveTime> {
    let (hours, minutes) = token.trim().split_once(':')?;
    let hour: u32 = hours.trim().parse().ok()?;
    let minute: u32 = minutes.trim().parse().ok()?;
    if hour >= 24 || minute >= 60 {
        return None;
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Flattens a raw `quiet_hours` value into its non-blank entries.
fn entries(raw: Option<&Value>) -> Result<Vec<String>, DomainError> {
    let candidates = match raw {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::String(entry)) => vec![entry.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(entry) => entry.clone(),
                other => other.to_string(),
            })
            .collect(),
        Some(Value::Object(_)) => {
            return Err(DomainError::Validation(
                "quiet_hours must be a list of HH:MM-HH:MM strings".to_owned(),
            ));
        }
        Some(_) => {
            return Err(DomainError::Validation(
                "quiet_hours must be provided as a string or list".to_owned(),
            ));
        }
    };
    Ok(candidates
        .into_iter()
        .map(|entry| entry.trim().to_owned())
        .filter(|entry| !entry.is_empty())
        .collect())
}

/// Validates a raw `quiet_hours` value.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the value is neither null, a string
/// nor a list, and `DomainError::InvalidQuietHours` carrying every entry that
/// fails to parse.
pub fn validate(raw: Option<&Value>) -> Result<(), DomainError> {
    let invalid: Vec<String> = entries(raw)?
        .into_iter()
        .filter(|entry| parse_window(entry).is_none())
        .collect();
    if invalid.is_empty() {
        Ok(())
    } else {
        Err(DomainError::InvalidQuietHours(invalid))
    }
}

/// Returns every window in `raw` that parses. Wrong-typed values and invalid
/// entries are skipped.
#[must_use]
pub fn windows(raw: Option<&Value>) -> Vec<QuietWindow> {
    entries(raw)
        .unwrap_or_default()
        .iter()
        .filter_map(|entry| parse_window(entry))
        .collect()
}

/// Returns `true` if `now` falls inside any configured window.
#[must_use]
pub fn is_active(raw: Option<&Value>, now: NaiveTime) -> bool {
    windows(raw).iter().any(|window| window.contains(now))
}
