//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// One or more `quiet_hours` entries failed to parse.
    ///
    /// Carries every offending entry, not just the first.
    #[error("invalid quiet_hours entries (expected HH:MM-HH:MM): {}", .0.join(", "))]
    InvalidQuietHours(Vec<String>),

    /// A structural validation error (wrong-typed document or container).
    #[error("validation error: {0}")]
    Validation(String),

    /// A named entity (such as a preset) was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Returns `true` for errors caused by bad caller input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidQuietHours(_) | Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_quiet_hours_lists_every_entry() {
        let err = DomainError::InvalidQuietHours(vec!["invalid".into(), "25:00-26:00".into()]);

        assert_eq!(
            err.to_string(),
            "invalid quiet_hours entries (expected HH:MM-HH:MM): invalid, 25:00-26:00"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_not_found_is_not_a_validation_error() {
        assert!(!DomainError::NotFound("preset 'calm'".into()).is_validation());
    }
}
