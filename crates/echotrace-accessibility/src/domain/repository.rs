//! Profile document repository abstraction.

use async_trait::async_trait;
use echotrace_core::error::DomainError;

use super::profiles::ProfileDocument;

/// Loads and saves the accessibility profile document.
///
/// Callers serialize load → mutate → save sequences against one document.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Loads the document, or an empty one if nothing has been persisted.
    async fn load(&self) -> Result<ProfileDocument, DomainError>;

    /// Persists the whole document.
    async fn save(&self, document: &ProfileDocument) -> Result<(), DomainError>;
}
