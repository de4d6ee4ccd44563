//! Test repositories: mock `ProfileRepository` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use echotrace_accessibility::domain::profiles::ProfileDocument;
use echotrace_accessibility::domain::repository::ProfileRepository;
use echotrace_core::error::DomainError;

/// A repository that keeps the document as YAML text in memory, so loads go
/// through the same parsing and validation as a real file.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    stored: Mutex<Option<String>>,
    saves: Mutex<usize>,
}

impl InMemoryProfileRepository {
    /// Creates a repository with nothing persisted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository whose persisted document is `yaml`.
    #[must_use]
    pub fn with_yaml(yaml: &str) -> Self {
        Self {
            stored: Mutex::new(Some(yaml.to_owned())),
            saves: Mutex::new(0),
        }
    }

    /// Returns the persisted YAML, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stored_yaml(&self) -> Option<String> {
        self.stored.lock().unwrap().clone()
    }

    /// Returns the number of successful saves.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn load(&self) -> Result<ProfileDocument, DomainError> {
        match self.stored.lock().unwrap().as_deref() {
            Some(yaml) => ProfileDocument::from_yaml(yaml),
            None => Ok(ProfileDocument::new()),
        }
    }

    async fn save(&self, document: &ProfileDocument) -> Result<(), DomainError> {
        let yaml = document.to_yaml()?;
        *self.stored.lock().unwrap() = Some(yaml);
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

/// A repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingProfileRepository;

#[async_trait]
impl ProfileRepository for FailingProfileRepository {
    async fn load(&self) -> Result<ProfileDocument, DomainError> {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }

    async fn save(&self, _document: &ProfileDocument) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }
}
