//! YAML file implementation of the `ProfileRepository` trait.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use echotrace_accessibility::domain::profiles::ProfileDocument;
use echotrace_accessibility::domain::repository::ProfileRepository;
use echotrace_core::error::DomainError;
use tracing::debug;

/// Profile repository backed by a single YAML file.
#[derive(Debug, Clone)]
pub struct YamlProfileRepository {
    path: PathBuf,
}

impl YamlProfileRepository {
    /// Creates a repository reading and writing `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this repository reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, action: &str, err: &std::io::Error) -> DomainError {
        DomainError::Infrastructure(format!(
            "failed to {action} {}: {err}",
            self.path.display()
        ))
    }
}

#[async_trait]
impl ProfileRepository for YamlProfileRepository {
    async fn load(&self) -> Result<ProfileDocument, DomainError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no accessibility profiles yet; using defaults");
                return Ok(ProfileDocument::new());
            }
            Err(err) => return Err(self.io_error("read", &err)),
        };
        ProfileDocument::from_yaml(&text)
    }

    async fn save(&self, document: &ProfileDocument) -> Result<(), DomainError> {
        let yaml = document.to_yaml()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error("create directory for", &e))?;
        }
        tokio::fs::write(&self.path, yaml)
            .await
            .map_err(|e| self.io_error("write", &e))?;
        debug!(path = %self.path.display(), "saved accessibility profiles");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_load_missing_file_returns_empty_document() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let repo = YamlProfileRepository::new(dir.path().join("accessibility_profiles.yaml"));

        // Act
        let document = repo.load().await.unwrap();

        // Assert
        assert_eq!(document, ProfileDocument::new());
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_quiet_hours() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.yaml");
        std::fs::write(&path, "global:\n  quiet_hours:\n    - invalid\n").unwrap();
        let repo = YamlProfileRepository::new(&path);

        // Act
        let err = repo.load().await.unwrap_err();

        // Assert
        match err {
            DomainError::InvalidQuietHours(entries) => assert_eq!(entries, vec!["invalid"]),
            other => panic!("expected InvalidQuietHours, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_rejects_non_mapping_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.yaml");
        std::fs::write(&path, "just a string\n").unwrap();

        let err = YamlProfileRepository::new(&path).load().await.unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_save_creates_directories_and_round_trips() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let repo = YamlProfileRepository::new(dir.path().join("hub").join("profiles.yaml"));
        let mut document = ProfileDocument::new();
        document
            .set_override(
                "object1",
                serde_json::from_value(json!({"visual_pulse": true})).unwrap(),
            )
            .unwrap();

        // Act
        repo.save(&document).await.unwrap();
        let reloaded = repo.load().await.unwrap();

        // Assert
        assert_eq!(reloaded, document);
        let text = std::fs::read_to_string(repo.path()).unwrap();
        assert!(text.contains("per_node_overrides:"));
        assert!(text.contains("visual_pulse: true"));
    }

    #[tokio::test]
    async fn test_save_is_deterministic() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.yaml");
        std::fs::write(
            &path,
            "presets: {calm: {sensory_friendly: true}}\nglobal: {safety_limiter: true, captions: false}\n",
        )
        .unwrap();
        let repo = YamlProfileRepository::new(&path);
        let document = repo.load().await.unwrap();

        // Act
        repo.save(&document).await.unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        repo.save(&repo.load().await.unwrap()).await.unwrap();
        let second = std::fs::read_to_string(&path).unwrap();

        // Assert
        assert_eq!(first, second);
        assert!(first.find("captions").unwrap() < first.find("safety_limiter").unwrap());
    }
}
