//! Query handlers for the accessibility context.

use std::collections::BTreeMap;

use echotrace_core::clock::Clock;
use echotrace_core::error::DomainError;
use serde::Serialize;

use crate::domain::profiles::{PayloadSet, Settings};
use crate::domain::repository::ProfileRepository;

/// Read-only view of the profile document.
#[derive(Debug, Serialize)]
pub struct ProfilesView {
    /// Global settings.
    pub global: Settings,
    /// Names of the defined presets, sorted.
    pub presets: Vec<String>,
    /// Per-node overrides.
    pub per_node_overrides: BTreeMap<String, Settings>,
}

/// Returns the current profile document.
///
/// # Errors
///
/// Returns the repository's error if loading fails.
pub async fn get_profiles(repo: &dyn ProfileRepository) -> Result<ProfilesView, DomainError> {
    let document = repo.load().await?;
    Ok(ProfilesView {
        global: document.global().clone(),
        presets: document.presets().keys().cloned().collect(),
        per_node_overrides: document.per_node_overrides().clone(),
    })
}

/// Derives the current payload for every node in `node_ids`.
///
/// # Errors
///
/// Returns the repository's error if loading fails.
pub async fn get_runtime_payloads(
    node_ids: &[String],
    clock: &dyn Clock,
    repo: &dyn ProfileRepository,
) -> Result<PayloadSet, DomainError> {
    let document = repo.load().await?;
    Ok(document.derive_payloads(node_ids, clock.time_of_day()))
}
