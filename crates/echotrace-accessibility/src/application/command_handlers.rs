//! Command handlers for the accessibility context.
//!
//! Each handler loads the profile document, applies one change, persists the
//! result and returns the payloads to push to the affected nodes. A change
//! that fails validation is never persisted.

use echotrace_core::clock::Clock;
use echotrace_core::error::DomainError;
use tracing::info;

use crate::domain::commands::{ConfigureGlobal, SetNodeOverride};
use crate::domain::profiles::{PayloadSet, Settings};
use crate::domain::quiet_hours;
use crate::domain::repository::ProfileRepository;

/// Handles the `ConfigureGlobal` command. Every node in `node_ids` is
/// affected.
///
/// The preset and the patch are applied to one loaded document and saved
/// together, so either both land or neither does.
///
/// # Errors
///
/// Returns a validation error when the command carries neither a preset nor
/// a patch, or when the patch carries bad `quiet_hours`.
/// Returns `DomainError::NotFound` for an unknown preset, or the repository's
/// error if loading or saving fails.
pub async fn handle_configure_global(
    command: &ConfigureGlobal,
    node_ids: &[String],
    clock: &dyn Clock,
    repo: &dyn ProfileRepository,
) -> Result<PayloadSet, DomainError> {
    if command.preset_name.is_none() && command.settings.is_none() {
        return Err(DomainError::Validation("preset_name or global is required".to_owned()));
    }
    // A bad patch is reported ahead of an unknown preset.
    if let Some(settings) = &command.settings {
        quiet_hours::validate(settings.get("quiet_hours"))?;
    }

    let mut document = repo.load().await?;
    if let Some(preset_name) = &command.preset_name {
        document.apply_preset(preset_name)?;
    }
    if let Some(settings) = &command.settings {
        document.update_global(settings.clone())?;
    }
    repo.save(&document).await?;

    info!(
        correlation_id = %command.correlation_id,
        preset = ?command.preset_name,
        fields = command.settings.as_ref().map_or(0, Settings::len),
        "configured global accessibility settings"
    );

    Ok(document.derive_payloads(node_ids, clock.time_of_day()))
}

/// Handles the `SetNodeOverride` command. Only the named node is affected.
///
/// # Errors
///
/// Returns a validation error for bad `quiet_hours`, or the repository's
/// error if loading or saving fails.
pub async fn handle_set_node_override(
    command: &SetNodeOverride,
    clock: &dyn Clock,
    repo: &dyn ProfileRepository,
) -> Result<PayloadSet, DomainError> {
    let mut document = repo.load().await?;
    document.set_override(&command.node_id, command.overrides.clone())?;
    repo.save(&document).await?;

    info!(
        correlation_id = %command.correlation_id,
        node_id = %command.node_id,
        cleared = document.node_override(&command.node_id).is_none(),
        "set per-node accessibility override"
    );

    Ok(document.derive_payloads([command.node_id.as_str()], clock.time_of_day()))
}
