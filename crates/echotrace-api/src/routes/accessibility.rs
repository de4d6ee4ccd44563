//! Routes for accessibility profiles and configuration pushes.
//!
//! Every mutation persists the profile document, derives runtime payloads for
//! the affected nodes and pushes them before responding.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use echotrace_accessibility::application::command_handlers;
use echotrace_accessibility::application::query_handlers::{self, ProfilesView};
use echotrace_accessibility::domain::commands::{ConfigureGlobal, SetNodeOverride};
use echotrace_accessibility::domain::profiles::{PayloadSet, Settings};
use echotrace_core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /apply-preset.
#[derive(Debug, Deserialize)]
pub struct ApplyPresetRequest {
    /// Preset merged into the global settings.
    #[serde(default)]
    pub preset_name: Option<String>,
    /// Patch merged into the global settings after the preset.
    #[serde(default)]
    pub global: Option<Settings>,
}

/// Request body for POST /accessibility/override.
#[derive(Debug, Deserialize)]
pub struct OverrideRequest {
    /// Node whose override is replaced.
    pub node_id: String,
    /// New override. Null and empty-string values are dropped.
    #[serde(default)]
    pub overrides: Settings,
}

/// Request body for POST /push-config.
#[derive(Debug, Deserialize)]
pub struct PushConfigRequest {
    /// Destination node.
    pub node_id: String,
    /// Payload forwarded as-is.
    pub payload: Value,
}

/// Response body for mutations that push configuration.
#[derive(Debug, Serialize)]
pub struct PushResponse {
    /// Always `true`.
    pub ok: bool,
    /// Nodes that received a push.
    pub push: Vec<String>,
}

/// POST /apply-preset
#[instrument(skip(state, request), fields(preset = ?request.preset_name))]
async fn apply_preset(
    State(state): State<AppState>,
    Json(request): Json<ApplyPresetRequest>,
) -> Result<Json<PushResponse>, ApiError> {
    let command = ConfigureGlobal {
        correlation_id: Uuid::new_v4(),
        preset_name: request.preset_name,
        settings: request.global,
    };
    info!(correlation_id = %command.correlation_id, "handling configure_global command");

    let _guard = state.profile_lock.lock().await;
    let payloads = command_handlers::handle_configure_global(
        &command,
        &state.nodes,
        state.clock.as_ref(),
        &*state.profiles,
    )
    .await?;

    let push = push_payloads(&state, &payloads).await?;
    Ok(Json(PushResponse { ok: true, push }))
}

/// POST /accessibility/override
#[instrument(skip(state, request), fields(node_id = %request.node_id))]
async fn set_override(
    State(state): State<AppState>,
    Json(request): Json<OverrideRequest>,
) -> Result<Json<PushResponse>, ApiError> {
    let node_id = required_node_id(&request.node_id)?;
    let command = SetNodeOverride {
        correlation_id: Uuid::new_v4(),
        node_id,
        overrides: request.overrides,
    };
    info!(correlation_id = %command.correlation_id, "handling set_node_override command");

    let _guard = state.profile_lock.lock().await;
    let payloads =
        command_handlers::handle_set_node_override(&command, state.clock.as_ref(), &*state.profiles)
            .await?;

    let push = push_payloads(&state, &payloads).await?;
    Ok(Json(PushResponse { ok: true, push }))
}

/// GET /accessibility/payloads
async fn get_payloads(State(state): State<AppState>) -> Result<Json<PayloadSet>, ApiError> {
    let payloads =
        query_handlers::get_runtime_payloads(&state.nodes, state.clock.as_ref(), &*state.profiles)
            .await?;
    Ok(Json(payloads))
}

/// GET /accessibility/profiles
async fn get_profiles(State(state): State<AppState>) -> Result<Json<ProfilesView>, ApiError> {
    let view = query_handlers::get_profiles(&*state.profiles).await?;
    Ok(Json(view))
}

/// POST /push-config
#[instrument(skip(state, request), fields(node_id = %request.node_id))]
async fn push_config(
    State(state): State<AppState>,
    Json(request): Json<PushConfigRequest>,
) -> Result<Json<PushResponse>, ApiError> {
    let node_id = required_node_id(&request.node_id)?;
    if !request.payload.is_object() {
        return Err(DomainError::Validation("payload must be a JSON object".to_owned()).into());
    }

    state.publisher.push(&node_id, &request.payload).await?;

    Ok(Json(PushResponse {
        ok: true,
        push: vec![node_id],
    }))
}

fn required_node_id(raw: &str) -> Result<String, ApiError> {
    let node_id = raw.trim();
    if node_id.is_empty() {
        return Err(DomainError::Validation("node_id must not be empty".to_owned()).into());
    }
    Ok(node_id.to_owned())
}

async fn push_payloads(state: &AppState, payloads: &PayloadSet) -> Result<Vec<String>, ApiError> {
    let mut pushed = Vec::with_capacity(payloads.len());
    for (node_id, payload) in payloads {
        let value = serde_json::to_value(payload).map_err(|e| {
            DomainError::Infrastructure(format!("failed to encode payload for {node_id}: {e}"))
        })?;
        state.publisher.push(node_id, &value).await?;
        pushed.push(node_id.clone());
    }
    Ok(pushed)
}

/// Returns the router for accessibility management.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/apply-preset", post(apply_preset))
        .route("/accessibility/override", post(set_override))
        .route("/accessibility/payloads", get(get_payloads))
        .route("/accessibility/profiles", get(get_profiles))
        .route("/push-config", post(push_config))
}
