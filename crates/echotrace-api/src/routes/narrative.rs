//! Routes for narrative unlock state.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use echotrace_core::error::DomainError;
use echotrace_narrative::NarrativeSnapshot;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /trigger.
#[derive(Debug, Deserialize)]
pub struct TriggerRequest {
    /// Node that reported the trigger.
    pub node_id: String,
}

/// Response body for POST /trigger.
#[derive(Debug, Serialize)]
pub struct TriggerResponse {
    /// Whether this trigger had not been seen before.
    pub newly_recorded: bool,
    /// Whether the narrative is unlocked after this trigger.
    pub unlocked: bool,
    /// Triggered nodes, sorted.
    pub triggered: Vec<String>,
}

/// Acknowledgement body.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    /// Always `true`.
    pub ok: bool,
}

/// GET /state
async fn get_state(State(state): State<AppState>) -> Json<NarrativeSnapshot> {
    Json(state.narrative.snapshot())
}

/// POST /reset-state
#[instrument(skip(state))]
async fn reset_state(State(state): State<AppState>) -> Json<OkResponse> {
    state.narrative.reset();
    Json(OkResponse { ok: true })
}

/// POST /trigger
#[instrument(skip(state, request), fields(node_id = %request.node_id))]
async fn trigger(
    State(state): State<AppState>,
    Json(request): Json<TriggerRequest>,
) -> Result<Json<TriggerResponse>, ApiError> {
    let node_id = request.node_id.trim();
    if node_id.is_empty() {
        return Err(DomainError::Validation("node_id must not be empty".to_owned()).into());
    }

    let newly_recorded = state.narrative.register_trigger(node_id);
    let snapshot = state.narrative.snapshot();
    info!(newly_recorded, unlocked = snapshot.unlocked, "trigger handled");

    Ok(Json(TriggerResponse {
        newly_recorded,
        unlocked: snapshot.unlocked,
        triggered: snapshot.triggered,
    }))
}

/// Returns the router for narrative state.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/state", get(get_state))
        .route("/reset-state", post(reset_state))
        .route("/trigger", post(trigger))
}
