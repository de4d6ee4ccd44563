//! Integration tests for narrative state routes.

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_state_starts_locked_and_empty() {
    let (hub, _repo) = common::build_default_hub();

    let (status, json) = common::get_json(hub.app, "/api/state").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"unlocked": false, "triggered": []}));
}

#[tokio::test]
async fn test_triggers_unlock_at_threshold_and_ignore_duplicates() {
    // Arrange
    let (hub, _repo) = common::build_default_hub();

    // Act
    let (_, first) =
        common::post_json(hub.app.clone(), "/api/trigger", &json!({"node_id": "object2"})).await;
    let (_, duplicate) =
        common::post_json(hub.app.clone(), "/api/trigger", &json!({"node_id": "object2"})).await;
    let (status, second) =
        common::post_json(hub.app.clone(), "/api/trigger", &json!({"node_id": "object1"})).await;

    // Assert
    assert_eq!(first["newly_recorded"], true);
    assert_eq!(first["unlocked"], false);
    assert_eq!(duplicate["newly_recorded"], false);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["unlocked"], true);
    assert_eq!(second["triggered"], json!(["object1", "object2"]));
    assert!(hub.narrative.is_unlocked());
}

#[tokio::test]
async fn test_reset_state_relocks_narrative() {
    // Arrange
    let (hub, _repo) = common::build_default_hub();
    hub.narrative.register_trigger("object1");
    hub.narrative.register_trigger("object2");

    // Act
    let (status, json) = common::post_empty(hub.app.clone(), "/api/reset-state").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ok"], true);
    let (_, state) = common::get_json(hub.app, "/api/state").await;
    assert_eq!(state, json!({"unlocked": false, "triggered": []}));
}

#[tokio::test]
async fn test_blank_trigger_node_is_rejected() {
    let (hub, _repo) = common::build_default_hub();

    let (status, json) =
        common::post_json(hub.app, "/api/trigger", &json!({"node_id": "  "})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
    assert!(hub.narrative.snapshot().triggered.is_empty());
}
