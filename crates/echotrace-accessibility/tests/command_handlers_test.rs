//! Tests for the accessibility command and query handlers.

use echotrace_accessibility::application::command_handlers::{
    handle_configure_global, handle_set_node_override,
};
use echotrace_accessibility::application::query_handlers::{get_profiles, get_runtime_payloads};
use echotrace_accessibility::domain::commands::{ConfigureGlobal, SetNodeOverride};
use echotrace_accessibility::domain::profiles::Settings;
use echotrace_core::error::DomainError;
use echotrace_test_support::{FailingProfileRepository, FixedClock, InMemoryProfileRepository};
use serde_json::json;
use uuid::Uuid;

const PROFILES: &str = "\
global:
  captions: false
  sensory_friendly: false
  quiet_hours:
    - 08:00-09:00
presets:
  hard_of_hearing:
    captions: true
  calm:
    sensory_friendly: true
per_node_overrides:
  object2:
    volume: 0.9
";

fn nodes() -> Vec<String> {
    vec!["object1".to_owned(), "object2".to_owned()]
}

fn settings(value: serde_json::Value) -> Settings {
    serde_json::from_value(value).unwrap()
}

fn configure(preset_name: Option<&str>, patch: Option<serde_json::Value>) -> ConfigureGlobal {
    ConfigureGlobal {
        correlation_id: Uuid::new_v4(),
        preset_name: preset_name.map(str::to_owned),
        settings: patch.map(settings),
    }
}

#[tokio::test]
async fn test_apply_preset_persists_and_returns_payloads_for_all_nodes() {
    // Arrange
    let repo = InMemoryProfileRepository::with_yaml(PROFILES);
    let clock = FixedClock::at(12, 0);
    let command = configure(Some("hard_of_hearing"), None);

    // Act
    let payloads = handle_configure_global(&command, &nodes(), &clock, &repo)
        .await
        .unwrap();

    // Assert
    assert_eq!(payloads.len(), 2);
    assert!(payloads["object1"].accessibility.captions);
    assert!((payloads["object2"].audio.volume - 0.9).abs() < f64::EPSILON);
    assert_eq!(repo.save_count(), 1);
    let view = get_profiles(&repo).await.unwrap();
    assert_eq!(view.global.get("captions"), Some(&json!(true)));
}

#[tokio::test]
async fn test_apply_unknown_preset_is_not_found_and_not_saved() {
    // Arrange
    let repo = InMemoryProfileRepository::with_yaml(PROFILES);
    let clock = FixedClock::at(12, 0);
    let command = configure(Some("missing"), None);

    // Act
    let result = handle_configure_global(&command, &nodes(), &clock, &repo).await;

    // Assert
    assert!(matches!(result, Err(DomainError::NotFound(_))));
    assert_eq!(repo.save_count(), 0);
}

#[tokio::test]
async fn test_preset_and_patch_are_saved_together() {
    // Arrange
    let repo = InMemoryProfileRepository::with_yaml(PROFILES);
    let command = configure(
        Some("hard_of_hearing"),
        Some(json!({"sensory_friendly": true, "captions": false})),
    );

    // Act
    let payloads = handle_configure_global(&command, &nodes(), &FixedClock::at(12, 0), &repo)
        .await
        .unwrap();

    // Assert
    assert_eq!(repo.save_count(), 1);
    assert!(!payloads["object1"].accessibility.captions);
    assert!((payloads["object1"].accessibility.pace - 0.9).abs() < f64::EPSILON);
    let view = get_profiles(&repo).await.unwrap();
    assert_eq!(view.global.get("captions"), Some(&json!(false)));
    assert_eq!(view.global.get("sensory_friendly"), Some(&json!(true)));
}

#[tokio::test]
async fn test_unknown_preset_discards_patch_in_same_command() {
    // Arrange
    let repo = InMemoryProfileRepository::with_yaml(PROFILES);
    let command = configure(Some("missing"), Some(json!({"sensory_friendly": true})));

    // Act
    let result = handle_configure_global(&command, &nodes(), &FixedClock::at(12, 0), &repo).await;

    // Assert
    assert!(matches!(result, Err(DomainError::NotFound(_))));
    assert_eq!(repo.save_count(), 0);
    let view = get_profiles(&repo).await.unwrap();
    assert_eq!(view.global.get("sensory_friendly"), Some(&json!(false)));
}

#[tokio::test]
async fn test_invalid_patch_is_reported_before_unknown_preset() {
    let repo = InMemoryProfileRepository::with_yaml(PROFILES);
    let command = configure(Some("missing"), Some(json!({"quiet_hours": "25:00-26:00"})));

    let result = handle_configure_global(&command, &nodes(), &FixedClock::at(12, 0), &repo).await;

    assert!(matches!(result, Err(DomainError::InvalidQuietHours(_))));
    assert_eq!(repo.save_count(), 0);
}

#[tokio::test]
async fn test_configure_global_requires_preset_or_patch() {
    let repo = InMemoryProfileRepository::with_yaml(PROFILES);

    let result =
        handle_configure_global(&configure(None, None), &nodes(), &FixedClock::at(12, 0), &repo)
            .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert_eq!(repo.save_count(), 0);
}

#[tokio::test]
async fn test_payloads_reflect_quiet_hours_at_clock_time() {
    // Arrange
    let repo = InMemoryProfileRepository::with_yaml(PROFILES);

    // Act
    let quiet = get_runtime_payloads(&nodes(), &FixedClock::at(8, 30), &repo)
        .await
        .unwrap();
    let daytime = get_runtime_payloads(&nodes(), &FixedClock::at(9, 0), &repo)
        .await
        .unwrap();

    // Assert
    assert!(quiet["object1"].audio.volume <= 0.45);
    assert!(!quiet["object1"].accessibility.proximity_glow);
    assert!((quiet["object2"].audio.volume - 0.9).abs() < f64::EPSILON);
    assert!((daytime["object1"].audio.volume - 0.7).abs() < f64::EPSILON);
    assert!(daytime["object1"].accessibility.proximity_glow);
}

#[tokio::test]
async fn test_update_global_rejects_invalid_quiet_hours_without_saving() {
    // Arrange
    let repo = InMemoryProfileRepository::with_yaml(PROFILES);
    let command = configure(None, Some(json!({"quiet_hours": ["invalid"]})));

    // Act
    let result = handle_configure_global(&command, &nodes(), &FixedClock::at(12, 0), &repo).await;

    // Assert
    match result {
        Err(DomainError::InvalidQuietHours(entries)) => assert_eq!(entries, vec!["invalid"]),
        other => panic!("expected InvalidQuietHours, got {other:?}"),
    }
    assert_eq!(repo.save_count(), 0);
}

#[tokio::test]
async fn test_set_node_override_returns_only_that_node() {
    // Arrange
    let repo = InMemoryProfileRepository::with_yaml(PROFILES);
    let command = SetNodeOverride {
        correlation_id: Uuid::new_v4(),
        node_id: "object1".to_owned(),
        overrides: settings(json!({"visual_pulse": true, "repeat": 1, "pace": 0.95})),
    };

    // Act
    let payloads = handle_set_node_override(&command, &FixedClock::at(12, 0), &repo)
        .await
        .unwrap();

    // Assert
    assert_eq!(payloads.len(), 1);
    let payload = &payloads["object1"];
    assert!(payload.accessibility.visual_pulse);
    assert_eq!(payload.accessibility.repeat, 1);
    let stored = repo.stored_yaml().unwrap();
    assert!(stored.contains("visual_pulse: true"));
}

#[tokio::test]
async fn test_clearing_an_override_removes_the_entry() {
    // Arrange
    let repo = InMemoryProfileRepository::with_yaml(PROFILES);
    let command = SetNodeOverride {
        correlation_id: Uuid::new_v4(),
        node_id: "object2".to_owned(),
        overrides: settings(json!({"volume": null})),
    };

    // Act
    let payloads = handle_set_node_override(&command, &FixedClock::at(12, 0), &repo)
        .await
        .unwrap();

    // Assert
    assert!((payloads["object2"].audio.volume - 0.7).abs() < f64::EPSILON);
    let view = get_profiles(&repo).await.unwrap();
    assert!(view.per_node_overrides.is_empty());
    assert_eq!(view.presets, vec!["calm", "hard_of_hearing"]);
}

#[tokio::test]
async fn test_broken_persisted_document_surfaces_validation_error() {
    // Arrange
    let repo = InMemoryProfileRepository::with_yaml("global:\n  quiet_hours:\n    - invalid\n");

    // Act
    let result = get_runtime_payloads(&nodes(), &FixedClock::at(12, 0), &repo).await;

    // Assert
    assert!(matches!(result, Err(DomainError::InvalidQuietHours(_))));
}

#[tokio::test]
async fn test_repository_failure_propagates() {
    let command = configure(Some("calm"), None);

    let result = handle_configure_global(
        &command,
        &nodes(),
        &FixedClock::at(12, 0),
        &FailingProfileRepository,
    )
    .await;

    assert!(matches!(result, Err(DomainError::Infrastructure(_))));
}
