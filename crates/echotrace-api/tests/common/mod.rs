//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use echotrace_accessibility::domain::repository::ProfileRepository;
use echotrace_api::publisher::{ConfigPublisher, PushError};
use echotrace_api::state::AppState;
use echotrace_narrative::NarrativeTracker;
use echotrace_test_support::{FixedClock, InMemoryProfileRepository};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Profile document shared by the accessibility tests.
pub const PROFILES: &str = "\
global:
  captions: false
  sensory_friendly: false
  safety_limiter: true
  quiet_hours:
    - 22:00-06:00
presets:
  hard_of_hearing:
    captions: true
    visual_pulse: true
  sensory_friendly:
    sensory_friendly: true
per_node_overrides: {}
";

/// Publisher double that records pushes, or refuses them all.
#[derive(Debug, Default)]
pub struct RecordingConfigPublisher {
    pushes: Mutex<Vec<(String, Value)>>,
    conflict: bool,
}

impl RecordingConfigPublisher {
    /// A publisher that refuses every push with a conflict.
    pub fn conflicting() -> Self {
        Self {
            pushes: Mutex::new(Vec::new()),
            conflict: true,
        }
    }

    /// Pushes received so far.
    pub fn pushes(&self) -> Vec<(String, Value)> {
        self.pushes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfigPublisher for RecordingConfigPublisher {
    async fn push(&self, node_id: &str, payload: &Value) -> Result<(), PushError> {
        if self.conflict {
            return Err(PushError::Conflict("already busy".to_owned()));
        }
        self.pushes
            .lock()
            .unwrap()
            .push((node_id.to_owned(), payload.clone()));
        Ok(())
    }
}

/// Everything a test needs to drive the hub and inspect its side effects.
pub struct TestHub {
    pub app: Router,
    pub publisher: Arc<RecordingConfigPublisher>,
    pub narrative: Arc<NarrativeTracker>,
}

/// Build the hub at noon over `profiles`, with nodes `object1` and `object2`
/// and a two-fragment narrative.
pub fn build_test_hub(profiles: Arc<dyn ProfileRepository>) -> TestHub {
    build_test_hub_with(profiles, Arc::new(RecordingConfigPublisher::default()), 12)
}

/// Build the hub with a specific publisher and hour of day.
pub fn build_test_hub_with(
    profiles: Arc<dyn ProfileRepository>,
    publisher: Arc<RecordingConfigPublisher>,
    hour: u32,
) -> TestHub {
    let narrative = Arc::new(NarrativeTracker::new(2));
    let state = AppState::new(
        Arc::new(FixedClock::at(hour, 0)),
        profiles,
        narrative.clone(),
        publisher.clone(),
        vec!["object1".to_owned(), "object2".to_owned()],
    );
    TestHub {
        app: echotrace_api::app(state),
        publisher,
        narrative,
    }
}

/// Build the hub over an in-memory copy of [`PROFILES`].
pub fn build_default_hub() -> (TestHub, Arc<InMemoryProfileRepository>) {
    let repo = Arc::new(InMemoryProfileRepository::with_yaml(PROFILES));
    (build_test_hub(repo.clone()), repo)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request with no body and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };

    (status, json)
}
