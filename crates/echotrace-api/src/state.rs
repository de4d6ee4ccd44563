//! Shared application state.

use std::sync::Arc;

use echotrace_accessibility::domain::repository::ProfileRepository;
use echotrace_core::clock::Clock;
use echotrace_narrative::NarrativeTracker;
use tokio::sync::Mutex;

use crate::publisher::ConfigPublisher;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for quiet-hours evaluation.
    pub clock: Arc<dyn Clock>,
    /// Accessibility profile document store.
    pub profiles: Arc<dyn ProfileRepository>,
    /// Serializes load-modify-save cycles on the profile document.
    pub profile_lock: Arc<Mutex<()>>,
    /// Narrative unlock state.
    pub narrative: Arc<NarrativeTracker>,
    /// Delivers runtime payloads to nodes.
    pub publisher: Arc<dyn ConfigPublisher>,
    /// Nodes that receive runtime payloads.
    pub nodes: Arc<[String]>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        profiles: Arc<dyn ProfileRepository>,
        narrative: Arc<NarrativeTracker>,
        publisher: Arc<dyn ConfigPublisher>,
        nodes: Vec<String>,
    ) -> Self {
        Self {
            clock,
            profiles,
            profile_lock: Arc::new(Mutex::new(())),
            narrative,
            publisher,
            nodes: nodes.into(),
        }
    }
}
