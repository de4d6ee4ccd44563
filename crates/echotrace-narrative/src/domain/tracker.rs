//! Narrative unlock state machine.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, info};

/// Serializable view of the narrative state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrativeSnapshot {
    /// Whether the narrative has been unlocked.
    pub unlocked: bool,
    /// Triggered identifiers, sorted.
    pub triggered: Vec<String>,
}

#[derive(Debug, Default)]
struct NarrativeState {
    triggered: BTreeSet<String>,
    unlocked: bool,
}

/// Tracks distinct triggers and unlocks once `required_fragments` is reached.
///
/// Registration is atomic: concurrent callers never double-count a trigger
/// and exactly one of them observes the unlock transition.
#[derive(Debug)]
pub struct NarrativeTracker {
    required_fragments: usize,
    state: Mutex<NarrativeState>,
}

impl NarrativeTracker {
    /// Creates a locked tracker with no triggers.
    #[must_use]
    pub fn new(required_fragments: usize) -> Self {
        Self {
            required_fragments,
            state: Mutex::new(NarrativeState::default()),
        }
    }

    /// Number of distinct triggers needed to unlock.
    #[must_use]
    pub fn required_fragments(&self) -> usize {
        self.required_fragments
    }

    /// Records a trigger from `trigger_id`.
    ///
    /// Returns `true` when the trigger is newly recorded and `false` for a
    /// duplicate, which leaves the state untouched.
    pub fn register_trigger(&self, trigger_id: &str) -> bool {
        let mut state = self.lock();
        if !state.triggered.insert(trigger_id.to_owned()) {
            debug!(trigger_id, "duplicate trigger ignored");
            return false;
        }
        if !state.unlocked && state.triggered.len() >= self.required_fragments {
            state.unlocked = true;
            info!(
                trigger_id,
                fragments = state.triggered.len(),
                "narrative unlocked"
            );
        } else {
            debug!(trigger_id, fragments = state.triggered.len(), "trigger recorded");
        }
        true
    }

    /// Returns `true` once the narrative has unlocked.
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.lock().unlocked
    }

    /// Clears all triggers and relocks the narrative.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.triggered.clear();
        state.unlocked = false;
        info!("narrative state reset");
    }

    /// Returns the current state with triggers in sorted order.
    #[must_use]
    pub fn snapshot(&self) -> NarrativeSnapshot {
        let state = self.lock();
        NarrativeSnapshot {
            unlocked: state.unlocked,
            triggered: state.triggered.iter().cloned().collect(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, NarrativeState> {
        // Every mutation leaves the state consistent, so a poisoned lock is
        // still safe to read.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
