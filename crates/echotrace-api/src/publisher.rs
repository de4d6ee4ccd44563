//! Delivery of runtime payloads to nodes.

use async_trait::async_trait;
use echotrace_core::topics;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// Failure to deliver a configuration push.
#[derive(Debug, Error)]
pub enum PushError {
    /// The node or transport refused the push because another one is in
    /// flight.
    #[error("config push conflict: {0}")]
    Conflict(String),

    /// The transport could not deliver the push.
    #[error("config push failed: {0}")]
    Failed(String),
}

/// Transport seam for pushing configuration to a node.
#[async_trait]
pub trait ConfigPublisher: Send + Sync {
    /// Delivers `payload` to `node_id`.
    ///
    /// # Errors
    ///
    /// Returns `PushError` if the push is refused or cannot be delivered.
    async fn push(&self, node_id: &str, payload: &Value) -> Result<(), PushError>;
}

/// Publisher that records each push in the log against the node's config
/// address. Used when no transport is attached to the hub.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingConfigPublisher;

#[async_trait]
impl ConfigPublisher for LoggingConfigPublisher {
    async fn push(&self, node_id: &str, payload: &Value) -> Result<(), PushError> {
        info!(
            node_id,
            address = %topics::node_config(node_id),
            payload = %payload,
            "config push"
        );
        Ok(())
    }
}
