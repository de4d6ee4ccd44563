//! Transport addresses shared by the hub and the nodes.
//!
//! The transport itself lives outside this workspace; these are the fixed
//! publish/subscribe addresses it is configured with.

/// Prefix for every address.
pub const PREFIX: &str = "ECHOTRACE";

/// Address on which the hub broadcasts narrative state.
pub const HUB_STATE: &str = "ECHOTRACE/state/hub";

/// Subscription matching health reports from every node.
pub const HEALTH_WILDCARD: &str = "ECHOTRACE/health/+";

/// Subscription matching trigger reports from every node.
pub const TRIGGER_WILDCARD: &str = "ECHOTRACE/trigger/+";

/// Subscription matching acknowledgements from every node.
pub const ACK_WILDCARD: &str = "ECHOTRACE/ack/+";

/// Health reports published by `node_id`.
#[must_use]
pub fn health(node_id: &str) -> String {
    format!("{PREFIX}/health/{node_id}")
}

/// Trigger reports published by `node_id`.
#[must_use]
pub fn trigger(node_id: &str) -> String {
    format!("{PREFIX}/trigger/{node_id}")
}

/// Configuration pushed from the hub to `node_id`.
#[must_use]
pub fn node_config(node_id: &str) -> String {
    format!("{PREFIX}/config/{node_id}")
}

/// Acknowledgements published by `node_id`.
#[must_use]
pub fn node_ack(node_id: &str) -> String {
    format!("{PREFIX}/ack/{node_id}")
}
