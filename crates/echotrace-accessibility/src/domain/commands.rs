//! Commands for the accessibility context.

use uuid::Uuid;

use super::profiles::Settings;

/// Command to change the global settings: merge a named preset, then a
/// patch. At least one of the two is present.
#[derive(Debug, Clone)]
pub struct ConfigureGlobal {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The preset to apply first.
    pub preset_name: Option<String>,
    /// Fields to set after the preset; a null value removes the field.
    pub settings: Option<Settings>,
}

/// Command to replace the override for one node.
#[derive(Debug, Clone)]
pub struct SetNodeOverride {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The node whose override is replaced.
    pub node_id: String,
    /// The new override; blank fields are dropped.
    pub overrides: Settings,
}
