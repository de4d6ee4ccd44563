//! The persisted accessibility profile document.

use std::collections::BTreeMap;

use chrono::NaiveTime;
use echotrace_core::error::DomainError;
use echotrace_core::payload::RuntimePayload;
use serde_json::{Map, Value};

use super::{quiet_hours, resolver};

/// Flat settings mapping. Ordered so that saved documents diff cleanly.
pub type Settings = BTreeMap<String, Value>;

/// Payloads keyed by node identifier.
pub type PayloadSet = BTreeMap<String, RuntimePayload>;

const GLOBAL: &str = "global";
const PRESETS: &str = "presets";
const PER_NODE_OVERRIDES: &str = "per_node_overrides";
const QUIET_HOURS: &str = "quiet_hours";

/// Global settings, named presets and per-node overrides.
///
/// Every `quiet_hours` value held by a document has passed validation. The
/// document is only changed through the methods below.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDocument {
    global: Settings,
    presets: BTreeMap<String, Settings>,
    per_node_overrides: BTreeMap<String, Settings>,
    /// Unrecognised top-level keys, preserved across a save.
    extra: Settings,
}

impl ProfileDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a YAML document. Empty input yields an empty document.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the text is not YAML or does not
    /// have the expected shape, and `DomainError::InvalidQuietHours` if any
    /// `quiet_hours` entry is malformed.
    pub fn from_yaml(text: &str) -> Result<Self, DomainError> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        let value: Value = serde_yaml::from_str(text).map_err(|e| {
            DomainError::Validation(format!("accessibility profiles are not valid YAML: {e}"))
        })?;
        Self::from_value(value)
    }

    /// Builds a document from an already-parsed value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the top level or any container is
    /// not a mapping, and `DomainError::InvalidQuietHours` listing every
    /// malformed `quiet_hours` entry across the whole document.
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        let mut root = match value {
            Value::Null => return Ok(Self::new()),
            Value::Object(root) => root,
            _ => {
                return Err(DomainError::Validation(
                    "accessibility profiles file must contain a mapping".to_owned(),
                ));
            }
        };

        let global = settings_from(root.remove(GLOBAL), GLOBAL)?;
        let presets = named_settings_from(root.remove(PRESETS), PRESETS)?;
        let per_node_overrides =
            named_settings_from(root.remove(PER_NODE_OVERRIDES), PER_NODE_OVERRIDES)?;

        let document = Self {
            global,
            presets,
            per_node_overrides,
            extra: root.into_iter().collect(),
        };
        document.validate()?;
        Ok(document)
    }

    /// Serializes the document as YAML with sorted keys.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, DomainError> {
        serde_yaml::to_string(&self.to_value())
            .map_err(|e| DomainError::Infrastructure(format!("profile serialization failed: {e}")))
    }

    /// Returns the document as a single value with all three containers.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut root: Map<String, Value> = self.extra.clone().into_iter().collect();
        root.insert(GLOBAL.to_owned(), settings_value(&self.global));
        root.insert(PRESETS.to_owned(), named_settings_value(&self.presets));
        root.insert(
            PER_NODE_OVERRIDES.to_owned(),
            named_settings_value(&self.per_node_overrides),
        );
        Value::Object(root)
    }

    /// Global settings.
    #[must_use]
    pub fn global(&self) -> &Settings {
        &self.global
    }

    /// Named presets.
    #[must_use]
    pub fn presets(&self) -> &BTreeMap<String, Settings> {
        &self.presets
    }

    /// Per-node overrides.
    #[must_use]
    pub fn per_node_overrides(&self) -> &BTreeMap<String, Settings> {
        &self.per_node_overrides
    }

    /// The override stored for `node_id`, if any.
    #[must_use]
    pub fn node_override(&self, node_id: &str) -> Option<&Settings> {
        self.per_node_overrides.get(node_id)
    }

    /// Merges the named preset into the global settings. Preset fields replace
    /// same-named global fields; other global fields are left alone.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no preset has that name.
    pub fn apply_preset(&mut self, name: &str) -> Result<(), DomainError> {
        let preset = self
            .presets
            .get(name)
            .ok_or_else(|| DomainError::NotFound(format!("preset '{name}'")))?
            .clone();
        self.global.extend(preset);
        Ok(())
    }

    /// Merges `patch` into the global settings. A null value removes the key.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the patch carries bad `quiet_hours`; the
    /// document is left unchanged.
    pub fn update_global(&mut self, patch: Settings) -> Result<(), DomainError> {
        quiet_hours::validate(patch.get(QUIET_HOURS))?;
        for (key, value) in patch {
            if value.is_null() {
                self.global.remove(&key);
            } else {
                self.global.insert(key, value);
            }
        }
        Ok(())
    }

    /// Replaces the override for `node_id`.
    ///
    /// Null and empty-string fields are dropped first. If nothing remains the
    /// node's entry is removed; otherwise it is replaced wholesale.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the override carries bad `quiet_hours`;
    /// the document is left unchanged.
    pub fn set_override(&mut self, node_id: &str, overrides: Settings) -> Result<(), DomainError> {
        let normalised: Settings = overrides
            .into_iter()
            .filter(|(_, value)| !is_blank(value))
            .collect();
        quiet_hours::validate(normalised.get(QUIET_HOURS))?;
        if normalised.is_empty() {
            self.per_node_overrides.remove(node_id);
        } else {
            self.per_node_overrides.insert(node_id.to_owned(), normalised);
        }
        Ok(())
    }

    /// Derives one payload per node. The quiet-hours verdict is taken once for
    /// `now` and shared by every node.
    pub fn derive_payloads<I, S>(&self, node_ids: I, now: NaiveTime) -> PayloadSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let quiet_active = quiet_hours::is_active(self.global.get(QUIET_HOURS), now);
        let no_override = Settings::new();
        node_ids
            .into_iter()
            .map(|node_id| {
                let node_id = node_id.as_ref();
                let node_override = self.node_override(node_id).unwrap_or(&no_override);
                (
                    node_id.to_owned(),
                    resolver::resolve(&self.global, node_override, quiet_active),
                )
            })
            .collect()
    }

    /// Checks every `quiet_hours` value in the document, collecting all
    /// offending entries before failing.
    fn validate(&self) -> Result<(), DomainError> {
        let containers = std::iter::once(&self.global)
            .chain(self.presets.values())
            .chain(self.per_node_overrides.values());
        let mut invalid = Vec::new();
        for settings in containers {
            match quiet_hours::validate(settings.get(QUIET_HOURS)) {
                Ok(()) => {}
                Err(DomainError::InvalidQuietHours(entries)) => invalid.extend(entries),
                Err(other) => return Err(other),
            }
        }
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(DomainError::InvalidQuietHours(invalid))
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

fn settings_from(value: Option<Value>, label: &str) -> Result<Settings, DomainError> {
    match value {
        None | Some(Value::Null) => Ok(Settings::new()),
        Some(Value::Object(map)) => Ok(map.into_iter().collect()),
        Some(_) => Err(DomainError::Validation(format!(
            "{label} accessibility settings must be a mapping"
        ))),
    }
}

fn named_settings_from(
    value: Option<Value>,
    label: &str,
) -> Result<BTreeMap<String, Settings>, DomainError> {
    settings_from(value, label)?
        .into_iter()
        .map(|(name, entry)| {
            let settings = settings_from(Some(entry), &format!("{label}.{name}"))?;
            Ok((name, settings))
        })
        .collect()
}

fn settings_value(settings: &Settings) -> Value {
    Value::Object(settings.clone().into_iter().collect())
}

fn named_settings_value(named: &BTreeMap<String, Settings>) -> Value {
    Value::Object(
        named
            .iter()
            .map(|(name, settings)| (name.clone(), settings_value(settings)))
            .collect(),
    )
}
