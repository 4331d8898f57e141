//! Caller-owned parser configuration.
//!
//! Everything here is supplied at construction and read-only afterwards. The
//! parser never reaches into ambient or global settings; a host application
//! that wants defaults applies them through [`ParserConfig::with_defaults`]
//! before construction.

use serde::{Deserialize, Serialize};

/// Property id of the tag extractor, for [`PropertyTrigger::property`].
pub const PROPERTY_TAGS: &str = "tags";
/// Property id of the status matcher, for [`PropertyTrigger::property`].
pub const PROPERTY_STATUS: &str = "status";

/// One configured status: the stored `value` and the user-facing `label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusConfig {
    pub value: String,
    pub label: String,
}

/// A literal prefix that marks a property's value in free text (e.g. `#` for
/// tags). `property` is [`PROPERTY_TAGS`], [`PROPERTY_STATUS`], or a user
/// field id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyTrigger {
    pub property: String,
    pub trigger: String,
    pub enabled: bool,
}

/// Value shape of a user-mapped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Boolean,
    List,
}

/// A user-defined field the extractor may populate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserField {
    /// Stable identifier, used as the key in the parsed record.
    pub id: String,
    /// Host-side storage key.
    pub key: String,
    pub kind: FieldKind,
    pub display_name: String,
}

/// Full configuration for one parser instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Configured status vocabulary. When non-empty this fully replaces the
    /// fallback open/done synonym matching.
    pub statuses: Vec<StatusConfig>,
    /// Per-property triggers.
    pub triggers: Vec<PropertyTrigger>,
    /// User-mapped field table.
    pub user_fields: Vec<UserField>,
    /// Whether an implicit (untriggered) date found in text becomes the due
    /// date.
    pub default_to_due: bool,
}

impl ParserConfig {
    /// An empty configuration with the stock triggers applied: `#` for tags
    /// and implicit dates assigned as due dates.
    pub fn with_defaults() -> Self {
        ParserConfig {
            statuses: Vec::new(),
            triggers: vec![PropertyTrigger {
                property: PROPERTY_TAGS.into(),
                trigger: "#".into(),
                enabled: true,
            }],
            user_fields: Vec::new(),
            default_to_due: true,
        }
    }

    /// The enabled, non-empty trigger for `property`, if any.
    pub(crate) fn trigger_for(&self, property: &str) -> Option<&str> {
        self.triggers
            .iter()
            .find(|t| t.enabled && t.property == property && !t.trigger.is_empty())
            .map(|t| t.trigger.as_str())
    }

    pub(crate) fn field(&self, id: &str) -> Option<&UserField> {
        self.user_fields.iter().find(|f| f.id == id)
    }
}
