//! Search result entities.

use serde::{Deserialize, Serialize};

/// An entity returned by the search backend.
///
/// Opaque to the pager: only the result list reads its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique resource name.
    pub urn: String,
    /// Entity kind (e.g. "dataset", "dashboard").
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Display name.
    pub name: String,
    /// Source platform (e.g. "mysql", "kafka").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Entity {
    /// Value of a facetable field, if the entity has one.
    ///
    /// Known fields are `type` and `platform`; anything else yields `None`.
    pub fn field(&self, field: &str) -> Option<&str> {
        match field {
            "type" => Some(self.entity_type.as_str()),
            "platform" => self.platform.as_deref(),
            _ => None,
        }
    }

    /// Case-insensitive substring match against name, description and urn.
    ///
    /// `query_lower` must already be lowercased.
    pub fn matches_query(&self, query_lower: &str) -> bool {
        if query_lower.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(query_lower)
            || self.urn.to_lowercase().contains(query_lower)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(query_lower))
    }
}
