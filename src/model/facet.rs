//! Server-computed facet aggregations.

use serde::{Deserialize, Serialize};

/// A named aggregation used to build filter options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facet {
    /// Field the facet aggregates over (e.g. "platform").
    pub field: String,
    /// Human-readable label.
    pub display_name: String,
    /// Buckets in server order.
    #[serde(default)]
    pub aggregations: Vec<FacetBucket>,
}

/// A single facet value and its result count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetBucket {
    /// Field value this bucket counts.
    pub value: String,
    /// Matching results with this value.
    pub count: usize,
}

impl Facet {
    /// Empty facet for `field`.
    pub fn new(field: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            display_name: display_name.into(),
            aggregations: Vec::new(),
        }
    }

    /// Builder-style bucket append.
    pub fn with_bucket(mut self, value: impl Into<String>, count: usize) -> Self {
        self.aggregations.push(FacetBucket {
            value: value.into(),
            count,
        });
        self
    }
}

/// Default display label for a facet field.
pub fn display_name_for(field: &str) -> String {
    match field {
        "type" => "Type".to_string(),
        "platform" => "Platform".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}
