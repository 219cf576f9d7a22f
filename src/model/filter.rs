//! Active facet constraints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One `(field, value)` constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterCriterion {
    /// Entity field, e.g. `platform`.
    pub field: String,
    /// Required value of the field.
    pub value: String,
}

impl FilterCriterion {
    /// Criterion matching `field` equal to `value`.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for FilterCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field, self.value)
    }
}

/// Error parsing a `field=value` criterion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidFilter {
    /// No `=` in the input.
    #[error("Filter must be written as field=value, got: {0}")]
    MissingSeparator(String),
    /// Nothing before the `=`.
    #[error("Filter field is empty in: {0}")]
    EmptyField(String),
    /// Nothing after the `=`.
    #[error("Filter value is empty in: {0}")]
    EmptyValue(String),
}

impl FromStr for FilterCriterion {
    type Err = InvalidFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| InvalidFilter::MissingSeparator(s.to_string()))?;
        let field = field.trim();
        let value = value.trim();
        if field.is_empty() {
            return Err(InvalidFilter::EmptyField(s.to_string()));
        }
        if value.is_empty() {
            return Err(InvalidFilter::EmptyValue(s.to_string()));
        }
        Ok(Self::new(field, value))
    }
}

/// The ordered set of active facet constraints.
///
/// Owned by the coordinator and handed to views read-only. Changes produce
/// a new selection; there is no in-place mutation API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSelection(Vec<FilterCriterion>);

impl FilterSelection {
    /// Selection holding `criteria` in order.
    pub fn new(criteria: Vec<FilterCriterion>) -> Self {
        Self(criteria)
    }

    /// Selection with no criteria.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether no criteria are selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of selected criteria.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Criteria in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &FilterCriterion> {
        self.0.iter()
    }

    /// Criteria as a slice.
    pub fn as_slice(&self) -> &[FilterCriterion] {
        &self.0
    }

    /// Whether `field=value` is selected.
    pub fn contains(&self, field: &str, value: &str) -> bool {
        self.0.iter().any(|c| c.field == field && c.value == value)
    }

    /// Values selected for `field`, in selection order.
    pub fn values_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |c| c.field == field)
            .map(|c| c.value.as_str())
    }

    /// Returns a new selection with `(field, value)` added if absent or removed if present.
    ///
    /// Order of the remaining criteria is preserved; additions go last.
    pub fn toggled(&self, field: &str, value: &str) -> Self {
        if self.contains(field, value) {
            Self(
                self.0
                    .iter()
                    .filter(|c| !(c.field == field && c.value == value))
                    .cloned()
                    .collect(),
            )
        } else {
            let mut next = self.0.clone();
            next.push(FilterCriterion::new(field, value));
            Self(next)
        }
    }
}

impl From<Vec<FilterCriterion>> for FilterSelection {
    fn from(criteria: Vec<FilterCriterion>) -> Self {
        Self(criteria)
    }
}

impl FromIterator<FilterCriterion> for FilterSelection {
    fn from_iter<T: IntoIterator<Item = FilterCriterion>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FilterSelection {
    type Item = &'a FilterCriterion;
    type IntoIter = std::slice::Iter<'a, FilterCriterion>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_value() {
        let criterion: FilterCriterion = "platform=mysql".parse().unwrap();
        assert_eq!(criterion, FilterCriterion::new("platform", "mysql"));
    }

    #[test]
    fn rejects_missing_separator() {
        assert_eq!(
            "platform".parse::<FilterCriterion>(),
            Err(InvalidFilter::MissingSeparator("platform".to_string()))
        );
    }

    #[test]
    fn rejects_empty_parts() {
        assert!(matches!(
            "=mysql".parse::<FilterCriterion>(),
            Err(InvalidFilter::EmptyField(_))
        ));
        assert!(matches!(
            "platform=".parse::<FilterCriterion>(),
            Err(InvalidFilter::EmptyValue(_))
        ));
    }

    #[test]
    fn toggled_adds_missing_criterion_at_end() {
        let selection = FilterSelection::new(vec![FilterCriterion::new("type", "dataset")]);
        let next = selection.toggled("platform", "mysql");
        assert_eq!(
            next.as_slice(),
            &[
                FilterCriterion::new("type", "dataset"),
                FilterCriterion::new("platform", "mysql"),
            ]
        );
        // Original untouched
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn toggled_removes_present_criterion() {
        let selection = FilterSelection::new(vec![
            FilterCriterion::new("type", "dataset"),
            FilterCriterion::new("platform", "mysql"),
            FilterCriterion::new("platform", "kafka"),
        ]);
        let next = selection.toggled("platform", "mysql");
        assert_eq!(
            next.as_slice(),
            &[
                FilterCriterion::new("type", "dataset"),
                FilterCriterion::new("platform", "kafka"),
            ]
        );
    }

    #[test]
    fn values_for_field() {
        let selection = FilterSelection::new(vec![
            FilterCriterion::new("platform", "mysql"),
            FilterCriterion::new("type", "dataset"),
            FilterCriterion::new("platform", "kafka"),
        ]);
        let values: Vec<_> = selection.values_for("platform").collect();
        assert_eq!(values, vec!["mysql", "kafka"]);
    }

    #[test]
    fn serializes_as_plain_array() {
        let selection = FilterSelection::new(vec![FilterCriterion::new("platform", "mysql")]);
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"[{"field":"platform","value":"mysql"}]"#);
    }
}
