//! In-memory backend over a JSON dataset.

use super::{SearchBackend, SearchRequest};
use crate::model::facet::display_name_for;
use crate::model::{
    BackendError, Entity, Facet, FacetBucket, FilterSelection, InputError, ResultPage,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Facet fields computed when none are configured.
pub const DEFAULT_FACET_FIELDS: &[&str] = &["type", "platform"];

/// Accepted dataset file shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DatasetFile {
    List(Vec<Entity>),
    Wrapped { entities: Vec<Entity> },
}

impl From<DatasetFile> for Vec<Entity> {
    fn from(file: DatasetFile) -> Self {
        match file {
            DatasetFile::List(entities) | DatasetFile::Wrapped { entities } => entities,
        }
    }
}

/// Search backend holding every entity in memory.
///
/// Matching rules:
/// - Query: case-insensitive substring over name, description and urn
/// - Filters: values of the same field are ORed, distinct fields are ANDed
/// - Facet counts for a field ignore that field's own filters, so sibling
///   values stay selectable
#[derive(Debug, Clone)]
pub struct DatasetBackend {
    entities: Vec<Entity>,
    facet_fields: Vec<String>,
}

impl DatasetBackend {
    /// Backend over the given entities with the default facet fields.
    pub fn new(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            facet_fields: DEFAULT_FACET_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Replace the facet fields computed for each response.
    pub fn with_facet_fields(mut self, fields: Vec<String>) -> Self {
        self.facet_fields = fields;
        self
    }

    /// Parse a dataset from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: DatasetFile = serde_json::from_str(json)?;
        Ok(Self::new(file.into()))
    }

    /// Load a dataset file.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the path does not exist,
    /// `InputError::InvalidDataset` if the JSON is malformed, and
    /// `InputError::Io` for other read failures.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let backend = Self::from_json(&contents).map_err(|e| InputError::InvalidDataset {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        info!(
            path = %path.display(),
            entities = backend.entities.len(),
            "Dataset loaded"
        );
        Ok(backend)
    }

    /// Number of entities in the catalog.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the catalog holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn facet_for(&self, field: &str, query_lower: &str, filters: &FilterSelection) -> Facet {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

        for entity in self
            .entities
            .iter()
            .filter(|e| e.matches_query(query_lower) && passes_filters(e, filters, Some(field)))
        {
            if let Some(value) = entity.field(field) {
                *counts.entry(value).or_default() += 1;
            }
        }

        // Keep selected values visible even when other fields zero them out
        for value in filters.values_for(field) {
            counts.entry(value).or_default();
        }

        let mut aggregations: Vec<FacetBucket> = counts
            .into_iter()
            .filter(|(value, count)| *count > 0 || filters.contains(field, value))
            .map(|(value, count)| FacetBucket {
                value: value.to_string(),
                count,
            })
            .collect();
        // BTreeMap gives value order; stable sort keeps it within equal counts
        aggregations.sort_by(|a, b| b.count.cmp(&a.count));

        Facet {
            field: field.to_string(),
            display_name: display_name_for(field),
            aggregations,
        }
    }
}

/// Check an entity against every filtered field except `skip_field`.
fn passes_filters(entity: &Entity, filters: &FilterSelection, skip_field: Option<&str>) -> bool {
    let mut by_field: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for criterion in filters {
        if Some(criterion.field.as_str()) == skip_field {
            continue;
        }
        by_field
            .entry(criterion.field.as_str())
            .or_default()
            .push(criterion.value.as_str());
    }

    by_field.iter().all(|(field, values)| {
        entity
            .field(field)
            .is_some_and(|actual| values.contains(&actual))
    })
}

impl SearchBackend for DatasetBackend {
    fn search(&self, request: &SearchRequest) -> Result<ResultPage, BackendError> {
        if request.count == 0 {
            return Err(BackendError::InvalidPageSize);
        }

        let query_lower = request.query.trim().to_lowercase();
        let matches: Vec<&Entity> = self
            .entities
            .iter()
            .filter(|e| e.matches_query(&query_lower) && passes_filters(e, &request.filters, None))
            .collect();

        let entities = matches
            .iter()
            .skip(request.start)
            .take(request.count)
            .map(|e| (*e).clone())
            .collect::<Vec<_>>();

        let facets = self
            .facet_fields
            .iter()
            .map(|field| self.facet_for(field, &query_lower, &request.filters))
            .collect();

        debug!(
            query = %request.query,
            filters = request.filters.len(),
            start = request.start,
            total = matches.len(),
            returned = entities.len(),
            "Dataset search complete"
        );

        Ok(ResultPage {
            start_offset: request.start,
            page_size: request.count,
            total_count: matches.len(),
            entities,
            facets: Some(facets),
        })
    }
}

#[cfg(test)]
#[path = "dataset_tests.rs"]
mod tests;
