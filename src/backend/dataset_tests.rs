//! Tests for the in-memory dataset backend.

use super::*;
use crate::model::FilterCriterion;
use std::fs;

fn entity(name: &str, entity_type: &str, platform: &str) -> Entity {
    Entity {
        urn: format!("urn:li:{entity_type}:({platform},{name})"),
        entity_type: entity_type.to_string(),
        name: name.to_string(),
        platform: Some(platform.to_string()),
        description: None,
    }
}

fn sample_backend() -> DatasetBackend {
    DatasetBackend::new(vec![
        entity("orders", "dataset", "mysql"),
        entity("customers", "dataset", "mysql"),
        entity("clicks", "dataset", "kafka"),
        entity("revenue", "dashboard", "looker"),
        entity("order_events", "dataset", "kafka"),
    ])
}

fn request(query: &str, filters: Vec<FilterCriterion>, start: usize, count: usize) -> SearchRequest {
    SearchRequest {
        query: query.to_string(),
        filters: FilterSelection::new(filters),
        start,
        count,
    }
}

fn names(page: &ResultPage) -> Vec<&str> {
    page.entities.iter().map(|e| e.name.as_str()).collect()
}

fn buckets<'a>(page: &'a ResultPage, field: &str) -> Vec<(&'a str, usize)> {
    page.facets
        .as_ref()
        .unwrap()
        .iter()
        .find(|f| f.field == field)
        .unwrap()
        .aggregations
        .iter()
        .map(|b| (b.value.as_str(), b.count))
        .collect()
}

#[test]
fn empty_query_matches_everything_in_dataset_order() {
    let page = sample_backend().search(&request("", vec![], 0, 10)).unwrap();
    assert_eq!(page.total_count, 5);
    assert_eq!(
        names(&page),
        vec!["orders", "customers", "clicks", "revenue", "order_events"]
    );
}

#[test]
fn query_is_case_insensitive_substring() {
    let page = sample_backend().search(&request("ORDER", vec![], 0, 10)).unwrap();
    assert_eq!(names(&page), vec!["orders", "order_events"]);
}

#[test]
fn pages_slice_results_and_keep_true_total() {
    let backend = sample_backend();
    let page = backend.search(&request("", vec![], 2, 2)).unwrap();
    assert_eq!(page.start_offset, 2);
    assert_eq!(page.page_size, 2);
    assert_eq!(page.total_count, 5);
    assert_eq!(names(&page), vec!["clicks", "revenue"]);

    let last = backend.search(&request("", vec![], 4, 2)).unwrap();
    assert_eq!(names(&last), vec!["order_events"]);
}

#[test]
fn start_past_end_yields_empty_page() {
    let page = sample_backend().search(&request("", vec![], 50, 10)).unwrap();
    assert!(page.entities.is_empty());
    assert_eq!(page.total_count, 5);
}

#[test]
fn zero_count_is_rejected() {
    let result = sample_backend().search(&request("", vec![], 0, 0));
    assert_eq!(result, Err(BackendError::InvalidPageSize));
}

#[test]
fn same_field_values_are_ored() {
    let page = sample_backend()
        .search(&request(
            "",
            vec![
                FilterCriterion::new("platform", "mysql"),
                FilterCriterion::new("platform", "looker"),
            ],
            0,
            10,
        ))
        .unwrap();
    assert_eq!(names(&page), vec!["orders", "customers", "revenue"]);
}

#[test]
fn distinct_fields_are_anded() {
    let page = sample_backend()
        .search(&request(
            "",
            vec![
                FilterCriterion::new("platform", "kafka"),
                FilterCriterion::new("type", "dataset"),
            ],
            0,
            10,
        ))
        .unwrap();
    assert_eq!(names(&page), vec!["clicks", "order_events"]);
}

#[test]
fn unknown_filter_field_matches_nothing() {
    let page = sample_backend()
        .search(&request("", vec![FilterCriterion::new("owner", "alice")], 0, 10))
        .unwrap();
    assert_eq!(page.total_count, 0);
}

#[test]
fn facets_sorted_by_count_then_value() {
    let page = sample_backend().search(&request("", vec![], 0, 10)).unwrap();
    assert_eq!(
        buckets(&page, "platform"),
        vec![("kafka", 2), ("mysql", 2), ("looker", 1)]
    );
    assert_eq!(buckets(&page, "type"), vec![("dataset", 4), ("dashboard", 1)]);
}

#[test]
fn facet_ignores_its_own_field_filters() {
    let page = sample_backend()
        .search(&request("", vec![FilterCriterion::new("platform", "mysql")], 0, 10))
        .unwrap();
    // Sibling platforms remain selectable
    assert_eq!(
        buckets(&page, "platform"),
        vec![("kafka", 2), ("mysql", 2), ("looker", 1)]
    );
    // Other facets narrow to the filtered set
    assert_eq!(buckets(&page, "type"), vec![("dataset", 2)]);
}

#[test]
fn selected_value_kept_with_zero_count() {
    let page = sample_backend()
        .search(&request(
            "",
            vec![
                FilterCriterion::new("type", "dashboard"),
                FilterCriterion::new("platform", "mysql"),
            ],
            0,
            10,
        ))
        .unwrap();
    assert_eq!(page.total_count, 0);
    assert!(buckets(&page, "platform").contains(&("mysql", 0)));
}

#[test]
fn facet_fields_are_configurable() {
    let backend = sample_backend().with_facet_fields(vec!["platform".to_string()]);
    let page = backend.search(&request("", vec![], 0, 10)).unwrap();
    let facets = page.facets.unwrap();
    assert_eq!(facets.len(), 1);
    assert_eq!(facets[0].display_name, "Platform");
}

#[test]
fn from_json_accepts_array_and_wrapped_shapes() {
    let array = r#"[{"urn":"u1","type":"dataset","name":"a"}]"#;
    let wrapped = r#"{"entities":[{"urn":"u1","type":"dataset","name":"a"}]}"#;
    assert_eq!(DatasetBackend::from_json(array).unwrap().len(), 1);
    assert_eq!(DatasetBackend::from_json(wrapped).unwrap().len(), 1);
}

#[test]
fn from_path_missing_file() {
    let result = DatasetBackend::from_path("/nonexistent/rpager/dataset.json");
    assert!(matches!(result, Err(InputError::FileNotFound { .. })));
}

#[test]
fn from_path_invalid_json() {
    let path = std::env::temp_dir().join("rpager_test_invalid_dataset.json");
    fs::write(&path, "{ not json").unwrap();

    let result = DatasetBackend::from_path(&path);
    assert!(matches!(result, Err(InputError::InvalidDataset { .. })));

    let _ = fs::remove_file(&path);
}

#[test]
fn from_path_loads_entities() {
    let path = std::env::temp_dir().join("rpager_test_valid_dataset.json");
    fs::write(
        &path,
        r#"[{"urn":"u1","type":"dataset","name":"a","platform":"mysql"},
            {"urn":"u2","type":"chart","name":"b"}]"#,
    )
    .unwrap();

    let backend = DatasetBackend::from_path(&path).unwrap();
    assert_eq!(backend.len(), 2);
    assert!(!backend.is_empty());

    let _ = fs::remove_file(&path);
}
