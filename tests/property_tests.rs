//! Property-based tests for paging invariants.
//!
//! Tests validate:
//! 1. The display range never exceeds the total and collapses to zero without results
//! 2. A response that matches the selected page yields a range of at most one page
//! 3. Paging through the dataset backend visits every match exactly once
//! 4. Toggling a filter twice restores the selection

use proptest::prelude::*;
use rpager::backend::{DatasetBackend, SearchBackend, SearchRequest};
use rpager::model::{
    Entity, FilterSelection, PageNumber, ResultPage, SearchResponse, total_pages,
};
use rpager::pager::derive_range;

fn received(start: usize, size: usize, total: usize) -> SearchResponse {
    SearchResponse::Received(ResultPage {
        start_offset: start,
        page_size: size,
        total_count: total,
        entities: Vec::new(),
        facets: None,
    })
}

fn entities(platforms: &[u8]) -> Vec<Entity> {
    platforms
        .iter()
        .enumerate()
        .map(|(i, p)| Entity {
            urn: format!("urn:li:dataset:{i}"),
            entity_type: "dataset".to_string(),
            name: format!("table_{i}"),
            platform: Some(["mysql", "kafka", "hive"][usize::from(*p % 3)].to_string()),
            description: None,
        })
        .collect()
}

// ===== Property 1: Range bounds =====

proptest! {
    #[test]
    fn upper_never_exceeds_total(
        page in 1usize..1_000,
        start in 0usize..10_000,
        size in 0usize..100,
        total in 0usize..10_000,
    ) {
        let page = PageNumber::new(page).unwrap();
        let range = derive_range(page, &received(start, size, total));
        prop_assert!(range.upper <= range.total);
        prop_assert_eq!(range.total, total);
    }

    #[test]
    fn zero_total_is_all_zeros(
        page in 1usize..1_000,
        start in 0usize..10_000,
        size in 0usize..100,
    ) {
        let page = PageNumber::new(page).unwrap();
        let range = derive_range(page, &received(start, size, 0));
        prop_assert_eq!((range.lower, range.upper, range.total), (0, 0, 0));
    }

    #[test]
    fn absent_response_is_all_zeros(page in 1usize..1_000) {
        let page = PageNumber::new(page).unwrap();
        let range = derive_range(page, &SearchResponse::Absent);
        prop_assert_eq!((range.lower, range.upper, range.total), (0, 0, 0));
    }
}

// ===== Property 2: Consistent responses =====

proptest! {
    #[test]
    fn matching_response_spans_at_most_one_page(
        size in 1usize..100,
        total in 1usize..10_000,
        page_seed in any::<usize>(),
    ) {
        let pages = total_pages(total, size);
        let page = PageNumber::new(page_seed % pages + 1).unwrap();
        let start = page.start_offset(size);

        let range = derive_range(page, &received(start, size, total));

        prop_assert_eq!(range.lower, start + 1);
        prop_assert!(range.lower <= range.upper);
        prop_assert!(range.upper - range.lower < size);
    }

    #[test]
    fn total_pages_covers_total_exactly(size in 1usize..100, total in 0usize..10_000) {
        let pages = total_pages(total, size);
        prop_assert!(pages * size >= total);
        if total > 0 {
            prop_assert!((pages - 1) * size < total);
        } else {
            prop_assert_eq!(pages, 0);
        }
    }
}

// ===== Property 3: Backend paging =====

proptest! {
    #[test]
    fn paging_visits_every_match_once(
        platforms in prop::collection::vec(any::<u8>(), 0..60),
        size in 1usize..15,
    ) {
        let backend = DatasetBackend::new(entities(&platforms));
        let mut seen = Vec::new();
        let mut start = 0;

        loop {
            let page = backend
                .search(&SearchRequest { start, count: size, ..SearchRequest::default() })
                .unwrap();
            prop_assert_eq!(page.total_count, platforms.len());
            prop_assert!(page.entities.len() <= size);
            if page.entities.is_empty() {
                break;
            }
            seen.extend(page.entities.into_iter().map(|e| e.urn));
            start += size;
        }

        let expected: Vec<String> =
            (0..platforms.len()).map(|i| format!("urn:li:dataset:{i}")).collect();
        prop_assert_eq!(seen, expected);
    }
}

// ===== Property 4: Filter toggling =====

proptest! {
    #[test]
    fn toggle_twice_restores_selection(
        existing in prop::collection::vec("[a-c]{1,2}", 0..5),
        value in "[d-f]{1,2}",
    ) {
        let selection: FilterSelection = existing
            .iter()
            .map(|v| rpager::model::FilterCriterion::new("platform", v.as_str()))
            .collect();

        let toggled = selection.toggled("platform", &value);
        prop_assert!(toggled.contains("platform", &value));
        prop_assert_eq!(toggled.toggled("platform", &value), selection);
    }
}
