use gridline_lib::request::{Direction, FilterSet, PageRequest, SortSpec};
use serde_json::json;

#[test]
fn serializes_to_the_stable_field_names() {
    let request = PageRequest::new(3, 10)
        .with_sort(SortSpec::desc("price"))
        .with_filters(FilterSet::field("title", "phone"));
    let wire = serde_json::to_value(&request).unwrap();
    assert_eq!(
        wire,
        json!({
            "skip": 20,
            "limit": 10,
            "sortBy": "price",
            "order": "desc",
            "filters": {"title": "phone"},
        })
    );
}

#[test]
fn unsorted_unfiltered_request_still_carries_every_field() {
    let wire = serde_json::to_value(PageRequest::new(1, 25)).unwrap();
    assert_eq!(
        wire,
        json!({
            "skip": 0,
            "limit": 25,
            "sortBy": "",
            "order": "",
            "filters": {},
        })
    );
}

#[test]
fn round_trip_is_identity() {
    let original = PageRequest::new(3, 10)
        .with_sort(SortSpec::desc("price"))
        .with_filters(FilterSet::global("phone"));
    let wire = serde_json::to_string(&original).unwrap();
    let decoded: PageRequest = serde_json::from_str(&wire).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn global_filter_uses_the_reserved_key() {
    let request = PageRequest::new(1, 10).with_filters(FilterSet::global("phone"));
    let wire = serde_json::to_value(&request).unwrap();
    assert_eq!(wire["filters"], json!({"global": "phone"}));
}

#[test]
fn global_key_wins_over_stray_field_entries() {
    let decoded: PageRequest = serde_json::from_value(json!({
        "skip": 0,
        "limit": 10,
        "filters": {"global": "phone", "title": "ignored"},
    }))
    .unwrap();
    assert_eq!(decoded.filters, FilterSet::global("phone"));
}

#[test]
fn order_parsing_is_lenient() {
    let decoded: PageRequest = serde_json::from_value(json!({
        "skip": 0,
        "limit": 10,
        "sortBy": "price",
        "order": "DESCENDING",
    }))
    .unwrap();
    assert_eq!(decoded.sort.unwrap().direction, Direction::Asc);
}

#[test]
fn misaligned_skip_rounds_down_to_the_containing_page() {
    let decoded: PageRequest = serde_json::from_value(json!({
        "skip": 25,
        "limit": 10,
    }))
    .unwrap();
    assert_eq!(decoded.page, 3);
}

#[test]
fn zero_limit_is_rejected() {
    let result: Result<PageRequest, _> = serde_json::from_value(json!({
        "skip": 0,
        "limit": 0,
    }));
    assert!(result.is_err());
}

#[test]
fn validation_rejects_malformed_descriptors() {
    assert!(PageRequest::new(0, 10).validate().is_err());
    assert!(PageRequest::new(1, 0).validate().is_err());
    assert!(PageRequest::new(1, 10).validate().is_ok());
}

#[test]
fn skip_derivation_is_one_based() {
    assert_eq!(PageRequest::new(1, 10).skip(), 0);
    assert_eq!(PageRequest::new(2, 10).skip(), 10);
    assert_eq!(PageRequest::new(5, 25).skip(), 100);
}
