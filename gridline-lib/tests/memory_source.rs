use gridline_lib::error::FetchError;
use gridline_lib::memory::{MemoryCatalog, MemorySource};
use gridline_lib::query::{MatchKind, QueryConfig};
use gridline_lib::request::{FilterSet, PageRequest, SortSpec};
use gridline_lib::source::RowSource;
use serde_json::json;

fn products_source() -> MemorySource {
    let rows = (1..=25)
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Product {id}"),
                "price": id * 4,
                "category": "Electronics",
            })
        })
        .collect();
    let config = QueryConfig::new("id")
        .sortable(["price"])
        .filterable("category", MatchKind::Equals)
        .searchable(["title"]);
    MemorySource::new(rows, config)
}

#[tokio::test]
async fn fetch_returns_slice_and_total() {
    let source = products_source();
    let page = source
        .fetch(&PageRequest::new(2, 10).with_sort(SortSpec::desc("price")))
        .await
        .unwrap();
    assert_eq!(page.total_count, 25);
    assert_eq!(page.len(), 10);
    assert_eq!(page.rows[0]["price"], json!(60));
}

#[tokio::test]
async fn fetch_rejects_malformed_requests() {
    let source = products_source();
    let error = source.fetch(&PageRequest::new(1, 0)).await.unwrap_err();
    assert!(matches!(error, FetchError::Validation(_)));
}

#[tokio::test]
async fn fetch_applies_filters() {
    let source = products_source();
    let page = source
        .fetch(&PageRequest::new(1, 25).with_filters(FilterSet::field("category", "Books")))
        .await
        .unwrap();
    assert_eq!(page.total_count, 0);

    let page = source
        .fetch(&PageRequest::new(1, 25).with_filters(FilterSet::global("product 7")))
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);
}

#[tokio::test]
async fn catalog_resolves_known_collections() {
    let mut catalog = MemoryCatalog::new();
    catalog.insert("products", products_source());

    let source = catalog.open("products").unwrap();
    let page = source.fetch(&PageRequest::new(1, 5)).await.unwrap();
    assert_eq!(page.len(), 5);
}

#[test]
fn catalog_misses_are_terminal_not_found() {
    let catalog = MemoryCatalog::new();
    let error = catalog.open("ghosts").unwrap_err();
    assert_eq!(error, FetchError::not_found("ghosts"));
    assert!(error.is_terminal());
}
