//! Shared test fixtures: a hand-driven row source and a products dataset.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::oneshot;

use gridline_grid::column::{ColumnSpec, FilterKind};
use gridline_grid::grid::GridConfig;
use gridline_lib::error::FetchError;
use gridline_lib::page::PageData;
use gridline_lib::request::PageRequest;
use gridline_lib::row::Row;
use gridline_lib::source::RowSource;

/// A row source that parks every fetch until the test resolves it, so
/// completion order is entirely under test control.
#[derive(Default)]
pub struct ManualSource {
    calls: Mutex<Vec<ManualCall>>,
}

struct ManualCall {
    request: PageRequest,
    respond: Option<oneshot::Sender<Result<PageData, FetchError>>>,
}

impl ManualSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of fetches issued so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The request the n-th fetch carried.
    pub fn request(&self, index: usize) -> PageRequest {
        self.calls.lock().unwrap()[index].request.clone()
    }

    /// Resolves the n-th fetch. Resolving a fetch whose receiver is
    /// already gone (cancelled) is a no-op.
    pub fn resolve(&self, index: usize, result: Result<PageData, FetchError>) {
        let sender = self.calls.lock().unwrap()[index]
            .respond
            .take()
            .expect("fetch already resolved");
        let _ = sender.send(result);
    }
}

#[async_trait]
impl RowSource for ManualSource {
    async fn fetch(&self, request: &PageRequest) -> Result<PageData, FetchError> {
        let (respond, wait) = oneshot::channel();
        self.calls.lock().unwrap().push(ManualCall {
            request: request.clone(),
            respond: Some(respond),
        });
        match wait.await {
            Ok(result) => result,
            Err(_) => Err(FetchError::transport("source dropped")),
        }
    }
}

/// Polls a condition until it holds or the deadline passes.
pub async fn wait_until(what: &str, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
}

/// A page of product rows with ids `first..first + count`.
pub fn product_page(first: i64, count: i64, total_count: u64) -> PageData {
    PageData::new(
        (first..first + count).map(product_row).collect(),
        total_count,
    )
}

pub fn product_row(id: i64) -> Row {
    json!({
        "id": id,
        "title": format!("Product {id}"),
        "price": id * 4,
        "category": {"name": "Electronics"},
    })
}

pub fn product_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Title", "title").sortable().filterable(FilterKind::Text),
        ColumnSpec::new("Price", "price").sortable(),
        ColumnSpec::new("Category", "category.name").filterable(FilterKind::Select),
    ]
}

pub fn grid_config() -> GridConfig {
    GridConfig::new().with_row_key("id")
}
