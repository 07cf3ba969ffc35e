//! In-memory query execution over plain row collections.
//!
//! [`MemorySource`] hosts the query planner over a `Vec<Row>` and is the
//! reference [`RowSource`]: the demo and the integration tests run against
//! it, and it documents the exact semantics a remote host is expected to
//! reproduce. [`MemoryCatalog`] keys several sources by collection name.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::page::PageData;
use crate::query::{QueryConfig, QueryPlan};
use crate::request::PageRequest;
use crate::row::Row;
use crate::source::RowSource;

/// A fixed collection of rows queried through the planner.
///
/// The rows are immutable after construction, so any number of grids can
/// fetch from one source concurrently without locking.
#[derive(Debug)]
pub struct MemorySource {
    rows: Vec<Row>,
    config: QueryConfig,
}

impl MemorySource {
    /// Creates a source over a row collection and its query rules.
    pub fn new(rows: Vec<Row>, config: QueryConfig) -> Self {
        Self { rows, config }
    }

    /// Number of rows in the backing collection (unfiltered).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the backing collection is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The query rules this source enforces.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }
}

#[async_trait]
impl RowSource for MemorySource {
    async fn fetch(&self, request: &PageRequest) -> Result<PageData, FetchError> {
        request.validate()?;
        let plan = QueryPlan::new(request, &self.config);
        Ok(plan.execute(&self.rows))
    }
}

/// Named collections behind one lookup point.
///
/// Opening a name that was never registered is a terminal
/// [`FetchError::NotFound`], mirroring a server returning 404 for an
/// unknown collection.
#[derive(Default)]
pub struct MemoryCatalog {
    collections: HashMap<String, Arc<MemorySource>>,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collection under a name, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, source: MemorySource) {
        self.collections.insert(name.into(), Arc::new(source));
    }

    /// Looks up a collection by name.
    pub fn open(&self, name: &str) -> Result<Arc<MemorySource>, FetchError> {
        self.collections
            .get(name)
            .cloned()
            .ok_or_else(|| FetchError::not_found(name))
    }
}
