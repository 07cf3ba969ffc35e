//! Fetch coordination: supersession, channel replacement, cancellation.
//!
//! Each [`FetchCoordinator::issue`] call starts a new logical request and
//! stamps it with a monotonically increasing generation number. Responses
//! are allowed to complete in any order; a response whose generation is no
//! longer current is discarded silently, so the grid only ever sees the
//! result of the most recently issued descriptor. Ordering is enforced by
//! this check alone; nothing is queued.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use log::debug;
use tokio_util::sync::CancellationToken;

use gridline_lib::error::FetchError;
use gridline_lib::page::PageData;
use gridline_lib::request::PageRequest;
use gridline_lib::source::RowSource;

/// How one fetch ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The source returned a page.
    Loaded(PageData),
    /// The fetch failed in flight. Surfaced once; never retried here.
    Failed(FetchError),
}

/// A completed fetch that is still current and may be applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchDelivery {
    /// Generation stamp of the producing [`FetchCoordinator::issue`] call.
    pub generation: u64,
    /// The descriptor that produced this outcome.
    pub request: PageRequest,
    /// The outcome itself.
    pub outcome: FetchOutcome,
}

/// Issues fetches against a [`RowSource`] and guarantees at-most-one live
/// request per grid instance.
pub struct FetchCoordinator {
    source: Arc<dyn RowSource>,
    generation: Arc<AtomicU64>,
    root: CancellationToken,
    channel: Mutex<CancellationToken>,
}

impl FetchCoordinator {
    /// Creates a coordinator over a source.
    pub fn new(source: Arc<dyn RowSource>) -> Self {
        let root = CancellationToken::new();
        let channel = Mutex::new(root.child_token());
        Self {
            source,
            generation: Arc::new(AtomicU64::new(0)),
            root,
            channel,
        }
    }

    /// Starts a new logical request, superseding any outstanding one.
    ///
    /// The descriptor is validated synchronously: a malformed request is
    /// rejected here and no fetch is spawned. On success the returned
    /// [`PendingFetch`] must be driven to completion with
    /// [`PendingFetch::run`].
    pub fn issue(&self, request: &PageRequest) -> Result<PendingFetch, FetchError> {
        request.validate()?;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let cancel = self
            .channel
            .lock()
            .map(|token| token.child_token())
            .unwrap_or_else(|_| self.root.child_token());
        Ok(PendingFetch {
            source: Arc::clone(&self.source),
            request: request.clone(),
            generation,
            current: Arc::clone(&self.generation),
            cancel,
        })
    }

    /// Replaces the underlying request channel.
    ///
    /// Used when the filter mode switches (search, per-field, cleared): the
    /// previous channel's token is cancelled outright, so an in-flight
    /// request from the old mode cannot be mistaken for the new one even
    /// while its response is already in transit.
    pub fn replace_channel(&self) {
        if let Ok(mut channel) = self.channel.lock() {
            channel.cancel();
            *channel = self.root.child_token();
        }
    }

    /// Returns `true` if the generation stamp still belongs to the most
    /// recently issued request.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// The generation of the most recently issued request.
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Cancels everything outstanding. Called on grid teardown; after this
    /// no pending fetch can deliver.
    pub fn shutdown(&self) {
        self.root.cancel();
    }
}

/// One issued fetch, ready to be driven.
pub struct PendingFetch {
    source: Arc<dyn RowSource>,
    request: PageRequest,
    generation: u64,
    current: Arc<AtomicU64>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for PendingFetch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingFetch")
            .field("request", &self.request)
            .field("generation", &self.generation)
            .field("current", &self.current)
            .field("cancel", &self.cancel)
            .finish_non_exhaustive()
    }
}

impl PendingFetch {
    /// The generation stamp of this fetch.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The descriptor this fetch carries.
    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    /// Drives the fetch to completion.
    ///
    /// Returns `None` when the fetch was cancelled or its response turned
    /// stale while in flight; a discarded response surfaces no error.
    /// Errors from the source come back as a [`FetchOutcome::Failed`]
    /// delivery instead, so the caller can retain its last good data.
    pub async fn run(self) -> Option<FetchDelivery> {
        let result = tokio::select! {
            _ = self.cancel.cancelled() => {
                debug!("fetch generation {} cancelled", self.generation);
                return None;
            }
            result = self.source.fetch(&self.request) => result,
        };

        if self.current.load(Ordering::SeqCst) != self.generation {
            debug!(
                "discarding stale response for generation {}",
                self.generation
            );
            return None;
        }

        let outcome = match result {
            Ok(data) => FetchOutcome::Loaded(data),
            Err(error) => FetchOutcome::Failed(error),
        };
        Some(FetchDelivery {
            generation: self.generation,
            request: self.request,
            outcome,
        })
    }
}
