//! Error types for request validation and fetch execution.

use thiserror::Error;

/// Error produced while validating, dispatching, or executing a page fetch.
///
/// The three variants map to distinct handling policies:
///
/// - [`Validation`](FetchError::Validation) is rejected synchronously,
///   before a fetch is ever issued.
/// - [`Transport`](FetchError::Transport) is surfaced once; the grid keeps
///   showing the last good page instead of blanking.
/// - [`NotFound`](FetchError::NotFound) is terminal and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request descriptor is malformed (e.g. a zero page size).
    #[error("invalid request: {0}")]
    Validation(String),

    /// The fetch failed while in flight (network, timeout, executor fault).
    #[error("fetch failed: {0}")]
    Transport(String),

    /// The referenced collection does not exist.
    #[error("collection not found: {0}")]
    NotFound(String),
}

impl FetchError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a not-found error for a collection name.
    pub fn not_found(collection: impl Into<String>) -> Self {
        Self::NotFound(collection.into())
    }

    /// Returns `true` for errors that should never be retried.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
