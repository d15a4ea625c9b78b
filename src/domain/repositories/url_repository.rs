//! Repository trait for URL records and redirect logs.

use crate::domain::entities::{RedirectLog, UrlRecord, UrlStats};
use async_trait::async_trait;

/// Storage failure reported by a [`UrlRepository`].
///
/// `NotFound` and `Conflict` are outcomes the engine branches on; anything
/// else the backend reports is carried as `Backend`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("short code not found: {0}")]
    NotFound(String),

    #[error("short code already taken: {0}")]
    Conflict(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Repository interface for URL records and their redirect logs.
///
/// Implementations must enforce uniqueness of `short_code` at insert time:
/// when two saves race for the same code, exactly one succeeds and the other
/// reports [`StoreError::Conflict`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - process-local map
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Persists a new URL record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the short code already exists.
    /// Returns [`StoreError::Backend`] on any other failure.
    async fn save_url(&self, record: UrlRecord) -> Result<(), StoreError>;

    /// Looks up a URL record by short code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has this code.
    /// Returns [`StoreError::Backend`] on any other failure.
    async fn get_url(&self, short_code: &str) -> Result<UrlRecord, StoreError>;

    /// Appends a redirect-log entry.
    ///
    /// Does not check that the code exists.
    async fn save_redirect_log(&self, entry: RedirectLog) -> Result<(), StoreError>;

    /// Aggregates redirect statistics for a short code.
    ///
    /// The record lookup and the log aggregation observe one consistent
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has this code.
    /// Returns [`StoreError::Backend`] on any other failure.
    async fn get_stats(&self, short_code: &str) -> Result<UrlStats, StoreError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
