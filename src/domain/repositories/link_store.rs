//! Store trait for short link persistence.

use crate::domain::entities::{Link, NewLink};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by [`LinkStore`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// An active link already owns the short code.
    #[error("short code already taken: {0}")]
    Conflict(String),

    #[error("link store unavailable: {0}")]
    Unavailable(String),

    #[error("link store operation timed out: {0}")]
    Timeout(String),

    #[error("link store query failed: {0}")]
    Query(String),
}

impl StoreError {
    /// Returns true for failures the caller may retry later.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout(_))
    }
}

/// Durable storage for short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkStore`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkStore`] - process-local implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/store_memory.rs`, `tests/store_postgres.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Atomically inserts a new link keyed by its short code.
    ///
    /// The uniqueness check and the insert are a single operation: when several
    /// callers race on the same code, exactly one succeeds. An expired row that
    /// has not been swept yet may be replaced.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if an active link already uses the code.
    /// Returns [`StoreError::Unavailable`] / [`StoreError::Timeout`] on transport failures,
    /// in which case nothing has been committed from the caller's point of view.
    async fn try_create(&self, new_link: NewLink) -> StoreResult<Link>;

    /// Finds a link by its short code, regardless of expiry.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if a row exists
    /// - `Ok(None)` if not found
    async fn lookup(&self, short_code: &str) -> StoreResult<Option<Link>>;

    /// Deletes every link whose `expires_at` is before `now`.
    ///
    /// Returns the number of deleted rows. Safe to run repeatedly and
    /// concurrently with creates and lookups.
    async fn sweep_expired(&self, now: DateTime<Utc>) -> StoreResult<u64>;

    /// Checks that the backing storage is reachable.
    async fn ping(&self) -> StoreResult<()>;
}
