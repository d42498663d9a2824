//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkStore, StoreError, StoreResult};

/// PostgreSQL store for link persistence.
///
/// Uniqueness of active short codes is enforced by the `links_short_code_key`
/// constraint. Inserts go through `ON CONFLICT ... DO UPDATE ... WHERE`, which
/// takes the row lock of the conflicting row: an expired row is replaced in
/// place, an active row makes the statement return nothing.
pub struct PgLinkStore {
    pool: Arc<PgPool>,
}

impl PgLinkStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        self.pool.as_ref()
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StoreError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Unavailable(message),
        _ => StoreError::Query(message),
    }
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn try_create(&self, new_link: NewLink) -> StoreResult<Link> {
        let result = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (original_url, short_code, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (short_code) DO UPDATE
            SET id = DEFAULT,
                original_url = EXCLUDED.original_url,
                created_at = now(),
                expires_at = EXCLUDED.expires_at
            WHERE links.expires_at IS NOT NULL
              AND links.expires_at <= now()
            RETURNING id, original_url, short_code, created_at, expires_at
            "#,
        )
        .bind(&new_link.original_url)
        .bind(&new_link.short_code)
        .bind(new_link.expires_at)
        .fetch_optional(self.pool.as_ref())
        .await;

        match result {
            Ok(Some(link)) => Ok(link),
            Ok(None) => Err(StoreError::Conflict(new_link.short_code)),
            Err(e) if is_unique_violation(&e) => Err(StoreError::Conflict(new_link.short_code)),
            Err(e) => {
                tracing::error!(error = %e, "Failed to insert link");
                Err(map_sqlx_error(e))
            }
        }
    }

    async fn lookup(&self, short_code: &str) -> StoreResult<Option<Link>> {
        sqlx::query_as::<_, Link>(
            r#"
            SELECT id, original_url, short_code, created_at, expires_at
            FROM links
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)
    }

    async fn sweep_expired(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM links
            WHERE expires_at IS NOT NULL
              AND expires_at < $1
            "#,
        )
        .bind(now)
        .execute(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
