//! Collision-free short code allocation.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkStore, StoreError};
use crate::utils::code_generator::{CodeGenerator, is_reserved_code};

/// Default number of candidates tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Errors returned by [`Allocator::allocate`].
///
/// Store conflicts are absorbed by the retry loop and never appear here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("no free short code found after {attempts} attempts")]
    Exhausted { attempts: usize },

    #[error(transparent)]
    Store(StoreError),
}

/// Allocates globally unique short codes.
///
/// Each attempt draws a fresh candidate and hands it to
/// [`LinkStore::try_create`], which enforces uniqueness atomically. Two
/// allocators racing on the same candidate therefore cannot both win: the
/// loser sees a conflict and moves on to a new candidate.
pub struct Allocator<S: LinkStore + ?Sized, G: CodeGenerator + ?Sized> {
    store: Arc<S>,
    generator: Arc<G>,
    max_attempts: usize,
}

impl<S: LinkStore + ?Sized, G: CodeGenerator + ?Sized> Allocator<S, G> {
    /// Creates an allocator trying at most `max_attempts` candidates per call.
    pub fn new(store: Arc<S>, generator: Arc<G>, max_attempts: usize) -> Self {
        Self {
            store,
            generator,
            max_attempts,
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Stores `original_url` under a newly allocated short code.
    ///
    /// `original_url` is expected to be normalized already.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::Exhausted`] if every candidate collided.
    /// Returns [`AllocationError::Store`] on any other store failure; such
    /// failures are not retried, and nothing is reported as created.
    pub async fn allocate(
        &self,
        original_url: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Link, AllocationError> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate();
            if is_reserved_code(&candidate) {
                metrics::counter!("snaplink_code_collisions_total").increment(1);
                debug!(code = %candidate, attempt, "Reserved short code drawn, retrying");
                continue;
            }

            let new_link = NewLink::new(candidate, original_url, expires_at);

            match self.store.try_create(new_link).await {
                Ok(link) => {
                    metrics::counter!("snaplink_links_created_total").increment(1);
                    debug!(code = %link.short_code, attempt, "Allocated short code");
                    return Ok(link);
                }
                Err(StoreError::Conflict(code)) => {
                    metrics::counter!("snaplink_code_collisions_total").increment(1);
                    debug!(%code, attempt, "Short code collision, retrying");
                }
                Err(e) => return Err(AllocationError::Store(e)),
            }
        }

        metrics::counter!("snaplink_allocation_exhausted_total").increment(1);
        warn!(
            attempts = self.max_attempts,
            "Short code allocation exhausted"
        );

        Err(AllocationError::Exhausted {
            attempts: self.max_attempts,
        })
    }
}
