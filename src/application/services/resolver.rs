//! Short code resolution with expiry policy.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::{LinkStore, StoreResult};

/// Outcome of resolving a short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The code maps to an active link.
    Redirect { target: String, link: Link },
    NotFound,
    /// The row still exists but its expiry has passed; it waits for the next sweep.
    Expired,
}

impl Resolution {
    /// Returns the redirect target, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Redirect { target, .. } => Some(target),
            Self::NotFound | Self::Expired => None,
        }
    }
}

/// Read-only lookup of short codes.
pub struct Resolver<S: LinkStore + ?Sized> {
    store: Arc<S>,
}

impl<S: LinkStore + ?Sized> Resolver<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Resolves `code` as of `now`.
    ///
    /// Never mutates the store; an expired row is reported as
    /// [`Resolution::Expired`] and left for the sweeper.
    pub async fn resolve(&self, code: &str, now: DateTime<Utc>) -> StoreResult<Resolution> {
        let Some(link) = self.store.lookup(code).await? else {
            return Ok(Resolution::NotFound);
        };

        if link.is_expired_at(now) {
            return Ok(Resolution::Expired);
        }

        Ok(Resolution::Redirect {
            target: link.original_url.clone(),
            link,
        })
    }
}
