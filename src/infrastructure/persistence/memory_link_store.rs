//! In-memory implementation of the link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkStore, StoreError, StoreResult};

/// Process-local link store backed by `DashMap`.
///
/// `try_create` goes through the entry API, so the existence check and the
/// insert run under the same shard lock. Only safe for a single process; use
/// [`crate::infrastructure::persistence::PgLinkStore`] when several instances
/// share the code space.
#[derive(Debug)]
pub struct InMemoryLinkStore {
    links: DashMap<String, Link>,
    next_id: AtomicI64,
}

impl InMemoryLinkStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored links, expired ones included.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    fn materialize(&self, new_link: NewLink, created_at: DateTime<Utc>) -> Link {
        Link::new(
            self.next_id.fetch_add(1, Ordering::Relaxed),
            new_link.original_url,
            new_link.short_code,
            created_at,
            new_link.expires_at,
        )
    }
}

impl Default for InMemoryLinkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn try_create(&self, new_link: NewLink) -> StoreResult<Link> {
        let now = Utc::now();

        match self.links.entry(new_link.short_code.clone()) {
            Entry::Occupied(mut occupied) => {
                if !occupied.get().is_expired_at(now) {
                    return Err(StoreError::Conflict(new_link.short_code));
                }
                let link = self.materialize(new_link, now);
                occupied.insert(link.clone());
                Ok(link)
            }
            Entry::Vacant(vacant) => {
                let link = self.materialize(new_link, now);
                vacant.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn lookup(&self, short_code: &str) -> StoreResult<Option<Link>> {
        Ok(self.links.get(short_code).map(|entry| entry.value().clone()))
    }

    async fn sweep_expired(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        let mut removed = 0u64;

        self.links.retain(|_, link| {
            let expired = link.expires_at.is_some_and(|e| e < now);
            if expired {
                removed += 1;
            }
            !expired
        });

        Ok(removed)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
