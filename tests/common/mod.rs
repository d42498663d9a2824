#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use snaplink::application::services::{LinkService, LinkServiceSettings};
use snaplink::domain::entities::{Link, NewLink};
use snaplink::domain::repositories::{LinkStore, StoreError, StoreResult};
use snaplink::infrastructure::persistence::InMemoryLinkStore;
use snaplink::routes::router;
use snaplink::state::AppState;
use snaplink::utils::code_generator::{CodeGenerator, RandomCodeGenerator};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const BASE_URL: &str = "https://s.example.com";

/// Replays a fixed list of codes, cycling when exhausted.
pub struct SequenceGenerator {
    codes: Vec<String>,
    next: Mutex<usize>,
}

impl SequenceGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: codes.iter().map(|c| c.to_string()).collect(),
            next: Mutex::new(0),
        }
    }
}

impl CodeGenerator for SequenceGenerator {
    fn generate(&self) -> String {
        let mut next = self.next.lock().unwrap();
        let code = self.codes[*next % self.codes.len()].clone();
        *next += 1;
        code
    }
}

/// Store whose every insert collides.
pub struct ConflictStore;

#[async_trait]
impl LinkStore for ConflictStore {
    async fn try_create(&self, new_link: NewLink) -> StoreResult<Link> {
        Err(StoreError::Conflict(new_link.short_code))
    }

    async fn lookup(&self, _short_code: &str) -> StoreResult<Option<Link>> {
        Ok(None)
    }

    async fn sweep_expired(&self, _now: DateTime<Utc>) -> StoreResult<u64> {
        Ok(0)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Store that is unreachable.
pub struct DownStore;

#[async_trait]
impl LinkStore for DownStore {
    async fn try_create(&self, _new_link: NewLink) -> StoreResult<Link> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn lookup(&self, _short_code: &str) -> StoreResult<Option<Link>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn sweep_expired(&self, _now: DateTime<Utc>) -> StoreResult<u64> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

/// Store that answers only after `delay`, delegating to an in-memory store.
pub struct SlowStore {
    pub inner: InMemoryLinkStore,
    pub delay: Duration,
}

#[async_trait]
impl LinkStore for SlowStore {
    async fn try_create(&self, new_link: NewLink) -> StoreResult<Link> {
        tokio::time::sleep(self.delay).await;
        self.inner.try_create(new_link).await
    }

    async fn lookup(&self, short_code: &str) -> StoreResult<Option<Link>> {
        tokio::time::sleep(self.delay).await;
        self.inner.lookup(short_code).await
    }

    async fn sweep_expired(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        tokio::time::sleep(self.delay).await;
        self.inner.sweep_expired(now).await
    }

    async fn ping(&self) -> StoreResult<()> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

pub fn test_settings() -> LinkServiceSettings {
    LinkServiceSettings {
        base_url: BASE_URL.to_string(),
        ..LinkServiceSettings::default()
    }
}

pub fn create_service(
    store: Arc<dyn LinkStore>,
    generator: Arc<dyn CodeGenerator>,
) -> Arc<LinkService<dyn LinkStore>> {
    Arc::new(LinkService::new(store, generator, test_settings()))
}

/// State over a fresh in-memory store with random codes.
pub fn create_test_state() -> (AppState, Arc<InMemoryLinkStore>) {
    let store = Arc::new(InMemoryLinkStore::new());
    let state = AppState::new(create_service(
        store.clone(),
        Arc::new(RandomCodeGenerator::default()),
    ));
    (state, store)
}

pub fn create_state_with(store: Arc<dyn LinkStore>, generator: Arc<dyn CodeGenerator>) -> AppState {
    AppState::new(create_service(store, generator))
}

/// All application routes and middleware.
pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

pub async fn insert_link(
    store: &InMemoryLinkStore,
    code: &str,
    url: &str,
    expires_at: Option<DateTime<Utc>>,
) -> Link {
    store
        .try_create(NewLink::new(code, url, expires_at))
        .await
        .unwrap()
}
