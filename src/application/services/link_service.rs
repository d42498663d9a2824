//! Link creation and resolution service.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{info, warn};

use crate::application::services::allocator::{Allocator, DEFAULT_MAX_ATTEMPTS};
use crate::application::services::resolver::{Resolution, Resolver};
use crate::domain::entities::Link;
use crate::domain::repositories::LinkStore;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, is_well_formed_code};
use crate::utils::url_normalizer::{normalize_url, validate_url};

/// Longest lifetime a link can be given, in seconds (100 years).
pub const MAX_LINK_TTL_SECONDS: u64 = 100 * 365 * 24 * 60 * 60;

/// Tunables for [`LinkService`].
#[derive(Debug, Clone)]
pub struct LinkServiceSettings {
    /// Origin prepended to short codes, e.g. `https://s.example.com`.
    pub base_url: String,
    pub max_attempts: usize,
    /// Expiry applied when a create request does not carry one.
    pub default_ttl: Option<chrono::Duration>,
    /// Upper bound for a single store round trip.
    pub store_timeout: Duration,
}

impl Default for LinkServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            default_ttl: None,
            store_timeout: Duration::from_secs(5),
        }
    }
}

/// A freshly created short link as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLink {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Service for creating and resolving short links.
///
/// Validation happens before any store interaction. Every store round trip is
/// bounded by `store_timeout`; an elapsed timeout is reported as a transient
/// failure and never as a created link.
pub struct LinkService<S: LinkStore + ?Sized> {
    store: Arc<S>,
    allocator: Allocator<S, dyn CodeGenerator>,
    resolver: Resolver<S>,
    settings: LinkServiceSettings,
}

impl<S: LinkStore + ?Sized> LinkService<S> {
    /// Creates a new link service.
    pub fn new(
        store: Arc<S>,
        generator: Arc<dyn CodeGenerator>,
        settings: LinkServiceSettings,
    ) -> Self {
        Self {
            allocator: Allocator::new(store.clone(), generator, settings.max_attempts),
            resolver: Resolver::new(store.clone()),
            store,
            settings,
        }
    }

    /// Shortens `raw_url`.
    ///
    /// The URL is validated and normalized (`example.com` becomes
    /// `https://example.com`). Without an explicit `expires_at` the configured
    /// default TTL applies, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is invalid or `expires_at` is
    /// not in the future.
    ///
    /// Returns [`AppError::Unavailable`] if no free code was found, the store is
    /// unreachable, or the store did not answer in time.
    pub async fn create_short_link(
        &self,
        raw_url: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<CreatedLink, AppError> {
        if !validate_url(raw_url) {
            return Err(AppError::bad_request(
                "Invalid URL format",
                json!({ "url": raw_url }),
            ));
        }

        let original_url = normalize_url(raw_url);
        let expires_at = self.effective_expiry(expires_at, Utc::now())?;

        let link = self
            .bounded("allocate", self.allocator.allocate(&original_url, expires_at))
            .await?;

        info!(code = %link.short_code, url = %link.original_url, "Short link created");

        Ok(CreatedLink {
            short_url: self.short_url(&link.short_code),
            short_code: link.short_code,
            original_url: link.original_url,
            expires_at: link.expires_at,
        })
    }

    /// Resolves `code` to its active link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code never existed or has expired;
    /// the two cases are indistinguishable to the caller.
    pub async fn resolve_short_link(&self, code: &str) -> Result<Link, AppError> {
        if !is_well_formed_code(code) {
            return Err(Self::link_not_found(code));
        }

        let resolution = self
            .bounded("resolve", self.resolver.resolve(code, Utc::now()))
            .await?;

        match resolution {
            Resolution::Redirect { link, .. } => Ok(link),
            Resolution::NotFound | Resolution::Expired => Err(Self::link_not_found(code)),
        }
    }

    /// Deletes expired links and returns how many were removed.
    pub async fn sweep_expired(&self) -> Result<u64, AppError> {
        let removed = self
            .bounded("sweep", self.store.sweep_expired(Utc::now()))
            .await?;

        info!(removed, "Expired links swept");
        Ok(removed)
    }

    /// Checks store connectivity.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.bounded("ping", self.store.ping()).await
    }

    /// Constructs the full short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), code)
    }

    pub fn settings(&self) -> &LinkServiceSettings {
        &self.settings
    }

    fn effective_expiry(
        &self,
        requested: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, AppError> {
        match requested {
            Some(at) if at <= now => Err(AppError::bad_request(
                "expires_at must be in the future",
                json!({ "expires_at": at }),
            )),
            Some(at) => Ok(Some(at)),
            None => match self.settings.default_ttl {
                None => Ok(None),
                Some(ttl) => now.checked_add_signed(ttl).map(Some).ok_or_else(|| {
                    warn!(ttl_secs = ttl.num_seconds(), "Default link TTL out of range");
                    AppError::internal(
                        "Default link TTL is out of range",
                        json!({ "ttl_seconds": ttl.num_seconds() }),
                    )
                }),
            },
        }
    }

    fn link_not_found(code: &str) -> AppError {
        AppError::not_found("Short link not found", json!({ "code": code }))
    }

    /// Runs a store operation under the configured timeout.
    async fn bounded<T, E>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T, E>>,
    ) -> Result<T, AppError>
    where
        AppError: From<E>,
    {
        match tokio::time::timeout(self.settings.store_timeout, fut).await {
            Ok(result) => result.map_err(AppError::from),
            Err(_) => {
                warn!(operation, timeout = ?self.settings.store_timeout, "Link store timed out");
                Err(AppError::unavailable(
                    "Link store did not respond in time, try again later",
                    json!({ "operation": operation }),
                ))
            }
        }
    }
}
