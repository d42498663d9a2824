//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::CreatedLink;

/// Request to shorten a single URL.
///
/// The URL may omit its scheme (`example.com`); full validation happens in
/// [`crate::application::services::LinkService::create_short_link`].
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// Optional expiry timestamp (RFC 3339). Must be in the future.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Newly created short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<CreatedLink> for ShortenResponse {
    fn from(link: CreatedLink) -> Self {
        Self {
            short_code: link.short_code,
            short_url: link.short_url,
            original_url: link.original_url,
            expires_at: link.expires_at,
        }
    }
}
