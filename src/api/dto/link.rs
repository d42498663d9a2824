//! DTOs for link metadata endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Link;

/// Metadata of an active short link.
#[derive(Debug, Serialize)]
pub struct LinkInfoResponse {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl LinkInfoResponse {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            short_code: link.short_code,
            short_url,
            original_url: link.original_url,
            created_at: link.created_at,
            expires_at: link.expires_at,
        }
    }
}
