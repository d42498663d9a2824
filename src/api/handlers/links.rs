//! Handler for link metadata endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::link::LinkInfoResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns metadata for an active short link.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Response
///
/// ```json
/// {
///   "short_code": "aB3xZ9",
///   "short_url": "https://s.example.com/aB3xZ9",
///   "original_url": "https://openai.com",
///   "created_at": "2025-01-01T12:00:00Z",
///   "expires_at": null
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist or has expired.
pub async fn link_info_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkInfoResponse>, AppError> {
    let link = state.link_service.resolve_short_link(&code).await?;
    let short_url = state.link_service.short_url(&link.short_code);

    Ok(Json(LinkInfoResponse::new(link, short_url)))
}
