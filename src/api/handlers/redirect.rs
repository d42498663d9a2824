//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Resolution is a pure read; nothing about the link changes on redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist or has expired.
/// Returns 503 Service Unavailable if the store cannot be reached.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.resolve_short_link(&code).await?;

    debug!(code = %code, target = %link.original_url, "Redirecting");

    Ok(Redirect::temporary(&link.original_url))
}
