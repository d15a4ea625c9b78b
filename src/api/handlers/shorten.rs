//! Handler for link shortening endpoint.

use axum::{Json, extract::State};
use chrono::Utc;
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_normalizer::normalize_url;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/a",
///   "custom_alias": "mylink",              // optional
///   "expires_at": "2030-01-01T00:00:00Z"  // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "short_url": "http://localhost:8080/mylink", "code": "mylink" }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the URL, alias or expiry is invalid
/// - 409 Conflict if the alias is already taken
/// - 500 Internal Server Error if allocation or storage fails
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(mut payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.custom_alias = payload.custom_alias.filter(|alias| !alias.is_empty());
    payload.validate()?;

    let long_url = normalize_url(&payload.url).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    if let Some(expires_at) = payload.expires_at
        && expires_at <= Utc::now()
    {
        return Err(AppError::bad_request(
            "Expiration time must be in the future",
            json!({ "expires_at": expires_at }),
        ));
    }

    let code = state
        .url_service
        .create_short_url(long_url, payload.custom_alias, payload.expires_at)
        .await?;

    Ok(Json(ShortenResponse {
        short_url: state.short_url(&code),
        code,
    }))
}
