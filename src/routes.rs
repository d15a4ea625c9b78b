//! Top-level router combining the API routes with middleware.
//!
//! # Route Structure
//!
//! - `POST /shorten`       - Create a short URL
//! - `GET  /{code}`        - Redirect
//! - `GET  /{code}/stats`  - Redirect statistics
//! - `GET  /health`        - Storage health check
//!
//! # Middleware
//!
//! - **Panic recovery** - a panicking handler answers 500
//! - **Tracing** - structured request/response logging
//! - **CORS** - any origin
//! - **Rate limiting** - per-IP token bucket, when enabled
//! - **Path normalization** - trailing slash handling

use crate::api;
use crate::api::middleware::{cors, rate_limit, tracing};
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use tower::Layer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit_per_minute` - per-IP budget; `None` disables rate limiting.
///   When enabled the router must be served with connect info.
///
/// # Errors
///
/// Returns an error if the rate limiter cannot be configured.
pub fn app_router(
    state: AppState,
    rate_limit_per_minute: Option<u32>,
) -> Result<NormalizePath<Router>> {
    let mut router = api::routes::public_routes().with_state(state);

    if let Some(limit) = rate_limit_per_minute {
        router = router.layer(rate_limit::layer(limit)?);
    }

    let router = router
        .layer(cors::layer())
        .layer(tracing::layer())
        .layer(CatchPanicLayer::new());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
