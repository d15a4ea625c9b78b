//! Per-client rate limiting using a token bucket.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a limiter allowing `requests_per_minute` requests per client IP.
///
/// The bucket holds a full minute's budget and refills one token every
/// `60_000 / requests_per_minute` milliseconds. Requests exceeding the limit
/// receive `429 Too Many Requests`.
///
/// The client IP is the socket peer address, so the router must be served
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Errors
///
/// Returns an error if `requests_per_minute` is zero.
pub fn layer(requests_per_minute: u32) -> Result<RateLimitLayer> {
    anyhow::ensure!(requests_per_minute > 0, "rate limit must be positive");

    let replenish_ms = (60_000 / u64::from(requests_per_minute)).max(1);

    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(replenish_ms)
        .burst_size(requests_per_minute)
        .finish()
        .context("invalid rate limiter configuration")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
