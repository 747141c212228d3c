//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

type RateLimitLayer<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates the rate limiter for API endpoints.
///
/// # Limits
///
/// - **Rate**: 1 request replenished per second
/// - **Burst**: 20 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Use [`PeerIpKeyExtractor`] for direct deployments and
/// [`SmartIpKeyExtractor`] (forwarding headers, then peer address) behind a
/// trusted reverse proxy; see [`peer_layer`] and [`proxy_layer`].
pub fn layer<K: KeyExtractor>(key_extractor: K) -> RateLimitLayer<K> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(1)
            .burst_size(20)
            .key_extractor(key_extractor)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Limiter keyed by the socket peer address.
pub fn peer_layer() -> RateLimitLayer<PeerIpKeyExtractor> {
    layer(PeerIpKeyExtractor)
}

/// Limiter keyed by `X-Forwarded-For` / `X-Real-IP` / `Forwarded`.
pub fn proxy_layer() -> RateLimitLayer<SmartIpKeyExtractor> {
    layer(SmartIpKeyExtractor)
}
