//! Client key extraction for login throttling.

use axum::http::Request;
use tower_governor::key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor};

/// Key used when neither a peer address nor a proxy header is available.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Derives the key under which failed logins are counted.
///
/// Uses the same extractors as the request rate limiter, so both count a
/// client under one address: [`SmartIpKeyExtractor`] behind a trusted proxy
/// (`X-Forwarded-For`, `X-Real-IP`, `Forwarded`, then the peer), otherwise
/// [`PeerIpKeyExtractor`].
pub fn client_key<B>(req: &Request<B>, behind_proxy: bool) -> String {
    let ip = if behind_proxy {
        SmartIpKeyExtractor.extract(req)
    } else {
        PeerIpKeyExtractor.extract(req)
    };

    ip.map(|ip| ip.to_string())
        .unwrap_or_else(|_| UNKNOWN_CLIENT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::ConnectInfo;
    use std::net::SocketAddr;

    fn request(headers: &[(&str, &str)], peer: Option<&str>) -> Request<()> {
        let mut builder = Request::builder().uri("/api/me");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let mut req = builder.body(()).unwrap();
        if let Some(peer) = peer {
            let addr: SocketAddr = peer.parse().unwrap();
            req.extensions_mut().insert(ConnectInfo(addr));
        }
        req
    }

    #[test]
    fn test_peer_address_without_proxy() {
        let req = request(&[], Some("192.0.2.10:54321"));
        assert_eq!(client_key(&req, false), "192.0.2.10");
    }

    #[test]
    fn test_forwarding_headers_ignored_without_proxy() {
        let req = request(
            &[("x-forwarded-for", "203.0.113.7"), ("forwarded", "for=198.51.100.9")],
            Some("192.0.2.10:54321"),
        );
        assert_eq!(client_key(&req, false), "192.0.2.10");
    }

    #[test]
    fn test_forwarded_for_behind_proxy() {
        let req = request(
            &[("x-forwarded-for", " 203.0.113.7 , 10.0.0.1")],
            Some("192.0.2.10:54321"),
        );
        assert_eq!(client_key(&req, true), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_behind_proxy() {
        let req = request(&[("x-real-ip", "198.51.100.2")], None);
        assert_eq!(client_key(&req, true), "198.51.100.2");
    }

    #[test]
    fn test_standard_forwarded_header_behind_proxy() {
        let req = request(
            &[("forwarded", "for=198.51.100.9;proto=https")],
            Some("192.0.2.10:54321"),
        );
        assert_eq!(client_key(&req, true), "198.51.100.9");
    }

    #[test]
    fn test_matches_rate_limiter_key() {
        let req = request(
            &[("forwarded", "for=\"[2001:db8::7]:4711\"")],
            Some("192.0.2.10:54321"),
        );
        let limiter_key = SmartIpKeyExtractor.extract(&req).unwrap();
        assert_eq!(client_key(&req, true), limiter_key.to_string());
    }

    #[test]
    fn test_unknown_when_nothing_available() {
        assert_eq!(client_key(&request(&[], None), true), UNKNOWN_CLIENT);
        assert_eq!(client_key(&request(&[], None), false), UNKNOWN_CLIENT);
    }
}
