//! Client identity extraction for rate limiting.
//!
//! Rate limit counters are keyed by client IP. Direct deployments read the
//! peer address; deployments behind a trusted reverse proxy opt in to the
//! forwarded headers via `BEHIND_PROXY`, otherwise those headers are
//! ignored since any client can forge them.

use std::net::{IpAddr, SocketAddr};

use axum::extract::ConnectInfo;
use axum::http::{Extensions, HeaderMap};

/// Resolves the identity a request is rate limited under.
///
/// With `behind_proxy` set, the first valid IP in `X-Forwarded-For` wins,
/// then `X-Real-IP`. In all other cases the connection's peer address is
/// used. Requests with no usable source collapse into a shared bucket.
pub fn client_identity(headers: &HeaderMap, extensions: &Extensions, behind_proxy: bool) -> String {
    if behind_proxy && let Some(ip) = forwarded_ip(headers) {
        return ip.to_string();
    }

    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    if let Some(value) = headers.get("x-forwarded-for")
        && let Ok(list) = value.to_str()
        && let Some(first) = list.split(',').next()
        && let Ok(ip) = first.trim().parse::<IpAddr>()
    {
        return Some(ip);
    }

    if let Some(value) = headers.get("x-real-ip")
        && let Ok(text) = value.to_str()
        && let Ok(ip) = text.trim().parse::<IpAddr>()
    {
        return Some(ip);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer_extensions(addr: &str) -> Extensions {
        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo(addr.parse::<SocketAddr>().unwrap()));
        extensions
    }

    #[test]
    fn test_uses_peer_address_by_default() {
        let headers = HeaderMap::new();
        let extensions = peer_extensions("10.0.0.7:43210");

        assert_eq!(client_identity(&headers, &extensions, false), "10.0.0.7");
    }

    #[test]
    fn test_ignores_forwarded_headers_without_proxy_flag() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.9"));
        let extensions = peer_extensions("10.0.0.7:43210");

        assert_eq!(client_identity(&headers, &extensions, false), "10.0.0.7");
    }

    #[test]
    fn test_forwarded_for_takes_first_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1, 10.0.0.2"),
        );
        let extensions = peer_extensions("10.0.0.7:43210");

        assert_eq!(client_identity(&headers, &extensions, true), "203.0.113.9");
    }

    #[test]
    fn test_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));
        let extensions = peer_extensions("10.0.0.7:43210");

        assert_eq!(client_identity(&headers, &extensions, true), "198.51.100.4");
    }

    #[test]
    fn test_garbage_forwarded_value_falls_back_to_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("not-an-ip"));
        let extensions = peer_extensions("10.0.0.7:43210");

        assert_eq!(client_identity(&headers, &extensions, true), "10.0.0.7");
    }

    #[test]
    fn test_ipv6_peer_address() {
        let headers = HeaderMap::new();
        let extensions = peer_extensions("[2001:db8::1]:8080");

        assert_eq!(client_identity(&headers, &extensions, false), "2001:db8::1");
    }

    #[test]
    fn test_no_source_collapses_to_unknown() {
        let headers = HeaderMap::new();
        let extensions = Extensions::new();

        assert_eq!(client_identity(&headers, &extensions, true), "unknown");
    }
}
