use std::net::SocketAddr;

use http::HeaderMap;

pub mod response;

/// Placeholder used whenever a piece of visitor data could not be determined.
pub const UNKNOWN: &str = "Unknown";

/// Headers carrying the original client address, in the order they are
/// trusted. Only the first element of `X-Forwarded-For` is considered.
pub const CLIENT_ADDRESS_HEADERS: [&str; 5] = [
    "X-Forwarded-For",
    "X-Real-IP",
    "CF-Connecting-IP",
    "Fastly-Client-IP",
    "X-Cluster-Client-IP",
];

/// Resolves the client address of a request.
///
/// Returns the first non-empty value among [`CLIENT_ADDRESS_HEADERS`] and the
/// transport peer address, or [`UNKNOWN`] if none of them yields a value. The
/// value is not validated as an IP address.
#[must_use]
pub fn resolve_client_address(headers: &HeaderMap, peer: Option<&SocketAddr>) -> String {
    let from_headers = CLIENT_ADDRESS_HEADERS.iter().find_map(|name| {
        let value = headers.get(*name)?.to_str().ok()?;
        let candidate = if name.eq_ignore_ascii_case("X-Forwarded-For") {
            value.split(',').next().unwrap_or_default()
        } else {
            value
        };
        let candidate = candidate.trim();
        (!candidate.is_empty()).then(|| candidate.to_string())
    });

    let peer_address = peer.map(|addr| addr.ip().to_canonical().to_string());

    tracing::debug!(?from_headers, ?peer_address, "resolve client address");

    from_headers.or(peer_address).unwrap_or_else(|| UNKNOWN.to_string())
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    use http::HeaderValue;

    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            drop(headers.insert(*name, HeaderValue::from_static(value)));
        }
        headers
    }

    const PEER: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 9)), 51234);

    #[test]
    fn test_forwarded_for_takes_first_element() {
        let headers = headers(&[
            ("x-forwarded-for", "203.0.113.7, 10.0.0.1, 10.0.0.2"),
            ("x-real-ip", "198.51.100.1"),
        ]);
        assert_eq!(resolve_client_address(&headers, Some(&PEER)), "203.0.113.7");
    }

    #[test]
    fn test_priority_order() {
        let all = [
            ("x-forwarded-for", "1.1.1.1"),
            ("x-real-ip", "2.2.2.2"),
            ("cf-connecting-ip", "3.3.3.3"),
            ("fastly-client-ip", "4.4.4.4"),
            ("x-cluster-client-ip", "5.5.5.5"),
        ];

        for skip in 0..all.len() {
            let headers = headers(&all[skip..]);
            assert_eq!(resolve_client_address(&headers, Some(&PEER)), all[skip].1);
        }

        assert_eq!(resolve_client_address(&HeaderMap::new(), Some(&PEER)), "10.0.0.9");
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let headers = headers(&[
            ("x-forwarded-for", " , 1.1.1.1"),
            ("x-real-ip", ""),
            ("cf-connecting-ip", "   "),
            ("fastly-client-ip", "2001:db8::1"),
        ]);
        assert_eq!(resolve_client_address(&headers, Some(&PEER)), "2001:db8::1");
    }

    #[test]
    fn test_values_are_not_validated() {
        let headers = headers(&[("x-real-ip", "not-an-ip")]);
        assert_eq!(resolve_client_address(&headers, None), "not-an-ip");
    }

    #[test]
    fn test_unknown_when_nothing_available() {
        assert_eq!(resolve_client_address(&HeaderMap::new(), None), UNKNOWN);
        assert_eq!(resolve_client_address(&headers(&[("x-forwarded-for", "")]), None), UNKNOWN);
    }

    #[test]
    fn test_mapped_peer_address_is_canonical() {
        let mapped = Ipv4Addr::new(192, 0, 2, 33).to_ipv6_mapped();
        let peer = SocketAddr::new(IpAddr::V6(mapped), 443);
        assert_eq!(resolve_client_address(&HeaderMap::new(), Some(&peer)), "192.0.2.33");

        let peer = SocketAddr::new(IpAddr::V6(Ipv6Addr::LOCALHOST), 443);
        assert_eq!(resolve_client_address(&HeaderMap::new(), Some(&peer)), "::1");
    }
}
