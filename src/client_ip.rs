//! Client address resolution.
//!
//! [`resolve_client_address`] works out the originating caller's IP from
//! proxy headers, falling back to the connection's peer address.

use axum::http::HeaderMap;

const X_REAL_IP: &str = "x-real-ip";
const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Resolve the client address for a request.
///
/// Precedence: `X-Real-IP`, then the left-most `X-Forwarded-For` entry, then
/// the host part of `peer_addr`. Returns an empty string when none of them
/// yields an address.
#[must_use]
pub fn resolve_client_address(headers: &HeaderMap, peer_addr: &str) -> String {
    if let Some(real_ip) = header_trimmed(headers, X_REAL_IP) {
        return real_ip;
    }

    // Format: client, proxy1, proxy2
    if let Some(forwarded) = header_trimmed(headers, X_FORWARDED_FOR) {
        let first = forwarded.split(',').next().unwrap_or_default();
        return first.to_string();
    }

    split_host(peer_addr.trim()).unwrap_or_default().to_string()
}

/// First value of `name`, trimmed. Non-ASCII bytes are decoded lossily
/// rather than dropping the header.
fn header_trimmed(headers: &HeaderMap, name: &str) -> Option<String> {
    let value = String::from_utf8_lossy(headers.get(name)?.as_bytes());
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Host part of a `host:port` address. Bracketed IPv6 (`[::1]:80`) is
/// unwrapped; a missing port or a bare IPv6 address is rejected.
fn split_host(addr: &str) -> Option<&str> {
    if let Some(rest) = addr.strip_prefix('[') {
        let (host, tail) = rest.split_once(']')?;
        tail.strip_prefix(':')?;
        return Some(host);
    }

    let (host, _port) = addr.rsplit_once(':')?;
    if host.contains(':') {
        return None;
    }
    Some(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, value.parse().unwrap());
        }
        map
    }

    #[test]
    fn real_ip_wins_over_everything() {
        let map = headers(&[
            ("x-real-ip", "  203.0.113.7 "),
            ("x-forwarded-for", "1.2.3.4, 5.6.7.8"),
        ]);
        assert_eq!(resolve_client_address(&map, "10.0.0.5:54321"), "203.0.113.7");
    }

    #[test]
    fn forwarded_for_returns_left_most_entry() {
        let map = headers(&[("x-forwarded-for", "1.2.3.4, 5.6.7.8")]);
        assert_eq!(resolve_client_address(&map, "10.0.0.5:54321"), "1.2.3.4");
    }

    #[test]
    fn blank_real_ip_falls_through_to_forwarded_for() {
        let map = headers(&[("x-real-ip", "   "), ("x-forwarded-for", "1.2.3.4, 5.6.7.8")]);
        assert_eq!(resolve_client_address(&map, ""), "1.2.3.4");
    }

    #[test]
    fn forwarded_for_first_entry_is_not_trimmed_further() {
        let map = headers(&[("x-forwarded-for", "1.2.3.4 , 5.6.7.8")]);
        assert_eq!(resolve_client_address(&map, ""), "1.2.3.4 ");
    }

    #[test]
    fn peer_address_host_is_used_without_headers() {
        assert_eq!(
            resolve_client_address(&HeaderMap::new(), "10.0.0.5:54321"),
            "10.0.0.5"
        );
    }

    #[test]
    fn peer_address_is_trimmed() {
        assert_eq!(
            resolve_client_address(&HeaderMap::new(), " 10.0.0.5:80 "),
            "10.0.0.5"
        );
    }

    #[test]
    fn bracketed_ipv6_peer_is_unwrapped() {
        assert_eq!(resolve_client_address(&HeaderMap::new(), "[::1]:8080"), "::1");
    }

    #[test]
    fn peer_without_port_yields_empty() {
        assert_eq!(resolve_client_address(&HeaderMap::new(), "10.0.0.5"), "");
        assert_eq!(resolve_client_address(&HeaderMap::new(), ""), "");
    }

    #[test]
    fn bare_ipv6_peer_yields_empty() {
        assert_eq!(resolve_client_address(&HeaderMap::new(), "fe80::1:80"), "");
    }

    #[test]
    fn only_first_real_ip_value_is_consulted() {
        let map = headers(&[("x-real-ip", "198.51.100.1"), ("x-real-ip", "198.51.100.2")]);
        assert_eq!(resolve_client_address(&map, ""), "198.51.100.1");
    }

    #[test]
    fn non_ascii_header_value_is_still_used() {
        let mut map = HeaderMap::new();
        map.insert(
            "x-real-ip",
            axum::http::HeaderValue::from_bytes(b"10.0.0.\xe9").unwrap(),
        );
        assert_eq!(resolve_client_address(&map, "10.0.0.5:80"), "10.0.0.\u{fffd}");
    }
}
