//! Network address predicates: `url` and `ip`.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use url::Url;

use crate::core::value::Value;

/// Passes when the value parses as an absolute URL with a host component
/// (so `mailto:` and other host-less schemes fail).
#[must_use]
pub fn url(value: &Value) -> bool {
    Url::parse(&value.as_text()).is_ok_and(|parsed| parsed.has_host())
}

/// Passes for a syntactically valid IP address outside the reserved
/// ranges; private ranges are additionally rejected when `allow_private`
/// is false.
#[must_use]
pub fn ip(value: &Value, allow_private: bool) -> bool {
    match value.as_text().parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => !reserved_v4(v4) && (allow_private || !v4.is_private()),
        Ok(IpAddr::V6(v6)) => !reserved_v6(v6) && (allow_private || !private_v6(v6)),
        Err(_) => false,
    }
}

fn reserved_v4(ip: Ipv4Addr) -> bool {
    ip.is_unspecified()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_broadcast()
        || ip.is_documentation()
        || ip.is_multicast()
        // 240.0.0.0/4, reserved for future use
        || ip.octets()[0] >= 240
}

fn reserved_v6(ip: Ipv6Addr) -> bool {
    ip.is_unspecified() || ip.is_loopback() || ip.is_multicast()
}

fn private_v6(ip: Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    // fc00::/7 unique local, fe80::/10 link local
    (first & 0xfe00) == 0xfc00 || (first & 0xffc0) == 0xfe80
}

// ============================================================================
// TESTS
// ============================================================================
