//! IPv4 address parsing and private-range membership

use std::net::Ipv4Addr;

/// Parse a strict dotted-quad IPv4 address.
///
/// Exactly four segments, digits only, each in `0..=255`. Anything else
/// (signs, whitespace, empty segments, IPv6) yields `None`.
pub fn parse_ipv4(ip: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut count = 0;

    for segment in ip.split('.') {
        if count == 4 {
            return None;
        }
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        octets[count] = segment.parse::<u8>().ok()?;
        count += 1;
    }

    if count != 4 {
        return None;
    }

    Some(Ipv4Addr::from(octets))
}

/// Returns true if `ip` is in 10/8, 172.16/12, 192.168/16 or 127/8.
///
/// Malformed input is never local.
pub fn is_local_ip(ip: &str) -> bool {
    match parse_ipv4(ip) {
        Some(addr) => is_local_addr(addr),
        None => false,
    }
}

/// Same range test on an already parsed address
pub fn is_local_addr(addr: Ipv4Addr) -> bool {
    let [a, b, _, _] = addr.octets();

    a == 10
        || a == 127
        || (a == 172 && (16..=31).contains(&b))
        || (a == 192 && b == 168)
}
