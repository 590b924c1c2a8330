//! Local address discovery

use std::net::{IpAddr, Ipv4Addr, UdpSocket};

/// Primary IPv4 address of this machine.
///
/// Connecting a UDP socket only selects a route; no packet leaves the host.
pub fn get_local_ip() -> Option<Ipv4Addr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;

    match socket.local_addr().ok()?.ip() {
        IpAddr::V4(ip) if !ip.is_unspecified() => Some(ip),
        _ => None,
    }
}

/// The /24 that contains `ip`, in CIDR notation
pub fn subnet_of(ip: Ipv4Addr) -> String {
    let [a, b, c, _] = ip.octets();
    format!("{}.{}.{}.0/24", a, b, c)
}

/// Scan target used when none is given: the local /24
pub fn default_target() -> Option<String> {
    let ip = get_local_ip()?;
    log::info!("Local address {} selected for default target", ip);
    Some(subnet_of(ip))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subnet_of() {
        assert_eq!(subnet_of(Ipv4Addr::new(192, 168, 1, 37)), "192.168.1.0/24");
        assert_eq!(subnet_of(Ipv4Addr::new(10, 20, 30, 40)), "10.20.30.0/24");
    }
}
