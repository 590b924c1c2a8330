//! Target parsing: single addresses, IPv4 CIDR blocks and hostnames

use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};
use std::str::FromStr;

use ipnetwork::Ipv4Network;

use crate::{Result, ScanError};

/// Type of target being scanned
#[derive(Debug, Clone, PartialEq)]
pub enum TargetType {
    SingleIp,
    Ipv4Cidr,
    Hostname,
}

/// Represents a parsed target with its type and addresses
#[derive(Debug, Clone)]
pub struct ParsedTarget {
    pub original: String,
    pub target_type: TargetType,
    pub addresses: Vec<IpAddr>,
}

/// Target parser with CIDR support
pub struct TargetParser {
    max_hosts: usize,
    resolve_hostnames: bool,
}

impl Default for TargetParser {
    fn default() -> Self {
        Self {
            max_hosts: 65_536,
            resolve_hostnames: true,
        }
    }
}

impl TargetParser {
    pub fn new(max_hosts: usize, resolve_hostnames: bool) -> Self {
        Self {
            max_hosts,
            resolve_hostnames,
        }
    }

    /// Parse a target string into a ParsedTarget
    pub fn parse_target(&self, target: &str) -> Result<ParsedTarget> {
        let target = target.trim();

        if target.is_empty() {
            return Err(ScanError::InvalidTarget("Target cannot be empty".to_string()));
        }

        if target.contains('/') {
            return self.parse_ipv4_cidr(target);
        }

        if let Ok(ip) = IpAddr::from_str(target) {
            return Ok(ParsedTarget {
                original: target.to_string(),
                target_type: TargetType::SingleIp,
                addresses: vec![ip],
            });
        }

        if self.resolve_hostnames {
            return self.resolve_hostname(target);
        }

        Err(ScanError::InvalidTarget(format!("Invalid target format: {}", target)))
    }

    /// Parse IPv4 CIDR notation. Host bits in the address are ignored.
    fn parse_ipv4_cidr(&self, target: &str) -> Result<ParsedTarget> {
        let (addr, prefix) = target
            .split_once('/')
            .ok_or_else(|| ScanError::InvalidTarget(format!("Invalid CIDR format: {}", target)))?;

        let network_addr = Ipv4Addr::from_str(addr)
            .map_err(|e| ScanError::InvalidTarget(format!("Invalid IPv4 address in CIDR '{}': {}", target, e)))?;
        let prefix_length: u8 = prefix
            .parse()
            .map_err(|e| ScanError::InvalidTarget(format!("Invalid prefix length '{}': {}", prefix, e)))?;

        if prefix_length > 32 {
            return Err(ScanError::InvalidTarget(
                "IPv4 prefix length cannot exceed 32".to_string(),
            ));
        }

        let network = Ipv4Network::new(network_addr, prefix_length)
            .and_then(|block| Ipv4Network::new(block.network(), prefix_length))
            .map_err(|e| ScanError::InvalidTarget(format!("Invalid CIDR '{}': {}", target, e)))?;

        let addresses = self.expand_ipv4_cidr(network)?;
        log::info!("CIDR {} expanded to {} hosts", target, addresses.len());

        Ok(ParsedTarget {
            original: target.to_string(),
            target_type: TargetType::Ipv4Cidr,
            addresses,
        })
    }

    /// Expand a CIDR block, skipping network and broadcast for prefixes below /31
    fn expand_ipv4_cidr(&self, network: Ipv4Network) -> Result<Vec<IpAddr>> {
        let block_size = u64::from(network.size());

        if block_size > self.max_hosts as u64 {
            return Err(ScanError::InvalidTarget(format!(
                "CIDR network too large: {} addresses (max: {})",
                block_size, self.max_hosts
            )));
        }

        let skip_edges = network.prefix() < 31;
        let (network_addr, broadcast) = (network.network(), network.broadcast());

        Ok(network
            .iter()
            .filter(|addr| !skip_edges || (*addr != network_addr && *addr != broadcast))
            .map(IpAddr::V4)
            .collect())
    }

    /// Resolve hostname to IP addresses
    fn resolve_hostname(&self, hostname: &str) -> Result<ParsedTarget> {
        let socket_addrs = format!("{}:80", hostname)
            .to_socket_addrs()
            .map_err(|e| ScanError::InvalidTarget(format!("Failed to resolve {}: {}", hostname, e)))?;

        let mut seen = HashSet::new();
        let addresses: Vec<IpAddr> = socket_addrs
            .map(|addr| addr.ip())
            .filter(|ip| seen.insert(*ip))
            .collect();

        if addresses.is_empty() {
            return Err(ScanError::InvalidTarget(format!(
                "No addresses resolved for hostname {}",
                hostname
            )));
        }

        Ok(ParsedTarget {
            original: hostname.to_string(),
            target_type: TargetType::Hostname,
            addresses,
        })
    }
}
