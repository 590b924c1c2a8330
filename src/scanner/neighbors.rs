//! ARP neighbour table parsing
//!
//! Handles the BSD/macOS form `? (192.168.1.4) at 0:11:22:33:44:55 on en0 ifscope [ethernet]`,
//! the Linux net-tools form `cam.lan (192.168.1.4) at 00:11:22:33:44:55 [ether] on eth0`,
//! and any line that simply carries an IPv4 address followed by a MAC.

use std::collections::HashSet;
use std::net::Ipv4Addr;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::classifier::{estimate_camera_location, parse_ipv4, LocationZone};
use crate::ScanError;

lazy_static::lazy_static! {
    static ref IPV4_PATTERN: Regex = Regex::new(r"\b(\d{1,3}(?:\.\d{1,3}){3})\b").unwrap();
    static ref MAC_PATTERN: Regex =
        Regex::new(r"(?i)\b([0-9a-f]{1,2}(?:[:-][0-9a-f]{1,2}){5})\b").unwrap();
    static ref INTERFACE_PATTERN: Regex = Regex::new(r"\bon\s+([\w.\-]+)").unwrap();
}

/// One resolved entry of the neighbour table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    pub ip: Ipv4Addr,
    /// Lowercase, colon separated, zero padded
    pub mac: String,
    pub hostname: Option<String>,
    pub interface: Option<String>,
}

impl Neighbor {
    pub fn location(&self) -> LocationZone {
        estimate_camera_location(&self.ip.to_string())
    }
}

/// Parse `arp -a` output. Incomplete entries (no MAC) are skipped and
/// duplicate addresses keep their first entry.
pub fn parse_arp_table(output: &str) -> Vec<Neighbor> {
    let mut seen = HashSet::new();

    output
        .lines()
        .filter_map(parse_arp_line)
        .filter(|neighbor| seen.insert(neighbor.ip))
        .collect()
}

fn parse_arp_line(line: &str) -> Option<Neighbor> {
    let ip = IPV4_PATTERN
        .captures_iter(line)
        .filter_map(|c| c.get(1))
        .find_map(|m| parse_ipv4(m.as_str()))?;

    let mac = normalize_mac(MAC_PATTERN.captures(line)?.get(1)?.as_str());

    let hostname = line
        .split_whitespace()
        .next()
        .filter(|first| *first != "?" && !first.starts_with('(') && parse_ipv4(first).is_none())
        .map(str::to_string);

    let interface = INTERFACE_PATTERN
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());

    Some(Neighbor {
        ip,
        mac,
        hostname,
        interface,
    })
}

fn normalize_mac(raw: &str) -> String {
    raw.split(|c| c == ':' || c == '-')
        .map(|part| format!("{:0>2}", part.to_lowercase()))
        .collect::<Vec<_>>()
        .join(":")
}

/// Run `arp -a` and parse its output
pub async fn read_arp_table() -> crate::Result<Vec<Neighbor>> {
    let output = Command::new("arp")
        .arg("-a")
        .output()
        .await
        .map_err(|e| ScanError::NetworkError(format!("Failed to run arp: {}", e)))?;

    if !output.status.success() {
        return Err(ScanError::NetworkError(format!(
            "arp exited with {}",
            output.status
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let neighbors = parse_arp_table(&stdout);
    log::info!("Read {} neighbours from the ARP table", neighbors.len());
    Ok(neighbors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bsd_format() {
        let output = "? (192.168.1.1) at 0:11:22:a:bb:cc on en0 ifscope [ethernet]\n\
                      ? (192.168.1.7) at (incomplete) on en0 ifscope [ethernet]\n";
        let neighbors = parse_arp_table(output);

        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].ip, Ipv4Addr::new(192, 168, 1, 1));
        assert_eq!(neighbors[0].mac, "00:11:22:0a:bb:cc");
        assert_eq!(neighbors[0].hostname, None);
        assert_eq!(neighbors[0].interface.as_deref(), Some("en0"));
    }

    #[test]
    fn test_linux_format() {
        let output = "ipcam.lan (192.168.1.64) at 44:19:b6:12:34:56 [ether] on eth0\n";
        let neighbors = parse_arp_table(output);

        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].hostname.as_deref(), Some("ipcam.lan"));
        assert_eq!(neighbors[0].interface.as_deref(), Some("eth0"));
        assert_eq!(neighbors[0].location(), LocationZone::OfficeArea);
    }

    #[test]
    fn test_loose_format_and_duplicates() {
        let output = "\n192.168.1.1 (aa:bb:cc:dd:ee:ff) at 192.168.1.1 on en0\n\
                      192.168.1.100 (ff:ee:dd:cc:bb:aa) at 192.168.1.100 on en0 ifscope [ethernet]\n\
                      192.168.1.1 (aa:bb:cc:dd:ee:ff) at 192.168.1.1 on en1\n\
                      garbage line\n";
        let neighbors = parse_arp_table(output);

        assert_eq!(neighbors.len(), 2);
        assert_eq!(neighbors[0].mac, "aa:bb:cc:dd:ee:ff");
        assert_eq!(neighbors[0].hostname, None);
        assert_eq!(neighbors[1].ip, Ipv4Addr::new(192, 168, 1, 100));
    }

    #[test]
    fn test_out_of_range_address_is_skipped() {
        assert!(parse_arp_table("? (192.168.1.300) at aa:bb:cc:dd:ee:ff on en0").is_empty());
    }
}
