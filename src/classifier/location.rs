//! Coarse physical zone from the last octet of an address
//!
//! Purely a display heuristic: many sites hand out camera addresses by
//! area, so the host number hints at where the device hangs.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::address::parse_ipv4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LocationZone {
    Infrastructure,
    OfficeArea,
    CommonAreas,
    Perimeter,
    RemoteAreas,
    Unknown,
}

impl LocationZone {
    pub fn label(&self) -> &'static str {
        match self {
            LocationZone::Infrastructure => "Infrastructure/Server Room",
            LocationZone::OfficeArea => "Office Area",
            LocationZone::CommonAreas => "Common Areas",
            LocationZone::Perimeter => "Perimeter",
            LocationZone::RemoteAreas => "Remote Areas",
            LocationZone::Unknown => "Unknown",
        }
    }

    /// Zone for a host octet. 0 and 255 are network/broadcast and map to Unknown.
    pub fn from_host_octet(octet: u8) -> Self {
        match octet {
            1..=50 => LocationZone::Infrastructure,
            51..=100 => LocationZone::OfficeArea,
            101..=150 => LocationZone::CommonAreas,
            151..=200 => LocationZone::Perimeter,
            201..=254 => LocationZone::RemoteAreas,
            _ => LocationZone::Unknown,
        }
    }
}

impl fmt::Display for LocationZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

pub fn estimate_camera_location(ip: &str) -> LocationZone {
    match parse_ipv4(ip) {
        Some(addr) => LocationZone::from_host_octet(addr.octets()[3]),
        None => LocationZone::Unknown,
    }
}
