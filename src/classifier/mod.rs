//! Network device classifier
//!
//! Turns one observation of a network endpoint (address, TCP port, banner)
//! into a camera classification. Every function here is pure and total:
//! malformed input degrades to a fallback value (`false`, "Unknown", an
//! empty set or no device type) instead of an error.

pub mod address;
pub mod brand;
pub mod capabilities;
pub mod device_type;
pub mod location;
pub mod security;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use address::{is_local_ip, parse_ipv4};
pub use brand::{identify_camera_brand_model, BrandModel, BRAND_TABLE, UNKNOWN_BRAND};
pub use capabilities::{detect_camera_capabilities, Capability};
pub use device_type::{identify_camera_type, CameraType};
pub use location::{estimate_camera_location, LocationZone};
pub use security::{check_camera_security, SecurityIssue};

/// What a scanner saw on one open port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkObservation {
    pub ip: String,
    pub port: u16,
    /// Raw response text, possibly empty
    pub banner: String,
}

impl NetworkObservation {
    pub fn new(ip: impl Into<String>, port: u16, banner: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            port,
            banner: banner.into(),
        }
    }
}

/// Derived attributes of an observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub device_type: Option<CameraType>,
    pub brand: BrandModel,
    pub capabilities: BTreeSet<Capability>,
    pub security_issues: BTreeSet<SecurityIssue>,
    pub location: LocationZone,
}

impl ClassificationResult {
    pub fn is_camera(&self) -> bool {
        self.device_type.is_some()
    }
}

/// Run every classifier over one observation.
pub fn classify(observation: &NetworkObservation) -> ClassificationResult {
    let banner = observation.banner.as_str();

    ClassificationResult {
        device_type: identify_camera_type(banner, observation.port),
        brand: identify_camera_brand_model(banner),
        capabilities: detect_camera_capabilities(banner),
        security_issues: check_camera_security(banner, &observation.ip, observation.port),
        location: estimate_camera_location(&observation.ip),
    }
}
