//! camfinder - find and fingerprint IP cameras on the local network
//!
//! The core is a pure classifier that turns an (address, port, banner)
//! observation into a camera classification. A TCP-connect scanner
//! produces those observations from live hosts.

pub mod classifier;
pub mod config;
pub mod error;
pub mod output;
pub mod ports;
pub mod scanner;
pub mod utils;

// Re-export commonly used types
pub use classifier::{
    check_camera_security, classify, detect_camera_capabilities, estimate_camera_location,
    identify_camera_brand_model, identify_camera_type, is_local_ip, BrandModel, CameraType,
    Capability, ClassificationResult, LocationZone, NetworkObservation, SecurityIssue,
};
pub use config::ScanConfig;
pub use error::{ScanError, ScanResult};
pub use ports::CAMERA_PORTS;
pub use scanner::{CameraScanner, DeviceReport, ScanReport};

pub type Result<T> = std::result::Result<T, ScanError>;
