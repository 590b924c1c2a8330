//! Configuration module for the camfinder scanner

use crate::output::OutputFormat;
use crate::ports::CAMERA_PORTS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Name of the per-user config file looked up in the home directory
pub const DEFAULT_CONFIG_FILE: &str = ".camfinder.toml";

/// Main configuration structure for scanning operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Target host, CIDR or hostname. `None` scans the local /24.
    pub target: Option<String>,

    /// List of ports to probe on every host
    pub ports: Vec<u16>,

    /// Maximum number of hosts probed at once
    pub concurrency: usize,

    /// Connect timeout in milliseconds
    pub timeout: u64,

    /// How long to wait for a banner after connecting, in milliseconds
    pub banner_timeout: u64,

    /// Report every open port, not only camera-classified ones
    pub include_non_camera: bool,

    /// Refuse targets that expand to more hosts than this
    pub max_hosts: usize,

    /// Report format
    pub output_format: OutputFormat,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            target: None,
            ports: CAMERA_PORTS.to_vec(),
            concurrency: num_cpus::get().max(1) * 16,
            timeout: 500,
            banner_timeout: 1500,
            include_non_camera: false,
            max_hosts: 65_536,
            output_format: OutputFormat::Text,
        }
    }
}

impl ScanConfig {
    /// Create a new scan configuration
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            ..Default::default()
        }
    }

    /// Set the ports to scan
    pub fn with_ports(mut self, ports: Vec<u16>) -> Self {
        self.ports = ports;
        self
    }

    /// Set the number of hosts probed concurrently
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the connect timeout
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the banner read timeout
    pub fn with_banner_timeout(mut self, banner_timeout: u64) -> Self {
        self.banner_timeout = banner_timeout;
        self
    }

    pub fn with_include_non_camera(mut self, include: bool) -> Self {
        self.include_non_camera = include;
        self
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    pub fn banner_timeout_duration(&self) -> Duration {
        Duration::from_millis(self.banner_timeout)
    }

    /// Load configuration from TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            crate::ScanError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: ScanConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from ~/.camfinder.toml, falling back to defaults
    pub fn load_default_config() -> Self {
        let home_dir = dirs::home_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
        let config_path = home_dir.join(DEFAULT_CONFIG_FILE);

        if config_path.exists() {
            match Self::from_toml_file(&config_path) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    return config;
                }
                Err(e) => log::warn!("Ignoring {}: {}", config_path.display(), e),
            }
        }

        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::Result<()> {
        if let Some(target) = &self.target {
            if target.trim().is_empty() {
                return Err(crate::ScanError::InvalidTarget("Target cannot be empty".to_string()));
            }
        }

        if self.ports.is_empty() {
            return Err(crate::ScanError::PortRangeError("No ports specified".to_string()));
        }

        if self.ports.contains(&0) {
            return Err(crate::ScanError::PortRangeError("Port 0 is not valid".to_string()));
        }

        if self.concurrency == 0 {
            return Err(crate::ScanError::ConfigError(
                "Concurrency must be greater than 0".to_string(),
            ));
        }

        if self.timeout == 0 || self.banner_timeout == 0 {
            return Err(crate::ScanError::ConfigError(
                "Timeouts must be greater than 0".to_string(),
            ));
        }

        if self.max_hosts == 0 {
            return Err(crate::ScanError::ConfigError(
                "max_hosts must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
