//! Camera scanner: TCP connect probes feeding the classifier
//!
//! The scanner is the only part of the crate that touches the network.
//! It produces `NetworkObservation`s and hands them to the classifier.

pub mod banner;
pub mod local;
pub mod neighbors;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

use crate::classifier::{classify, CameraType, ClassificationResult, NetworkObservation};
use crate::config::ScanConfig;
use crate::utils::target_parser::TargetParser;
use crate::utils::Logger;
use crate::ScanError;

pub use banner::{BannerGrabber, GrabbedBanner, MAX_BANNER_BYTES};

/// One classified endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceReport {
    pub observation: NetworkObservation,
    pub classification: ClassificationResult,
    pub latency_ms: u64,
}

impl DeviceReport {
    pub fn from_observation(observation: NetworkObservation, latency_ms: u64) -> Self {
        let classification = classify(&observation);
        Self {
            observation,
            classification,
            latency_ms,
        }
    }

    pub fn is_camera(&self) -> bool {
        self.classification.is_camera()
    }
}

/// Outcome of a full scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub target: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub hosts_scanned: usize,
    pub ports_probed: usize,
    pub devices: Vec<DeviceReport>,
}

impl ScanReport {
    pub fn camera_count(&self) -> usize {
        self.devices.iter().filter(|d| d.is_camera()).count()
    }
}

/// Scans hosts for camera endpoints
pub struct CameraScanner {
    config: ScanConfig,
    grabber: BannerGrabber,
    semaphore: Arc<Semaphore>,
    progress: Option<ProgressBar>,
}

impl CameraScanner {
    /// Create a scanner; fails if the configuration is invalid
    pub fn new(config: ScanConfig) -> crate::Result<Self> {
        config.validate()?;

        let grabber = BannerGrabber::new(config.timeout_duration(), config.banner_timeout_duration());
        let semaphore = Arc::new(Semaphore::new(config.concurrency));

        Ok(Self {
            config,
            grabber,
            semaphore,
            progress: None,
        })
    }

    /// Tick `progress` once per finished host
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Connect to one port and read its banner.
    ///
    /// `None` means the port is not open. A silent open port gives an empty banner.
    pub async fn probe(&self, ip: IpAddr, port: u16) -> Option<(NetworkObservation, u64)> {
        let grabbed = self.grabber.grab(SocketAddr::new(ip, port)).await?;
        let latency_ms = grabbed.connect_latency.as_millis() as u64;

        Some((NetworkObservation::new(ip.to_string(), port, grabbed.banner), latency_ms))
    }

    /// Check a single port for a camera or CCTV service
    pub async fn check_port(&self, ip: IpAddr, port: u16) -> Option<CameraType> {
        let (observation, _) = self.probe(ip, port).await?;
        classify(&observation).device_type
    }

    /// Probe every configured port of one host.
    ///
    /// Keeps camera-classified endpoints, or every open port when
    /// `include_non_camera` is set.
    pub async fn scan_host(&self, ip: IpAddr) -> Vec<DeviceReport> {
        let probes = self.config.ports.iter().map(|&port| self.probe(ip, port));

        let devices: Vec<DeviceReport> = join_all(probes)
            .await
            .into_iter()
            .flatten()
            .map(|(observation, latency_ms)| DeviceReport::from_observation(observation, latency_ms))
            .filter(|report| self.config.include_non_camera || report.is_camera())
            .collect();

        for device in &devices {
            if let Some(device_type) = device.classification.device_type {
                log::info!(
                    "{}:{} looks like {} ({})",
                    device.observation.ip,
                    device.observation.port,
                    device_type,
                    device.classification.brand.brand
                );
            }
        }

        devices
    }

    async fn scan_host_bounded(&self, ip: IpAddr) -> crate::Result<Vec<DeviceReport>> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| ScanError::NetworkError(format!("Scanner shut down: {}", e)))?;

        let devices = self.scan_host(ip).await;

        if let Some(progress) = &self.progress {
            progress.inc(1);
        }

        Ok(devices)
    }

    /// Resolve the configured target (local /24 if unset) and scan every host
    pub async fn scan(&self) -> crate::Result<ScanReport> {
        let target = match &self.config.target {
            Some(target) => target.clone(),
            None => local::default_target().ok_or_else(|| {
                ScanError::NetworkError("Could not determine the local network".to_string())
            })?,
        };

        let parsed = TargetParser::new(self.config.max_hosts, true).parse_target(&target)?;
        self.scan_addresses(&target, &parsed.addresses).await
    }

    /// Scan an explicit list of hosts
    pub async fn scan_addresses(&self, target: &str, hosts: &[IpAddr]) -> crate::Result<ScanReport> {
        let started_at = Utc::now();
        let start = Instant::now();

        Logger::log_scan_start(target, hosts.len(), self.config.ports.len());

        if let Some(progress) = &self.progress {
            progress.set_length(hosts.len() as u64);
        }

        let results = join_all(hosts.iter().map(|&ip| self.scan_host_bounded(ip))).await;

        let mut devices = Vec::new();
        for result in results {
            devices.extend(result?);
        }

        if let Some(progress) = &self.progress {
            progress.finish_and_clear();
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        Logger::log_scan_complete(duration_ms, devices.len(), hosts.len());

        Ok(ScanReport {
            target: target.to_string(),
            started_at,
            duration_ms,
            hosts_scanned: hosts.len(),
            ports_probed: hosts.len() * self.config.ports.len(),
            devices,
        })
    }
}
