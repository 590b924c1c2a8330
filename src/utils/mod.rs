//! Utility modules for the scanner

pub mod target_parser;

use crate::ports::{get_port_list, parse_port_list};
use crate::ScanError;

/// Logging utilities
pub struct Logger;

impl Logger {
    /// Initialize logger with specified level. `RUST_LOG` still refines per module.
    pub fn init(level: log::LevelFilter) {
        env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format_timestamp_secs()
            .init();
    }

    /// Map a `-v` count to a level filter
    pub fn level_from_verbosity(verbosity: u8) -> log::LevelFilter {
        match verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    /// Log scan start
    pub fn log_scan_start(target: &str, hosts: usize, ports: usize) {
        log::info!("Starting camera scan of {} ({} hosts, {} ports each)", target, hosts, ports);
    }

    /// Log scan completion
    pub fn log_scan_complete(duration_ms: u64, devices: usize, hosts: usize) {
        log::info!(
            "Scan completed in {:.2}s - {} devices on {} hosts",
            duration_ms as f64 / 1000.0,
            devices,
            hosts
        );
    }
}

/// Parse a port specification: a named list ("camera", "web", "rtsp",
/// "extended") or comma separated ports and ranges ("80,554,8000-8010").
pub fn parse_ports(port_spec: &str) -> crate::Result<Vec<u16>> {
    if let Some(list_type) = parse_port_list(port_spec.trim()) {
        let list = get_port_list(list_type);
        log::debug!("Using {} port list: {}", list.name, list.description);
        return Ok(list.ports.clone());
    }

    let mut ports = Vec::new();

    for part in port_spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some((start, end)) = part.split_once('-') {
            let start: u16 = start.trim().parse().map_err(|e| {
                ScanError::PortRangeError(format!("Invalid start port '{}': {}", start, e))
            })?;
            let end: u16 = end.trim().parse().map_err(|e| {
                ScanError::PortRangeError(format!("Invalid end port '{}': {}", end, e))
            })?;

            if start == 0 || end == 0 {
                return Err(ScanError::PortRangeError("Port 0 is not valid".to_string()));
            }
            if start > end {
                return Err(ScanError::PortRangeError(format!(
                    "Start port {} cannot be greater than end port {}",
                    start, end
                )));
            }
            ports.extend(start..=end);
        } else {
            let port: u16 = part
                .parse()
                .map_err(|e| ScanError::PortRangeError(format!("Invalid port '{}': {}", part, e)))?;
            if port == 0 {
                return Err(ScanError::PortRangeError("Port 0 is not valid".to_string()));
            }
            ports.push(port);
        }
    }

    if ports.is_empty() {
        return Err(ScanError::PortRangeError(format!("No ports in '{}'", port_spec)));
    }

    ports.sort_unstable();
    ports.dedup();
    Ok(ports)
}
