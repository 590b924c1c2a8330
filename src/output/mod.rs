//! Output formatting and management

use crate::classifier::ClassificationResult;
use crate::ports::port_description;
use crate::scanner::{DeviceReport, ScanReport};
use crate::scanner::neighbors::Neighbor;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub file: Option<String>,
    pub colored: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            file: None,
            colored: true,
        }
    }
}

/// Main output manager
pub struct OutputManager {
    config: OutputConfig,
}

impl OutputManager {
    pub fn new(config: OutputConfig) -> Self {
        if !config.colored {
            colored::control::set_override(false);
        }
        Self { config }
    }

    /// Write a scan report to the configured destination
    pub fn write_report(&self, report: &ScanReport) -> crate::Result<()> {
        let output = self.render_report(report)?;
        self.emit(&output)
    }

    /// Write the classification of a single observation
    pub fn write_classification(&self, device: &DeviceReport) -> crate::Result<()> {
        let output = match self.config.format {
            OutputFormat::Text => self.format_device_text(device),
            OutputFormat::Json => serde_json::to_string_pretty(device)? + "\n",
            OutputFormat::Csv => self.format_csv(std::slice::from_ref(device))?,
        };
        self.emit(&output)
    }

    /// Write an ARP neighbour listing
    pub fn write_neighbors(&self, neighbors: &[Neighbor]) -> crate::Result<()> {
        let output = match self.config.format {
            OutputFormat::Text => self.format_neighbors_text(neighbors),
            OutputFormat::Json => serde_json::to_string_pretty(neighbors)? + "\n",
            OutputFormat::Csv => {
                let mut writer = csv::Writer::from_writer(Vec::new());
                writer.write_record(["ip", "mac", "hostname", "interface", "location"])?;
                for neighbor in neighbors {
                    writer.write_record([
                        neighbor.ip.to_string(),
                        neighbor.mac.clone(),
                        neighbor.hostname.clone().unwrap_or_default(),
                        neighbor.interface.clone().unwrap_or_default(),
                        neighbor.location().to_string(),
                    ])?;
                }
                into_string(writer)?
            }
        };
        self.emit(&output)
    }

    /// Render a report in the configured format
    pub fn render_report(&self, report: &ScanReport) -> crate::Result<String> {
        match self.config.format {
            OutputFormat::Text => Ok(self.format_text(report)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)? + "\n"),
            OutputFormat::Csv => self.format_csv(&report.devices),
        }
    }

    fn emit(&self, output: &str) -> crate::Result<()> {
        match &self.config.file {
            Some(filename) => {
                let mut file = File::create(filename)?;
                file.write_all(output.as_bytes())?;
                log::info!("Report written to {}", filename);
            }
            None => print!("{}", output),
        }
        Ok(())
    }

    /// Format results as text
    fn format_text(&self, report: &ScanReport) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {} ({} hosts, {} probes, {:.2}s)\n\n",
            "[~] Camera scan of".bright_blue(),
            report.target.bright_cyan().bold(),
            report.hosts_scanned,
            report.ports_probed,
            report.duration_ms as f64 / 1000.0
        ));

        if report.devices.is_empty() {
            output.push_str(&format!("{}\n", "[!] No camera devices found".bright_yellow()));
            return output;
        }

        for device in &report.devices {
            output.push_str(&self.format_device_text(device));
        }

        output.push_str(&format!(
            "{} {} camera endpoint(s), {} reported\n",
            "[✓]".bright_green(),
            report.camera_count(),
            report.devices.len()
        ));

        output
    }

    fn format_device_text(&self, device: &DeviceReport) -> String {
        let observation = &device.observation;
        let classification = &device.classification;
        let mut output = String::new();

        let device_type = classification
            .device_type
            .map(|t| t.label().bright_green().bold().to_string())
            .unwrap_or_else(|| "not a camera".dimmed().to_string());

        output.push_str(&format!(
            "📹 {}:{}/{} {}\n",
            observation.ip.bright_cyan(),
            observation.port,
            port_description(observation.port),
            device_type
        ));

        let brand = match &classification.brand.model {
            Some(model) => format!("{} {}", classification.brand.brand, model),
            None => classification.brand.brand.clone(),
        };
        output.push_str(&format!("   Brand:        {}\n", brand));
        output.push_str(&format!("   Location:     {}\n", classification.location));

        if !classification.capabilities.is_empty() {
            output.push_str(&format!(
                "   Capabilities: {}\n",
                join_labels(classification.capabilities.iter())
            ));
        }

        if !classification.security_issues.is_empty() {
            output.push_str(&format!(
                "   Security:     {}\n",
                join_labels(classification.security_issues.iter()).bright_red()
            ));
        }

        output.push('\n');
        output
    }

    fn format_neighbors_text(&self, neighbors: &[Neighbor]) -> String {
        let mut output = String::new();

        if neighbors.is_empty() {
            output.push_str(&format!("{}\n", "[!] ARP table is empty".bright_yellow()));
            return output;
        }

        for neighbor in neighbors {
            output.push_str(&format!(
                "📡 {} {:<17} {:<10} {}{}\n",
                format!("{:<15}", neighbor.ip).bright_cyan(),
                neighbor.mac,
                neighbor.interface.as_deref().unwrap_or("-"),
                neighbor.location(),
                neighbor
                    .hostname
                    .as_deref()
                    .map(|h| format!(" ({})", h))
                    .unwrap_or_default()
            ));
        }

        output
    }

    /// Format devices as CSV, one row per endpoint
    fn format_csv(&self, devices: &[DeviceReport]) -> crate::Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "ip",
            "port",
            "device_type",
            "brand",
            "model",
            "capabilities",
            "security_issues",
            "location",
            "latency_ms",
        ])?;

        for device in devices {
            writer.write_record(csv_row(device))?;
        }

        into_string(writer)
    }
}

fn csv_row(device: &DeviceReport) -> Vec<String> {
    let ClassificationResult {
        device_type,
        brand,
        capabilities,
        security_issues,
        location,
    } = &device.classification;

    vec![
        device.observation.ip.clone(),
        device.observation.port.to_string(),
        device_type.map(|t| t.label().to_string()).unwrap_or_default(),
        brand.brand.clone(),
        brand.model.clone().unwrap_or_default(),
        capabilities.iter().map(|c| c.label()).collect::<Vec<_>>().join(";"),
        security_issues.iter().map(|s| s.label()).collect::<Vec<_>>().join(";"),
        location.to_string(),
        device.latency_ms.to_string(),
    ]
}

fn join_labels<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items.map(|item| item.to_string()).collect::<Vec<_>>().join(", ")
}

fn into_string(writer: csv::Writer<Vec<u8>>) -> crate::Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| crate::ScanError::OutputError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| crate::ScanError::OutputError(e.to_string()))
}
