//! Keyword based capability tagging

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Feature a camera advertises on its pages or banners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    MotionDetection,
    NightVision,
    PtzControl,
    HdRecording,
    AudioRecording,
    CloudStorage,
    MobileApp,
    WebInterface,
    EmailAlerts,
}

impl Capability {
    pub fn label(&self) -> &'static str {
        match self {
            Capability::MotionDetection => "Motion Detection",
            Capability::NightVision => "Night Vision",
            Capability::PtzControl => "PTZ Control",
            Capability::HdRecording => "HD Recording",
            Capability::AudioRecording => "Audio Recording",
            Capability::CloudStorage => "Cloud Storage",
            Capability::MobileApp => "Mobile App",
            Capability::WebInterface => "Web Interface",
            Capability::EmailAlerts => "Email Alerts",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Capability keyword table (lowercase keywords)
pub const CAPABILITY_TABLE: &[(Capability, &[&str])] = &[
    (Capability::MotionDetection, &["motion"]),
    (Capability::NightVision, &["night vision", "infrared", "ir-cut", "ir led"]),
    (Capability::PtzControl, &["ptz", "pan tilt", "pan/tilt", "zoom"]),
    (
        Capability::HdRecording,
        &["1080p", "720p", "1440p", "2160p", "4k", "full hd", "hd recording"],
    ),
    (Capability::AudioRecording, &["audio", "microphone", "sound", "two-way talk"]),
    (Capability::CloudStorage, &["cloud"]),
    (Capability::MobileApp, &["mobile app", "app store", "google play"]),
    (Capability::WebInterface, &["web interface", "webui", "<html"]),
    (Capability::EmailAlerts, &["email", "e-mail", "smtp"]),
];

/// Every capability whose keywords appear in `html`.
pub fn detect_camera_capabilities(html: &str) -> BTreeSet<Capability> {
    let html_lower = html.to_lowercase();

    CAPABILITY_TABLE
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| html_lower.contains(kw)))
        .map(|(capability, _)| *capability)
        .collect()
}
