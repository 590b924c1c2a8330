//! Banner and port based device type inference

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ports::{is_camera_web_port, RTSP_DEFAULT_PORT};

/// Kind of camera endpoint a banner/port pair looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CameraType {
    IpCamera,
    CctvSystem,
    RtspStream,
    PotentialWebInterface,
}

impl CameraType {
    pub fn label(&self) -> &'static str {
        match self {
            CameraType::IpCamera => "IP Camera",
            CameraType::CctvSystem => "CCTV System",
            CameraType::RtspStream => "RTSP Stream",
            CameraType::PotentialWebInterface => "Potential Camera Web Interface",
        }
    }
}

impl fmt::Display for CameraType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Recorder and surveillance-suite tokens. Checked before the camera tokens.
const CCTV_TOKENS: &[&str] = &["cctv", "dvr", "nvr", "surveillance"];

/// Camera servers, brands and embedded web servers shipped on cameras
const CAMERA_TOKENS: &[&str] = &[
    "ip camera",
    "camera",
    "ipcam",
    "webcam",
    "axis",
    "hikvision",
    "dahua",
    "foscam",
    "netwave",
    "goahead",
    "onvif",
    "vivotek",
    "amcrest",
    "reolink",
];

/// Infer the device type from a service banner and the port it came from.
///
/// First match wins: RTSP port, CCTV token, camera token, then an empty
/// banner on a camera web port. Returns `None` when nothing matches.
pub fn identify_camera_type(banner: &str, port: u16) -> Option<CameraType> {
    if port == RTSP_DEFAULT_PORT {
        return Some(CameraType::RtspStream);
    }

    let banner_lower = banner.to_lowercase();

    if CCTV_TOKENS.iter().any(|token| banner_lower.contains(token)) {
        return Some(CameraType::CctvSystem);
    }

    if CAMERA_TOKENS.iter().any(|token| banner_lower.contains(token)) {
        return Some(CameraType::IpCamera);
    }

    if banner.trim().is_empty() && is_camera_web_port(port) {
        return Some(CameraType::PotentialWebInterface);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rtsp_port_wins() {
        assert_eq!(identify_camera_type("", 554), Some(CameraType::RtspStream));
        assert_eq!(
            identify_camera_type("HTTP/1.1 200 OK\r\nServer: CCTV System\r\n", 554),
            Some(CameraType::RtspStream)
        );
    }

    #[test]
    fn test_banner_tokens() {
        let cases = [
            ("HTTP/1.1 200 OK\r\nServer: IP Camera\r\n", Some(CameraType::IpCamera)),
            ("HTTP/1.1 200 OK\r\nServer: CCTV System\r\n", Some(CameraType::CctvSystem)),
            ("HTTP/1.1 200 OK\r\nServer: Axis Camera\r\n", Some(CameraType::IpCamera)),
            ("HTTP/1.1 200 OK\r\nServer: Hikvision\r\n", Some(CameraType::IpCamera)),
            ("HTTP/1.1 200 OK\r\nServer: camera\r\n", Some(CameraType::IpCamera)),
            ("HTTP/1.1 200 OK\r\nServer: Hikvision DVR\r\n", Some(CameraType::CctvSystem)),
            ("HTTP/1.1 200 OK\r\nServer: Apache\r\n", None),
            ("HTTP/1.1 200 OK", None),
        ];

        for (banner, expected) in cases {
            assert_eq!(identify_camera_type(banner, 80), expected, "banner {:?}", banner);
        }
    }

    #[test]
    fn test_empty_banner_on_web_port() {
        assert_eq!(
            identify_camera_type("", 8080),
            Some(CameraType::PotentialWebInterface)
        );
        assert_eq!(
            identify_camera_type("  \r\n", 8081),
            Some(CameraType::PotentialWebInterface)
        );
        assert_eq!(identify_camera_type("", 80), None);
        assert_eq!(identify_camera_type("", 22), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(CameraType::PotentialWebInterface.to_string(), "Potential Camera Web Interface");
        assert_eq!(CameraType::RtspStream.label(), "RTSP Stream");
    }
}
