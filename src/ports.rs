//! Camera port lists for targeted scanning

use std::collections::HashMap;
use once_cell::sync::Lazy;

/// Default RTSP port. An open 554 is treated as a stream on its own.
pub const RTSP_DEFAULT_PORT: u16 = 554;

/// Ports that speak RTSP and get an OPTIONS probe instead of HTTP
pub const RTSP_PORTS: &[u16] = &[554, 8554];

/// Ports where a silent service is likely a camera web interface
pub const CAMERA_WEB_PORTS: &[u16] = &[81, 8000, 8080, 8081];

/// Default probe list
pub const CAMERA_PORTS: &[u16] = &[80, 81, 443, 554, 2020, 8000, 8080, 8081, 8443, 8554, 37777];

/// Port list types for different scanning scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortListType {
    Camera,
    Web,
    Rtsp,
    Extended,
}

/// Port list with metadata
#[derive(Debug, Clone)]
pub struct PortList {
    pub name: &'static str,
    pub description: &'static str,
    pub ports: Vec<u16>,
}

static PORT_LISTS: Lazy<HashMap<PortListType, PortList>> = Lazy::new(|| {
    let mut lists = HashMap::new();

    lists.insert(PortListType::Camera, PortList {
        name: "Camera",
        description: "Common IP camera, NVR and RTSP ports",
        ports: CAMERA_PORTS.to_vec(),
    });

    lists.insert(PortListType::Web, PortList {
        name: "Web",
        description: "Camera web interfaces only",
        ports: get_http_ports(),
    });

    lists.insert(PortListType::Rtsp, PortList {
        name: "RTSP",
        description: "Streaming endpoints only",
        ports: RTSP_PORTS.to_vec(),
    });

    lists.insert(PortListType::Extended, PortList {
        name: "Extended",
        description: "Camera ports plus vendor SDK and telnet ports",
        ports: get_extended_ports(),
    });

    lists
});

/// Get port list by type
pub fn get_port_list(list_type: PortListType) -> &'static PortList {
    &PORT_LISTS[&list_type]
}

/// Parse port list from string (e.g., "camera", "web", "rtsp")
pub fn parse_port_list(input: &str) -> Option<PortListType> {
    match input.to_lowercase().as_str() {
        "camera" | "cameras" | "default" => Some(PortListType::Camera),
        "web" | "http" => Some(PortListType::Web),
        "rtsp" | "stream" => Some(PortListType::Rtsp),
        "extended" | "all" => Some(PortListType::Extended),
        _ => None,
    }
}

/// Every HTTP(S) port a camera UI may listen on, including 80 and 443.
///
/// Wider than `CAMERA_WEB_PORTS`, which only lists ports where a silent
/// service is itself taken as a camera hint.
pub fn get_http_ports() -> Vec<u16> {
    vec![80, 81, 443, 8000, 8080, 8081, 8443]
}

pub fn get_extended_ports() -> Vec<u16> {
    let mut ports = CAMERA_PORTS.to_vec();
    // telnet, Hikvision SDK, XMEye, Dahua alt, ONVIF alt, Foscam
    ports.extend_from_slice(&[23, 8899, 34567, 37778, 3702, 88]);
    ports.sort_unstable();
    ports.dedup();
    ports
}

pub fn is_camera_web_port(port: u16) -> bool {
    CAMERA_WEB_PORTS.contains(&port)
}

pub fn is_rtsp_port(port: u16) -> bool {
    RTSP_PORTS.contains(&port)
}

/// Short label for a port in reports
pub fn port_description(port: u16) -> &'static str {
    match port {
        23 => "telnet",
        80 | 81 | 8000 | 8080 | 8081 | 88 => "http",
        443 | 8443 => "https",
        554 | 8554 => "rtsp",
        2020 | 3702 => "onvif",
        8899 => "hikvision-sdk",
        34567 => "xmeye",
        37777 | 37778 => "dahua-sdk",
        _ => "unknown",
    }
}
