//! Integration tests for the camfinder classifier

use camfinder::{
    check_camera_security, classify, detect_camera_capabilities, estimate_camera_location,
    identify_camera_brand_model, identify_camera_type, is_local_ip, CameraType, Capability,
    LocationZone, NetworkObservation, SecurityIssue,
};

#[test]
fn test_is_local_ip_literals() {
    assert!(is_local_ip("192.168.1.1"));
    assert!(!is_local_ip("8.8.8.8"));
    assert!(is_local_ip("127.0.0.1"));
    assert!(!is_local_ip("192.168.1.256"));
}

#[test]
fn test_is_local_ip_private_ranges() {
    assert!(is_local_ip("10.0.0.1"));
    assert!(is_local_ip("10.255.255.255"));
    assert!(is_local_ip("172.16.0.1"));
    assert!(is_local_ip("172.31.255.254"));
    assert!(!is_local_ip("172.15.0.1"));
    assert!(!is_local_ip("172.32.0.1"));
    assert!(!is_local_ip("192.169.0.1"));
    assert!(!is_local_ip("1.1.1.1"));
}

#[test]
fn test_is_local_ip_malformed() {
    for input in [
        "",
        "192.168.1",
        "192.168.1.1.1",
        "192.168..1",
        "192.168.1.-1",
        "192.168.1.+1",
        " 192.168.1.1",
        "192.168.1.1 ",
        "a.b.c.d",
        "not an ip",
        "::1",
    ] {
        assert!(!is_local_ip(input), "input {:?}", input);
    }
}

#[test]
fn test_rtsp_port_wins_regardless_of_banner() {
    assert_eq!(identify_camera_type("", 554), Some(CameraType::RtspStream));
    assert_eq!(
        identify_camera_type("HTTP/1.1 200 OK\r\nServer: Apache\r\n", 554),
        Some(CameraType::RtspStream)
    );
    assert_eq!(identify_camera_type("DVR login", 554), Some(CameraType::RtspStream));
}

#[test]
fn test_camera_type_from_banner() {
    assert_eq!(identify_camera_type("HTTP/1.1 200 OK\r\nServer: Apache\r\n", 80), None);
    assert_eq!(
        identify_camera_type("HTTP/1.1 200 OK\r\nServer: IP Camera\r\n", 80),
        Some(CameraType::IpCamera)
    );
    assert_eq!(
        identify_camera_type("HTTP/1.1 200 OK\r\nServer: CCTV-DVR\r\n", 80),
        Some(CameraType::CctvSystem)
    );
    assert_eq!(
        identify_camera_type("<title>Network Video Recorder (NVR) camera login</title>", 80),
        Some(CameraType::CctvSystem)
    );
}

#[test]
fn test_silent_web_port() {
    assert_eq!(identify_camera_type("", 8080), Some(CameraType::PotentialWebInterface));
    assert_eq!(identify_camera_type("  \r\n", 8081), Some(CameraType::PotentialWebInterface));
    assert_eq!(identify_camera_type("", 80), None);
    assert_eq!(identify_camera_type("", 22), None);
}

#[test]
fn test_camera_type_labels() {
    assert_eq!(CameraType::IpCamera.to_string(), "IP Camera");
    assert_eq!(CameraType::CctvSystem.to_string(), "CCTV System");
    assert_eq!(CameraType::RtspStream.to_string(), "RTSP Stream");
    assert_eq!(
        CameraType::PotentialWebInterface.to_string(),
        "Potential Camera Web Interface"
    );
}

#[test]
fn test_brand_literals() {
    assert!(identify_camera_brand_model("<title>Axis Camera</title>")
        .brand
        .contains("Axis"));
    assert_eq!(
        identify_camera_brand_model("<title>Generic Web Server</title>").brand,
        "Unknown"
    );
}

#[test]
fn test_brand_with_model() {
    let dahua = identify_camera_brand_model("Dahua Technology IPC-HDW1230S web service");
    assert_eq!(dahua.brand, "Dahua");
    assert_eq!(dahua.model.as_deref(), Some("IPC-HDW1230S"));

    let reolink = identify_camera_brand_model("Reolink RLC-410 login");
    assert_eq!(reolink.brand, "Reolink");
    assert_eq!(reolink.model.as_deref(), Some("RLC-410"));
}

#[test]
fn test_capability_literals() {
    assert!(detect_camera_capabilities("motion detection enabled").contains(&Capability::MotionDetection));
    assert!(detect_camera_capabilities("").is_empty());
}

#[test]
fn test_capabilities_are_independent() {
    let caps = detect_camera_capabilities("PTZ control, 1080p, infrared night vision, two-way talk audio");

    assert!(caps.contains(&Capability::PtzControl));
    assert!(caps.contains(&Capability::HdRecording));
    assert!(caps.contains(&Capability::NightVision));
    assert!(caps.contains(&Capability::AudioRecording));
    assert!(!caps.contains(&Capability::MotionDetection));
}

#[test]
fn test_security_checks() {
    let issues = check_camera_security("<form>admin password</form> http://cam/../etc", "8.8.8.8", 23);

    assert!(issues.contains(&SecurityIssue::ExposedAdminLogin));
    assert!(issues.contains(&SecurityIssue::UnencryptedHttp));
    assert!(issues.contains(&SecurityIssue::PathTraversal));
    assert!(issues.contains(&SecurityIssue::TelnetExposed));
    assert!(issues.contains(&SecurityIssue::PublicExposure));
    assert!(!issues.contains(&SecurityIssue::InjectionPattern));

    assert!(check_camera_security("", "192.168.1.10", 80).is_empty());
}

#[test]
fn test_location_literals() {
    assert_eq!(estimate_camera_location("192.168.1.5"), LocationZone::Infrastructure);
    assert_eq!(estimate_camera_location("192.168.1.75"), LocationZone::OfficeArea);
    assert_eq!(estimate_camera_location("192.168.1.125"), LocationZone::CommonAreas);
    assert_eq!(estimate_camera_location("192.168.1.175"), LocationZone::Perimeter);
    assert_eq!(estimate_camera_location("192.168.1.225"), LocationZone::RemoteAreas);
    assert_eq!(estimate_camera_location(""), LocationZone::Unknown);
    assert_eq!(estimate_camera_location("invalid.ip"), LocationZone::Unknown);
    assert_eq!(LocationZone::Infrastructure.to_string(), "Infrastructure/Server Room");
}

#[test]
fn test_classify_rtsp_endpoint() {
    let observation = NetworkObservation::new("192.168.1.210", 554, "RTSP/1.0 200 OK\r\nCSeq: 1\r\n");
    let result = classify(&observation);

    assert_eq!(result.device_type, Some(CameraType::RtspStream));
    assert_eq!(result.location, LocationZone::RemoteAreas);
    assert!(result.security_issues.is_empty());
}

#[test]
fn test_classify_is_deterministic() {
    let observation = NetworkObservation::new(
        "10.1.2.3",
        8080,
        "Server: Hikvision-Webs\r\n<html>login PTZ motion cloud email</html>",
    );

    assert_eq!(classify(&observation), classify(&observation));
}
