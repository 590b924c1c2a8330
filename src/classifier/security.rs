//! Weak-security indicators for camera endpoints
//!
//! Pure keyword and context heuristics. Nothing here sends a request or
//! confirms a vulnerability.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::address::{is_local_addr, parse_ipv4};

/// Security issue tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SecurityIssue {
    ExposedAdminLogin,
    UnencryptedHttp,
    PathTraversal,
    InjectionPattern,
    TelnetExposed,
    PublicExposure,
}

impl SecurityIssue {
    pub fn label(&self) -> &'static str {
        match self {
            SecurityIssue::ExposedAdminLogin => "Exposed admin login",
            SecurityIssue::UnencryptedHttp => "Unencrypted HTTP",
            SecurityIssue::PathTraversal => "Path traversal pattern",
            SecurityIssue::InjectionPattern => "Injection pattern",
            SecurityIssue::TelnetExposed => "Telnet exposed",
            SecurityIssue::PublicExposure => "Publicly routable address",
        }
    }
}

impl fmt::Display for SecurityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

const TELNET_PORT: u16 = 23;

const ADMIN_KEYWORDS: &[&str] = &["admin", "password", "login"];
const TRAVERSAL_KEYWORDS: &[&str] = &["../", "..\\", "%2e%2e", "traversal"];
const INJECTION_KEYWORDS: &[&str] = &["sql", "injection", "union select", "<script", "' or '1'='1"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Collect weak-security indicators from page text plus the endpoint it came from.
pub fn check_camera_security(html: &str, ip: &str, port: u16) -> BTreeSet<SecurityIssue> {
    let html_lower = html.to_lowercase();
    let mut issues = BTreeSet::new();

    if contains_any(&html_lower, ADMIN_KEYWORDS) {
        issues.insert(SecurityIssue::ExposedAdminLogin);
    }

    if html_lower.contains("http") && !html_lower.contains("https") {
        issues.insert(SecurityIssue::UnencryptedHttp);
    }

    if contains_any(&html_lower, TRAVERSAL_KEYWORDS) {
        issues.insert(SecurityIssue::PathTraversal);
    }

    if contains_any(&html_lower, INJECTION_KEYWORDS) {
        issues.insert(SecurityIssue::InjectionPattern);
    }

    if port == TELNET_PORT {
        issues.insert(SecurityIssue::TelnetExposed);
    }

    // Malformed addresses say nothing about exposure
    if let Some(addr) = parse_ipv4(ip) {
        if !is_local_addr(addr) {
            issues.insert(SecurityIssue::PublicExposure);
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only(issue: SecurityIssue) -> BTreeSet<SecurityIssue> {
        [issue].into_iter().collect()
    }

    #[test]
    fn test_keyword_issues() {
        let ip = "192.168.1.100";
        assert_eq!(
            check_camera_security("admin password login", ip, 80),
            only(SecurityIssue::ExposedAdminLogin)
        );
        assert_eq!(
            check_camera_security("http connection", ip, 80),
            only(SecurityIssue::UnencryptedHttp)
        );
        assert_eq!(
            check_camera_security("directory traversal ../", ip, 80),
            only(SecurityIssue::PathTraversal)
        );
        assert_eq!(
            check_camera_security("sql injection vulnerability", ip, 80),
            only(SecurityIssue::InjectionPattern)
        );
    }

    #[test]
    fn test_https_is_not_flagged() {
        assert!(check_camera_security("https://camera.local/", "10.0.0.5", 443).is_empty());
    }

    #[test]
    fn test_context_issues() {
        let telnet = check_camera_security("", "192.168.1.20", 23);
        assert_eq!(telnet, only(SecurityIssue::TelnetExposed));

        let public = check_camera_security("", "203.0.113.7", 80);
        assert_eq!(public, only(SecurityIssue::PublicExposure));

        assert!(check_camera_security("", "not-an-ip", 80).is_empty());
    }
}
