//! Brand and model identification from web pages and banners

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Brand reported when no keyword matches
pub const UNKNOWN_BRAND: &str = "Unknown";

/// One row of the brand table
#[derive(Debug, Clone, Copy)]
pub struct BrandEntry {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub model_pattern: Option<&'static str>,
}

/// Brand table. Order is priority: the first brand with a matching keyword wins.
///
/// Ring and Nest carry qualified keywords since "ring" and "nest" show up
/// inside ordinary words ("monitoring", "honest").
pub const BRAND_TABLE: &[BrandEntry] = &[
    BrandEntry {
        name: "Axis",
        keywords: &["axis"],
        model_pattern: Some(r"\b([MPQF]\d{4}(?:-[A-Z0-9]+)*)\b"),
    },
    BrandEntry {
        name: "Hikvision",
        keywords: &["hikvision", "hik-connect"],
        model_pattern: Some(r"\b(DS-[0-9A-Z]+(?:-[0-9A-Z]+)*)\b"),
    },
    BrandEntry {
        name: "Dahua",
        keywords: &["dahua"],
        model_pattern: Some(r"\b((?:IPC|DH|SD)-[0-9A-Z]+(?:-[0-9A-Z]+)*)\b"),
    },
    BrandEntry {
        name: "Foscam",
        keywords: &["foscam"],
        model_pattern: Some(r"\b(FI\d{4}[A-Z]*)\b"),
    },
    BrandEntry {
        name: "D-Link",
        keywords: &["d-link", "dlink"],
        model_pattern: Some(r"\b(DCS-[0-9A-Z]+(?:-[0-9A-Z]+)*)\b"),
    },
    BrandEntry {
        name: "Netgear",
        keywords: &["netgear"],
        model_pattern: None,
    },
    BrandEntry {
        name: "TP-Link",
        keywords: &["tp-link", "tplink", "tapo"],
        model_pattern: Some(r"\b((?:Tapo )?C\d{3}|NC\d{3})\b"),
    },
    BrandEntry {
        name: "Wyze",
        keywords: &["wyze"],
        model_pattern: None,
    },
    BrandEntry {
        name: "Ring",
        keywords: &["ring doorbell", "ring camera", "ring video", "ring.com"],
        model_pattern: None,
    },
    BrandEntry {
        name: "Nest",
        keywords: &["nest cam", "nest.com", "google nest"],
        model_pattern: None,
    },
    BrandEntry {
        name: "Arlo",
        keywords: &["arlo"],
        model_pattern: Some(r"\b(VMC\d{4}[A-Z]*)\b"),
    },
    BrandEntry {
        name: "Eufy",
        keywords: &["eufy"],
        model_pattern: Some(r"\b(T\d{4})\b"),
    },
    BrandEntry {
        name: "Reolink",
        keywords: &["reolink"],
        model_pattern: Some(r"\b(RLC-[0-9A-Z]+(?:-[0-9A-Z]+)*)\b"),
    },
];

lazy_static::lazy_static! {
    static ref MODEL_PATTERNS: Vec<Option<Regex>> = BRAND_TABLE
        .iter()
        .map(|entry| entry.model_pattern.map(|p| Regex::new(p).unwrap()))
        .collect();

    static ref GENERIC_MODEL_PATTERN: Regex =
        Regex::new(r"(?i)model\s*(?:name|number|no\.?)?\s*[:=]\s*([A-Za-z0-9][A-Za-z0-9._\-]*)").unwrap();
}

/// Brand and (when recognisable) model of a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandModel {
    pub brand: String,
    pub model: Option<String>,
}

impl BrandModel {
    pub fn unknown() -> Self {
        Self {
            brand: UNKNOWN_BRAND.to_string(),
            model: None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.brand != UNKNOWN_BRAND
    }
}

/// Look up the brand in `BRAND_TABLE` by case-insensitive keyword search.
///
/// Returns brand "Unknown" with no model when nothing matches.
pub fn identify_camera_brand_model(html: &str) -> BrandModel {
    let html_lower = html.to_lowercase();

    let matched = BRAND_TABLE
        .iter()
        .enumerate()
        .find(|(_, entry)| entry.keywords.iter().any(|kw| html_lower.contains(kw)));

    match matched {
        Some((index, entry)) => BrandModel {
            brand: entry.name.to_string(),
            model: extract_model(html, index),
        },
        None => BrandModel::unknown(),
    }
}

fn extract_model(html: &str, brand_index: usize) -> Option<String> {
    let brand_specific = MODEL_PATTERNS
        .get(brand_index)
        .and_then(|pattern| pattern.as_ref())
        .and_then(|regex| regex.captures(html));

    brand_specific
        .or_else(|| GENERIC_MODEL_PATTERN.captures(html))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_brands() {
        let samples = [
            ("<title>Axis Camera</title>", "Axis"),
            ("<title>Hikvision Web Interface</title>", "Hikvision"),
            ("<title>Dahua IP Camera</title>", "Dahua"),
            ("<title>Foscam Digital Camera</title>", "Foscam"),
            ("<title>DLINK DCS-930L</title>", "D-Link"),
            ("Welcome to your Tapo camera", "TP-Link"),
        ];

        for (html, brand) in samples {
            assert_eq!(identify_camera_brand_model(html).brand, brand, "html {:?}", html);
        }
    }

    #[test]
    fn test_unknown_brand() {
        let result = identify_camera_brand_model("<title>Generic Web Server</title>");
        assert_eq!(result, BrandModel::unknown());
        assert!(!result.is_known());

        // "monitoring" must not hit the Ring table entry
        assert_eq!(identify_camera_brand_model("system monitoring").brand, UNKNOWN_BRAND);
    }

    #[test]
    fn test_table_order_breaks_ties() {
        let result = identify_camera_brand_model("Reolink page embedding an Axis plugin");
        assert_eq!(result.brand, "Axis");
    }

    #[test]
    fn test_model_extraction() {
        let axis = identify_camera_brand_model("<title>AXIS M3045-V Network Camera</title>");
        assert_eq!(axis.model.as_deref(), Some("M3045-V"));

        let hik = identify_camera_brand_model("Hikvision DS-2CD2042WD-I");
        assert_eq!(hik.model.as_deref(), Some("DS-2CD2042WD-I"));

        let generic = identify_camera_brand_model("Netgear Arlo base, Model: VMB3000");
        assert_eq!(generic.brand, "Netgear");
        assert_eq!(generic.model.as_deref(), Some("VMB3000"));

        let none = identify_camera_brand_model("<title>Axis Camera</title>");
        assert_eq!(none.model, None);
    }
}
