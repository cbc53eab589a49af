//! Settings file types.
//!
//! A settings file only tunes numeric behavior; every field except
//! `schema_version` has a default.

use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;

/// Default normalization epsilon for strict distribution construction.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Default number of decimal places in summary output.
pub const DEFAULT_DISPLAY_PRECISION: usize = 4;

/// Contents of `settings.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub schema_version: String,

    /// Allowed |sum - 1| when a distribution is built without normalization.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Credible level used when a command gets no `--level`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credible_level: Option<f64>,

    /// Decimal places for `--format summary`.
    #[serde(default = "default_display_precision")]
    pub display_precision: usize,

    #[serde(rename = "_comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_display_precision() -> usize {
    DEFAULT_DISPLAY_PRECISION
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            tolerance: DEFAULT_TOLERANCE,
            credible_level: None,
            display_precision: DEFAULT_DISPLAY_PRECISION,
            comment: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse_json(&content)
    }

    /// Parse settings from a JSON string.
    pub fn parse_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_file_fills_defaults() {
        let settings = Settings::parse_json(r#"{"schema_version": "1.0.0"}"#).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn full_file_parses() {
        let json = r#"{
            "schema_version": "1.0.0",
            "_comment": "tighter checks",
            "tolerance": 1e-12,
            "credible_level": 0.9,
            "display_precision": 6
        }"#;
        let settings = Settings::parse_json(json).unwrap();
        assert_eq!(settings.tolerance, 1e-12);
        assert_eq!(settings.credible_level, Some(0.9));
        assert_eq!(settings.display_precision, 6);
        assert_eq!(settings.comment.as_deref(), Some("tighter checks"));
    }

    #[test]
    fn missing_schema_version_is_parse_error() {
        let err = Settings::parse_json(r#"{"tolerance": 1e-9}"#).unwrap_err();
        assert!(matches!(err, ValidationError::ParseError(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Settings::from_file(std::path::Path::new("/nonexistent/settings.json"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::IoError(_)));
    }

    #[test]
    fn default_serializes_without_optional_fields() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert!(json.get("credible_level").is_none());
        assert!(json.get("_comment").is_none());
        assert_eq!(json["display_precision"], 4);
    }
}
