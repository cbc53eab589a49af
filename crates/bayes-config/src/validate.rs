//! Settings validation errors and semantic validation.

use thiserror::Error;

use crate::settings::Settings;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest accepted normalization tolerance.
pub const MAX_TOLERANCE: f64 = 1e-3;

/// Largest accepted display precision (f64 carries ~15-17 significant digits).
pub const MAX_DISPLAY_PRECISION: usize = 15;

/// Settings validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

/// Validate settings semantically.
pub fn validate_settings(settings: &Settings) -> ValidationResult<()> {
    // Only the major version has to match.
    if major_version(&settings.schema_version) != major_version(crate::CONFIG_SCHEMA_VERSION) {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: settings.schema_version.clone(),
        });
    }

    if !(settings.tolerance > 0.0 && settings.tolerance <= MAX_TOLERANCE) {
        return Err(ValidationError::InvalidValue {
            field: "tolerance".to_string(),
            message: format!("Must be in (0, {}], got {}", MAX_TOLERANCE, settings.tolerance),
        });
    }

    if let Some(level) = settings.credible_level {
        if !(level > 0.0 && level < 1.0) {
            return Err(ValidationError::InvalidValue {
                field: "credible_level".to_string(),
                message: format!("Must be in (0, 1), got {}", level),
            });
        }
    }

    if settings.display_precision > MAX_DISPLAY_PRECISION {
        return Err(ValidationError::InvalidValue {
            field: "display_precision".to_string(),
            message: format!(
                "Must be at most {}, got {}",
                MAX_DISPLAY_PRECISION, settings.display_precision
            ),
        });
    }

    Ok(())
}

fn major_version(version: &str) -> Option<u64> {
    version.split('.').next()?.trim().parse().ok()
}
