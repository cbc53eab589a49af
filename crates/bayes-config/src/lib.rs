//! Bayes Stat configuration loading and validation.
//!
//! This crate provides:
//! - Typed settings for `settings.json`
//! - Settings resolution (CLI → env → XDG → defaults)
//! - Semantic validation of numeric knobs

pub mod resolve;
pub mod settings;
pub mod validate;

pub use resolve::{load_settings, resolve_settings, ConfigSource, LoadedSettings, SettingsPath};
pub use settings::Settings;
pub use validate::{validate_settings, ValidationError, ValidationResult};

/// Schema version for settings files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
