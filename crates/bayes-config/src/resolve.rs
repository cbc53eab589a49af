//! Settings resolution and path discovery.
//!
//! Resolution order: CLI argument → environment variables → XDG paths → defaults.

use std::path::{Path, PathBuf};

use crate::settings::Settings;
use crate::validate::{validate_settings, ValidationResult};

/// Where the settings file was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Discovered settings path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPath {
    /// Path to settings.json (or None if not found).
    pub path: Option<PathBuf>,

    /// Source of the settings (for diagnostics).
    pub source: ConfigSource,
}

/// Validated settings together with where they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

/// Environment variable names.
pub const ENV_SETTINGS_PATH: &str = "BAYES_STAT_CONFIG";
pub const ENV_CONFIG_DIR: &str = "BAYES_STAT_CONFIG_DIR";

/// Standard settings file name.
const SETTINGS_FILENAME: &str = "settings.json";

/// Application name for XDG directories.
const APP_NAME: &str = "bayes-stat";

/// Resolve the settings path using the standard resolution order.
///
/// Resolution order:
/// 1. Explicit CLI path (always taken, so a missing file surfaces as an error)
/// 2. BAYES_STAT_CONFIG environment variable (if the file exists)
/// 3. BAYES_STAT_CONFIG_DIR environment variable + settings.json
/// 4. XDG config directory (~/.config/bayes-stat/)
/// 5. Built-in defaults (None)
pub fn resolve_settings(cli_path: Option<&Path>) -> SettingsPath {
    // 1. CLI argument
    if let Some(path) = cli_path {
        return SettingsPath {
            path: Some(path.to_path_buf()),
            source: ConfigSource::CliArgument,
        };
    }

    // 2. Environment variable (direct path)
    if let Ok(env_path) = std::env::var(ENV_SETTINGS_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return found(path, ConfigSource::Environment);
        }
    }

    // 3. Environment variable (config dir)
    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(SETTINGS_FILENAME);
        if path.exists() {
            return found(path, ConfigSource::Environment);
        }
    }

    // 4. XDG config directory
    if let Some(dir) = xdg_config_dir() {
        let path = dir.join(SETTINGS_FILENAME);
        if path.exists() {
            return found(path, ConfigSource::XdgConfig);
        }
    }

    // 5. Built-in default
    SettingsPath::default()
}

fn found(path: PathBuf, source: ConfigSource) -> SettingsPath {
    SettingsPath {
        path: Some(path),
        source,
    }
}

/// Resolve, read and validate settings.
///
/// With no file anywhere, returns the built-in defaults.
pub fn load_settings(cli_path: Option<&Path>) -> ValidationResult<LoadedSettings> {
    let resolved = resolve_settings(cli_path);
    let settings = match &resolved.path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    validate_settings(&settings)?;

    Ok(LoadedSettings {
        settings,
        path: resolved.path,
        source: resolved.source,
    })
}

/// Get the XDG config directory for bayes-stat.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}
