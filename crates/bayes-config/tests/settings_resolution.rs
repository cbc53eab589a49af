//! Settings resolution and validation against real files on disk.
//!
//! Covers:
//! - Resolution order (CLI > env path > env config dir > XDG > defaults)
//! - Validation failures surfacing through `load_settings`

use bayes_config::resolve::{ENV_CONFIG_DIR, ENV_SETTINGS_PATH};
use bayes_config::{load_settings, resolve_settings, ConfigSource, ValidationError};
use std::env;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const ENV_KEYS: [&str; 3] = [ENV_SETTINGS_PATH, ENV_CONFIG_DIR, "XDG_CONFIG_HOME"];

struct EnvGuard {
    keys: Vec<String>,
    saved: Vec<Option<String>>,
}

impl EnvGuard {
    fn new(keys: &[&str]) -> Self {
        let mut saved = Vec::with_capacity(keys.len());
        for key in keys {
            saved.push(env::var(key).ok());
        }
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            saved,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (idx, key) in self.keys.iter().enumerate() {
            match self.saved.get(idx).and_then(|v| v.as_ref()) {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

fn with_clean_env<T>(f: impl FnOnce(&TempDir) -> T) -> T {
    let _lock = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    let _guard = EnvGuard::new(&ENV_KEYS);
    let temp = TempDir::new().expect("temp dir");
    env::remove_var(ENV_SETTINGS_PATH);
    env::remove_var(ENV_CONFIG_DIR);
    // Point XDG at an empty directory so the developer's own settings never leak in.
    env::set_var("XDG_CONFIG_HOME", temp.path().join("xdg"));
    f(&temp)
}

fn write_settings(path: &Path, body: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create settings parent");
    }
    fs::write(path, body).expect("write settings");
}

fn settings_with_level(level: f64) -> String {
    format!(r#"{{"schema_version": "1.0.0", "credible_level": {level}}}"#)
}

#[test]
fn test_defaults_when_nothing_configured() {
    with_clean_env(|_| {
        let loaded = load_settings(None).expect("defaults load");
        assert_eq!(loaded.source, ConfigSource::BuiltinDefault);
        assert!(loaded.path.is_none());
        assert_eq!(loaded.settings.tolerance, 1e-9);
        assert!(loaded.settings.credible_level.is_none());
    });
}

#[test]
fn test_cli_over_env() {
    with_clean_env(|temp| {
        let cli = temp.path().join("cli/settings.json");
        let env_path = temp.path().join("env/settings.json");
        write_settings(&cli, &settings_with_level(0.8));
        write_settings(&env_path, &settings_with_level(0.9));
        env::set_var(ENV_SETTINGS_PATH, &env_path);

        let loaded = load_settings(Some(&cli)).expect("cli settings load");
        assert_eq!(loaded.source, ConfigSource::CliArgument);
        assert_eq!(loaded.settings.credible_level, Some(0.8));
    });
}

#[test]
fn test_env_path_over_config_dir() {
    with_clean_env(|temp| {
        let env_path = temp.path().join("env/custom.json");
        let dir = temp.path().join("dir");
        write_settings(&env_path, &settings_with_level(0.7));
        write_settings(&dir.join("settings.json"), &settings_with_level(0.6));
        env::set_var(ENV_SETTINGS_PATH, &env_path);
        env::set_var(ENV_CONFIG_DIR, &dir);

        let resolved = resolve_settings(None);
        assert_eq!(resolved.source, ConfigSource::Environment);
        assert_eq!(resolved.path.as_deref(), Some(env_path.as_path()));
    });
}

#[test]
fn test_missing_env_path_falls_through_to_config_dir() {
    with_clean_env(|temp| {
        let dir = temp.path().join("dir");
        write_settings(&dir.join("settings.json"), &settings_with_level(0.6));
        env::set_var(ENV_SETTINGS_PATH, temp.path().join("missing.json"));
        env::set_var(ENV_CONFIG_DIR, &dir);

        let loaded = load_settings(None).expect("config dir settings load");
        assert_eq!(loaded.source, ConfigSource::Environment);
        assert_eq!(loaded.settings.credible_level, Some(0.6));
    });
}

#[test]
fn test_xdg_config_dir_used_last() {
    with_clean_env(|temp| {
        let xdg = temp.path().join("xdg/bayes-stat/settings.json");
        write_settings(&xdg, &settings_with_level(0.5));

        let resolved = resolve_settings(None);
        if resolved.source == ConfigSource::XdgConfig {
            assert_eq!(resolved.path.as_deref(), Some(xdg.as_path()));
        } else {
            // Platforms where `dirs` ignores XDG_CONFIG_HOME fall back to defaults.
            assert_eq!(resolved.source, ConfigSource::BuiltinDefault);
        }
    });
}

#[test]
fn test_missing_cli_file_is_io_error() {
    with_clean_env(|temp| {
        let err = load_settings(Some(&temp.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, ValidationError::IoError(_)));
    });
}

#[test]
fn test_invalid_values_rejected_on_load() {
    with_clean_env(|temp| {
        let path = temp.path().join("bad.json");
        write_settings(&path, r#"{"schema_version": "1.0.0", "tolerance": 0.5}"#);
        let err = load_settings(Some(&path)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { .. }));

        write_settings(&path, r#"{"schema_version": "3.0.0"}"#);
        let err = load_settings(Some(&path)).unwrap_err();
        assert!(matches!(err, ValidationError::VersionMismatch { .. }));

        write_settings(&path, "{ not json");
        let err = load_settings(Some(&path)).unwrap_err();
        assert!(matches!(err, ValidationError::ParseError(_)));
    });
}
