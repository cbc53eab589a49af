//! Fuzz target for settings.json parsing and validation.
//!
//! Tests that settings parsing handles arbitrary input without panicking.

#![no_main]

use bayes_config::{validate_settings, Settings};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(settings) = Settings::parse_json(json) {
        let _ = validate_settings(&settings);
    }
});
