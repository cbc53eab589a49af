//! Fuzz target for posterior model files.
//!
//! Parses arbitrary bytes as a model, then builds and updates it. Every
//! failure must surface as an error, never a panic.

#![no_main]

use bayes_core::model::ModelFile;
use bayes_math::summarize;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(file) = ModelFile::parse_json(json) else {
        return;
    };
    let Ok(model) = file.build(1e-9) else {
        return;
    };
    if let Ok(posterior) = model.posterior() {
        let total: f64 = posterior.iter().sum();
        assert!((total - 1.0).abs() < 1e-6, "posterior sums to {total}");
        let _ = summarize(&model.values, &posterior, Some(0.9));
    }
});
