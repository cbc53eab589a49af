//! Command implementations behind the `bayes-stat` subcommands.
//!
//! Each function validates its inputs, runs the math and returns a report.
//! Nothing here prints; `main` owns stdout and stderr.

use std::path::Path;

use bayes_common::{Error, Result};
use bayes_config::{LoadedSettings, ValidationError};
use bayes_math::{
    credible_interval, percentile, summarize, BetaBinomial, CredibleInterval, DiscreteDistribution,
};
use tracing::{debug, info};

use crate::model::ModelFile;
use crate::report::{
    BetaReport, ConfigReport, HypothesisPosterior, IntervalReport, PercentileReport,
    PosteriorReport, SummaryReport,
};

/// Convert a settings failure into the workspace error.
pub fn settings_error(err: ValidationError) -> Error {
    match err {
        ValidationError::IoError(msg) => Error::Config(msg),
        ValidationError::ParseError(msg) => Error::InvalidSettings(msg),
        ValidationError::InvalidValue { field, message } => {
            Error::InvalidSettings(format!("{field}: {message}"))
        }
        ValidationError::VersionMismatch { expected, actual } => {
            Error::SchemaVersion { expected, actual }
        }
    }
}

/// Credible level from `--level`, falling back to the settings file.
pub fn resolve_level(cli_level: Option<f64>, loaded: &LoadedSettings) -> Option<f64> {
    cli_level.or(loaded.settings.credible_level)
}

fn require_level(cli_level: Option<f64>, loaded: &LoadedSettings) -> Result<f64> {
    resolve_level(cli_level, loaded).ok_or_else(|| {
        Error::InvalidArgument(
            "no credible level: pass --level or set credible_level in settings.json".to_string(),
        )
    })
}

/// Build a numeric distribution from paired command-line lists.
pub fn distribution_from_args(
    values: Vec<f64>,
    probabilities: Vec<f64>,
    normalize: bool,
    loaded: &LoadedSettings,
) -> Result<DiscreteDistribution<f64>> {
    if let Some((index, value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(Error::InvalidArgument(format!(
            "--values[{index}] must be finite, got {value}"
        )));
    }
    let dist = DiscreteDistribution::with_tolerance(
        values,
        probabilities,
        normalize,
        loaded.settings.tolerance,
    )?;
    debug!(entries = dist.len(), normalize, "distribution built");
    Ok(dist)
}

/// `percentile`: the value at cumulative probability `p`.
pub fn run_percentile(dist: &DiscreteDistribution<f64>, p: f64) -> Result<PercentileReport> {
    let value = *percentile(dist, p)?;
    Ok(PercentileReport { p, value })
}

/// `interval`: central credible interval at the resolved level.
pub fn run_interval(
    dist: &DiscreteDistribution<f64>,
    cli_level: Option<f64>,
    loaded: &LoadedSettings,
) -> Result<IntervalReport> {
    let level = require_level(cli_level, loaded)?;
    let (lower, upper) = credible_interval(dist, level)?;
    Ok(IntervalReport {
        interval: CredibleInterval {
            level,
            lower: *lower,
            upper: *upper,
        },
    })
}

/// `summary`: mean, mode, median and, when a level resolves, the interval.
pub fn run_summary(
    dist: &DiscreteDistribution<f64>,
    cli_level: Option<f64>,
    loaded: &LoadedSettings,
) -> Result<SummaryReport> {
    let values: Vec<f64> = dist.values().copied().collect();
    let summary = summarize(&values, &dist.probabilities(), resolve_level(cli_level, loaded))?;
    Ok(SummaryReport { summary })
}

/// `posterior`: update a JSON model on its data and summarize the result.
pub fn run_posterior(
    model_path: &Path,
    cli_level: Option<f64>,
    loaded: &LoadedSettings,
) -> Result<PosteriorReport> {
    let model = ModelFile::from_file(model_path)?.build(loaded.settings.tolerance)?;
    info!(
        path = %model_path.display(),
        hypotheses = model.values.len(),
        observations = model.data.len(),
        "updating model"
    );

    let posterior = model.posterior()?;
    let summary = summarize(&model.values, &posterior, resolve_level(cli_level, loaded))?;

    let hypotheses = model
        .values
        .iter()
        .zip(&model.prior)
        .zip(&posterior)
        .map(|((&value, &prior), &posterior)| HypothesisPosterior {
            value,
            prior,
            posterior,
        })
        .collect();

    Ok(PosteriorReport {
        observations: model.data.len(),
        hypotheses,
        summary,
    })
}

/// `beta`: conjugate update of Beta(alpha, beta) on binary outcomes.
pub fn run_beta(
    alpha: f64,
    beta: f64,
    outcomes: &[u8],
    cli_level: Option<f64>,
    loaded: &LoadedSettings,
) -> Result<BetaReport> {
    let prior = BetaBinomial::new(alpha, beta)?;
    let posterior = prior.update(outcomes)?;
    let successes = outcomes.iter().filter(|o| **o == 1).count() as u64;
    let failures = outcomes.len() as u64 - successes;
    debug!(successes, failures, "beta-binomial update");

    let credible_interval = match resolve_level(cli_level, loaded) {
        Some(level) => {
            let (lower, upper) = posterior.credible_interval(level)?;
            Some(CredibleInterval {
                level,
                lower,
                upper,
            })
        }
        None => None,
    };

    Ok(BetaReport {
        prior,
        posterior,
        successes,
        failures,
        mean: posterior.mean(),
        variance: posterior.variance(),
        credible_interval,
    })
}

/// `config`: the resolved settings and where they came from.
pub fn run_config(loaded: &LoadedSettings) -> ConfigReport {
    ConfigReport {
        source: loaded.source.to_string(),
        path: loaded.path.clone(),
        settings: loaded.settings.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bayes_config::{ConfigSource, Settings};
    use bayes_math::MathError;

    fn loaded(level: Option<f64>) -> LoadedSettings {
        LoadedSettings {
            settings: Settings {
                credible_level: level,
                ..Settings::default()
            },
            path: None,
            source: ConfigSource::BuiltinDefault,
        }
    }

    fn three_point() -> DiscreteDistribution<f64> {
        distribution_from_args(vec![0.0, 1.0, 2.0], vec![0.2, 0.5, 0.3], false, &loaded(None))
            .unwrap()
    }

    #[test]
    fn percentile_reference_values() {
        let dist = three_point();
        assert_eq!(run_percentile(&dist, 0.25).unwrap().value, 1.0);
        assert_eq!(run_percentile(&dist, 0.6).unwrap().value, 1.0);
        assert_eq!(run_percentile(&dist, 0.75).unwrap().value, 2.0);
    }

    #[test]
    fn interval_needs_some_level() {
        let dist = three_point();
        let err = run_interval(&dist, None, &loaded(None)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn cli_level_beats_settings_level() {
        let dist = three_point();
        let report = run_interval(&dist, Some(0.5), &loaded(Some(0.99))).unwrap();
        assert_eq!(report.interval.level, 0.5);

        let report = run_interval(&dist, None, &loaded(Some(0.5))).unwrap();
        assert_eq!(report.interval.level, 0.5);
    }

    #[test]
    fn non_finite_values_rejected() {
        let err = distribution_from_args(vec![f64::NAN], vec![1.0], false, &loaded(None))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn unnormalized_args_rejected_without_flag() {
        let err =
            distribution_from_args(vec![1.0, 2.0], vec![1.0, 3.0], false, &loaded(None))
                .unwrap_err();
        assert!(matches!(err, Error::Math(MathError::Unnormalized { .. })));
    }

    #[test]
    fn summary_without_level_has_no_interval() {
        let report = run_summary(&three_point(), None, &loaded(None)).unwrap();
        assert!(report.summary.credible_interval.is_none());
        assert_eq!(report.summary.mode, 1.0);
    }

    #[test]
    fn beta_reference_update() {
        let report = run_beta(1.0, 1.0, &[1, 1, 0], None, &loaded(None)).unwrap();
        assert_eq!(report.posterior, BetaBinomial::new(3.0, 2.0).unwrap());
        assert_eq!((report.successes, report.failures), (2, 1));
        assert!((report.mean - 0.6).abs() < 1e-12);
    }

    #[test]
    fn beta_rejects_invalid_outcome() {
        let err = run_beta(1.0, 1.0, &[1, 3], None, &loaded(None)).unwrap_err();
        assert!(matches!(
            err,
            Error::Math(MathError::InvalidOutcome { index: 1, value: 3 })
        ));
    }

    #[test]
    fn settings_errors_map_to_config_variants() {
        let err = settings_error(ValidationError::VersionMismatch {
            expected: "1.0.0".into(),
            actual: "2.0.0".into(),
        });
        assert!(matches!(err, Error::SchemaVersion { .. }));
        assert_eq!(err.code(), 12);
        assert_eq!(settings_error(ValidationError::IoError("gone".into())).code(), 10);
        assert_eq!(settings_error(ValidationError::ParseError("{".into())).code(), 11);
        let err = settings_error(ValidationError::InvalidValue {
            field: "tolerance".into(),
            message: "too big".into(),
        });
        assert_eq!(err.to_string(), "invalid settings: tolerance: too big");
    }
}
