//! Point summaries of a discrete posterior over numeric hypothesis values.
//!
//! Each function takes the hypothesis values and the posterior as parallel
//! slices, in the order the updater produced them.

use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::math::distribution::{check_mass, DiscreteDistribution};
use crate::math::percentile::{credible_interval, percentile};

/// Posterior mean, mode, median and an optional central credible interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PosteriorSummary {
    pub mean: f64,
    pub mode: f64,
    pub median: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credible_interval: Option<CredibleInterval>,
}

/// Bounds of a central credible interval at `level`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CredibleInterval {
    pub level: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Expected hypothesis value under the posterior.
pub fn mean(hypo_val: &[f64], posterior: &[f64]) -> Result<f64, MathError> {
    check_pair(hypo_val, posterior)?;
    Ok(hypo_val.iter().zip(posterior).map(|(v, p)| v * p).sum())
}

/// Hypothesis value with the largest posterior mass; ties go to the earliest.
pub fn mode(hypo_val: &[f64], posterior: &[f64]) -> Result<f64, MathError> {
    check_pair(hypo_val, posterior)?;
    let mut best = 0;
    for (i, p) in posterior.iter().enumerate().skip(1) {
        if *p > posterior[best] {
            best = i;
        }
    }
    Ok(hypo_val[best])
}

/// Value where cumulative posterior mass first exceeds one half.
///
/// `hypo_val` must already be sorted in the order percentiles should walk.
pub fn median(hypo_val: &[f64], posterior: &[f64]) -> Result<f64, MathError> {
    let dist = pair_up(hypo_val, posterior)?;
    percentile(&dist, 0.5).copied()
}

/// Mean, mode, median and, when `level` is given, the central credible interval.
pub fn summarize(
    hypo_val: &[f64],
    posterior: &[f64],
    level: Option<f64>,
) -> Result<PosteriorSummary, MathError> {
    let dist = pair_up(hypo_val, posterior)?;
    let interval = match level {
        Some(level) => {
            let (lower, upper) = credible_interval(&dist, level)?;
            Some(CredibleInterval {
                level,
                lower: *lower,
                upper: *upper,
            })
        }
        None => None,
    };
    Ok(PosteriorSummary {
        mean: mean(hypo_val, posterior)?,
        mode: mode(hypo_val, posterior)?,
        median: *percentile(&dist, 0.5)?,
        credible_interval: interval,
    })
}

fn check_pair(hypo_val: &[f64], posterior: &[f64]) -> Result<(), MathError> {
    if hypo_val.len() != posterior.len() {
        return Err(MathError::shape(
            "hypo_val",
            hypo_val.len(),
            "posterior",
            posterior.len(),
        ));
    }
    if hypo_val.is_empty() {
        return Err(MathError::EmptySequence("posterior"));
    }
    check_mass(posterior)
}

// Normalizing absorbs rounding drift from upstream updates.
fn pair_up(hypo_val: &[f64], posterior: &[f64]) -> Result<DiscreteDistribution<f64>, MathError> {
    check_pair(hypo_val, posterior)?;
    DiscreteDistribution::from_weights(hypo_val.to_vec(), posterior.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUES: [f64; 4] = [0.0, 1.0, 2.0, 3.0];
    const POSTERIOR: [f64; 4] = [0.1, 0.3, 0.4, 0.2];

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn mean_of_reference_posterior() {
        assert!(approx_eq(mean(&VALUES, &POSTERIOR).unwrap(), 1.7, 1e-12));
    }

    #[test]
    fn mode_of_reference_posterior() {
        assert_eq!(mode(&VALUES, &POSTERIOR).unwrap(), 2.0);
    }

    #[test]
    fn median_of_reference_posterior() {
        // Cumulative: 0.1, 0.4, 0.8 -> first exceedance of 0.5 at 2.
        assert_eq!(median(&VALUES, &POSTERIOR).unwrap(), 2.0);
    }

    #[test]
    fn mode_ties_go_to_first() {
        assert_eq!(mode(&[5.0, 6.0, 7.0], &[0.4, 0.4, 0.2]).unwrap(), 5.0);
    }

    #[test]
    fn mode_with_all_zero_mass_returns_first() {
        assert_eq!(mode(&[5.0, 6.0], &[0.0, 0.0]).unwrap(), 5.0);
    }

    #[test]
    fn empty_inputs_rejected() {
        assert_eq!(mode(&[], &[]), Err(MathError::EmptySequence("posterior")));
        assert_eq!(mean(&[], &[]), Err(MathError::EmptySequence("posterior")));
        assert_eq!(median(&[], &[]), Err(MathError::EmptySequence("posterior")));
    }

    #[test]
    fn length_mismatch_rejected() {
        assert!(matches!(
            mean(&[1.0, 2.0], &[1.0]),
            Err(MathError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            mode(&[1.0], &[0.5, 0.5]),
            Err(MathError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn invalid_mass_rejected_by_every_summary() {
        let bad = [0.5, f64::NAN];
        let nan_at_1 = |r: Result<f64, MathError>| {
            matches!(r, Err(MathError::InvalidProbability { index: 1, .. }))
        };
        assert!(nan_at_1(mean(&[1.0, 2.0], &bad)));
        assert!(nan_at_1(mode(&[1.0, 2.0], &bad)));
        assert!(nan_at_1(median(&[1.0, 2.0], &bad)));

        assert_eq!(
            mean(&[1.0, 2.0], &[1.2, -0.2]),
            Err(MathError::InvalidProbability {
                index: 1,
                value: -0.2
            })
        );
        assert!(matches!(
            mode(&[1.0, 2.0], &[-1.0, 0.5]),
            Err(MathError::InvalidProbability { index: 0, .. })
        ));
    }

    #[test]
    fn median_is_single_valued_symmetric() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let posterior = [0.1, 0.2, 0.4, 0.2, 0.1];
        assert_eq!(median(&values, &posterior).unwrap(), 3.0);
        assert_eq!(mode(&values, &posterior).unwrap(), 3.0);
        assert!(approx_eq(mean(&values, &posterior).unwrap(), 3.0, 1e-12));
    }

    #[test]
    fn summarize_with_and_without_level() {
        let bare = summarize(&VALUES, &POSTERIOR, None).unwrap();
        assert!(bare.credible_interval.is_none());
        assert_eq!(bare.mode, 2.0);

        let full = summarize(&VALUES, &POSTERIOR, Some(0.5)).unwrap();
        let ci = full.credible_interval.unwrap();
        // Tails at 0.25 and 0.75.
        assert_eq!((ci.lower, ci.upper), (1.0, 2.0));
    }

    #[test]
    fn summarize_rejects_bad_level() {
        assert_eq!(
            summarize(&VALUES, &POSTERIOR, Some(1.0)),
            Err(MathError::InvalidLevel(1.0))
        );
    }

    #[test]
    fn summary_serializes_without_missing_interval() {
        let summary = summarize(&VALUES, &POSTERIOR, None).unwrap();
        let json = serde_json::to_value(summary).unwrap();
        assert!(json.get("credible_interval").is_none());
        assert_eq!(json["mode"], 2.0);
    }
}
