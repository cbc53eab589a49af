//! Discrete Bayesian updating: likelihood vectors and posteriors.
//!
//! A hypothesis space is a slice of [`DiscreteDistribution`]s, one per
//! hypothesis, each describing how likely that hypothesis makes every
//! possible datum. The prior is an ordered probability vector aligned with
//! that slice.
//!
//! Updating once per datum and updating once with the joint likelihood give
//! the same posterior (up to rounding):
//!
//! ```
//! use bayes_math::updater::{joint_likelihood, likelihood, posterior};
//! use bayes_math::DiscreteDistribution;
//!
//! let h = vec![
//!     DiscreteDistribution::new(vec![0, 1], vec![0.1, 0.9], false).unwrap(),
//!     DiscreteDistribution::new(vec![0, 1], vec![0.9, 0.1], false).unwrap(),
//! ];
//! let prior = [0.5, 0.5];
//!
//! let step = posterior(&prior, &likelihood(&h, &1).unwrap()).unwrap();
//! let step = posterior(&step, &likelihood(&h, &0).unwrap()).unwrap();
//! let joint = posterior(&prior, &joint_likelihood(&h, &[1, 0]).unwrap()).unwrap();
//! assert!((step[0] - joint[0]).abs() < 1e-12);
//! ```

use crate::error::MathError;
use crate::math::distribution::{check_mass, normalize_weights, DiscreteDistribution};
use crate::math::stable::normalize_log_probs;

/// Probability each hypothesis assigns to `datum` (zero where it has no mass).
pub fn likelihood<V: PartialEq>(
    hypotheses: &[DiscreteDistribution<V>],
    datum: &V,
) -> Result<Vec<f64>, MathError> {
    if hypotheses.is_empty() {
        return Err(MathError::EmptySequence("hypotheses"));
    }
    Ok(hypotheses.iter().map(|h| h.probability_of(datum)).collect())
}

/// Elementwise product of the likelihood vectors of every datum in `data`.
///
/// An empty data sequence yields all ones (no evidence).
pub fn joint_likelihood<V: PartialEq>(
    hypotheses: &[DiscreteDistribution<V>],
    data: &[V],
) -> Result<Vec<f64>, MathError> {
    if hypotheses.is_empty() {
        return Err(MathError::EmptySequence("hypotheses"));
    }
    data.iter().try_fold(vec![1.0; hypotheses.len()], |acc, datum| {
        let step = likelihood(hypotheses, datum)?;
        Ok(acc.iter().zip(step).map(|(a, l)| a * l).collect())
    })
}

/// Normalized `prior[i] * likelihood[i]`.
pub fn posterior(prior: &[f64], likelihood: &[f64]) -> Result<Vec<f64>, MathError> {
    if prior.len() != likelihood.len() {
        return Err(MathError::shape(
            "prior",
            prior.len(),
            "likelihood",
            likelihood.len(),
        ));
    }
    check_mass(prior)?;
    check_mass(likelihood)?;

    let raw: Vec<f64> = prior.iter().zip(likelihood).map(|(p, l)| p * l).collect();
    let evidence: f64 = raw.iter().sum();
    if evidence <= 0.0 {
        tracing::debug!(hypotheses = raw.len(), "posterior has zero evidence");
        return Err(MathError::ZeroEvidence);
    }
    Ok(normalize_weights(raw, evidence))
}

/// Posterior over the prior's values after observing a single datum.
///
/// Returns a new distribution; `prior` is left untouched.
pub fn update<H, V>(
    prior: &DiscreteDistribution<H>,
    hypotheses: &[DiscreteDistribution<V>],
    datum: &V,
) -> Result<DiscreteDistribution<H>, MathError>
where
    H: PartialEq + Clone,
    V: PartialEq,
{
    let weights = posterior(&prior.probabilities(), &likelihood(hypotheses, datum)?)?;
    DiscreteDistribution::from_weights(prior.values().cloned().collect(), weights)
}

/// Posterior after a whole data sequence, accumulated in log space.
///
/// Long sequences drive raw likelihood products below the smallest `f64`;
/// summing logs and normalizing with `log_sum_exp` keeps the ratios exact.
pub fn update_sequence<V: PartialEq>(
    prior: &[f64],
    hypotheses: &[DiscreteDistribution<V>],
    data: &[V],
) -> Result<Vec<f64>, MathError> {
    if hypotheses.is_empty() {
        return Err(MathError::EmptySequence("hypotheses"));
    }
    if prior.len() != hypotheses.len() {
        return Err(MathError::shape(
            "prior",
            prior.len(),
            "hypotheses",
            hypotheses.len(),
        ));
    }
    check_mass(prior)?;

    let log_weights: Vec<f64> = prior
        .iter()
        .zip(hypotheses)
        .map(|(p, h)| {
            data.iter()
                .fold(p.ln(), |acc, datum| acc + h.probability_of(datum).ln())
        })
        .collect();

    tracing::trace!(
        hypotheses = hypotheses.len(),
        observations = data.len(),
        "sequential update"
    );
    normalize_log_probs(&log_weights).ok_or(MathError::ZeroEvidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn coins() -> Vec<DiscreteDistribution<i32>> {
        vec![
            DiscreteDistribution::new(vec![0, 1], vec![0.1, 0.9], false).unwrap(),
            DiscreteDistribution::new(vec![0, 1], vec![0.9, 0.1], false).unwrap(),
        ]
    }

    #[test]
    fn likelihood_reads_each_hypothesis() {
        let lik = likelihood(&coins(), &1).unwrap();
        assert_eq!(lik, vec![0.9, 0.1]);
    }

    #[test]
    fn likelihood_of_unknown_datum_is_zero() {
        let lik = likelihood(&coins(), &5).unwrap();
        assert_eq!(lik, vec![0.0, 0.0]);
    }

    #[test]
    fn likelihood_requires_hypotheses() {
        let empty: Vec<DiscreteDistribution<i32>> = Vec::new();
        assert_eq!(
            likelihood(&empty, &1),
            Err(MathError::EmptySequence("hypotheses"))
        );
    }

    #[test]
    fn posterior_two_coin_scenario() {
        let lik = likelihood(&coins(), &1).unwrap();
        let post = posterior(&[0.5, 0.5], &lik).unwrap();
        assert!(approx_eq(post[0], 0.9, 1e-12));
        assert!(approx_eq(post[1], 0.1, 1e-12));
    }

    #[test]
    fn posterior_shape_mismatch() {
        let err = posterior(&[0.5, 0.5], &[1.0]).unwrap_err();
        assert!(matches!(err, MathError::ShapeMismatch { .. }));
    }

    #[test]
    fn posterior_zero_evidence() {
        assert_eq!(
            posterior(&[1.0, 0.0], &[0.0, 0.7]),
            Err(MathError::ZeroEvidence)
        );
    }

    #[test]
    fn posterior_rejects_negative_likelihood() {
        let err = posterior(&[0.5, 0.5], &[0.2, -0.1]).unwrap_err();
        assert_eq!(
            err,
            MathError::InvalidProbability {
                index: 1,
                value: -0.1
            }
        );
    }

    #[test]
    fn posterior_survives_overflowing_evidence() {
        let post = posterior(&[f64::MAX, f64::MAX], &[1.0, 1.0]).unwrap();
        assert!(approx_eq(post[0], 0.5, 1e-12));
        assert!(approx_eq(post[1], 0.5, 1e-12));

        let post = posterior(&[f64::MAX, f64::MAX / 4.0], &[1.0, 1.0]).unwrap();
        assert!(approx_eq(post.iter().sum::<f64>(), 1.0, 1e-12));
        assert!(approx_eq(post[0], 0.8, 1e-12));
    }

    #[test]
    fn stepwise_matches_joint() {
        let h = coins();
        let prior = [0.3, 0.7];
        let step = posterior(&prior, &likelihood(&h, &1).unwrap()).unwrap();
        let step = posterior(&step, &likelihood(&h, &1).unwrap()).unwrap();
        let step = posterior(&step, &likelihood(&h, &0).unwrap()).unwrap();
        let joint = posterior(&prior, &joint_likelihood(&h, &[1, 1, 0]).unwrap()).unwrap();
        for (a, b) in step.iter().zip(&joint) {
            assert!(approx_eq(*a, *b, 1e-12));
        }
    }

    #[test]
    fn joint_likelihood_of_no_data_is_ones() {
        assert_eq!(joint_likelihood(&coins(), &[]).unwrap(), vec![1.0, 1.0]);
    }

    #[test]
    fn update_returns_new_distribution() {
        let prior = DiscreteDistribution::new(vec!["biased", "fair"], vec![0.5, 0.5], false).unwrap();
        let h = vec![
            DiscreteDistribution::new(vec!['H', 'T'], vec![0.8, 0.2], false).unwrap(),
            DiscreteDistribution::new(vec!['H', 'T'], vec![0.5, 0.5], false).unwrap(),
        ];
        let post = update(&prior, &h, &'H').unwrap();
        assert!(approx_eq(post.probability_of(&"biased"), 0.8 / 1.3, 1e-12));
        // The prior is not modified.
        assert_eq!(prior.probability_of(&"biased"), 0.5);
    }

    #[test]
    fn update_sequence_matches_linear_for_short_data() {
        let h = coins();
        let prior = [0.5, 0.5];
        let data = [1, 0, 1, 1];
        let linear = posterior(&prior, &joint_likelihood(&h, &data).unwrap()).unwrap();
        let logged = update_sequence(&prior, &h, &data).unwrap();
        for (a, b) in linear.iter().zip(&logged) {
            assert!(approx_eq(*a, *b, 1e-12));
        }
    }

    #[test]
    fn update_sequence_survives_underflow() {
        let h = coins();
        // 0.9^600 * 0.1^600 underflows to zero as a raw product.
        let data: Vec<i32> = std::iter::repeat([1, 0]).take(600).flatten().chain([1]).collect();
        let raw = joint_likelihood(&h, &data).unwrap();
        assert_eq!(raw, vec![0.0, 0.0]);

        let post = update_sequence(&[0.5, 0.5], &h, &data).unwrap();
        assert!(approx_eq(post[0], 0.9, 1e-9));
        assert!(approx_eq(post[1], 0.1, 1e-9));
    }

    #[test]
    fn update_sequence_zero_evidence() {
        let h = coins();
        assert_eq!(
            update_sequence(&[0.5, 0.5], &h, &[3]),
            Err(MathError::ZeroEvidence)
        );
    }
}
