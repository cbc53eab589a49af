//! Discrete probability mass functions over an ordered set of hypothesis values.
//!
//! A [`DiscreteDistribution`] keeps its `(value, probability)` pairs in the
//! order the caller supplied them. That order is the tie-break order for
//! percentiles and medians, so callers typically pass values sorted
//! ascending. Lookup by value is a linear scan; hypothesis spaces here are
//! small and values need only `PartialEq` (so `f64` works as a key).
//!
//! # Example
//! ```
//! use bayes_math::DiscreteDistribution;
//!
//! let dist = DiscreteDistribution::new(vec![0, 1, 2], vec![0.2, 0.5, 0.3], false).unwrap();
//! assert_eq!(dist.probability_of(&1), 0.5);
//! assert_eq!(dist.probability_of(&7), 0.0);
//! ```

use serde::Serialize;

use crate::error::MathError;

/// Default tolerance when checking that probabilities sum to one.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// A validated probability mass function with an explicit value order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscreteDistribution<V> {
    entries: Vec<(V, f64)>,
}

impl<V: PartialEq> DiscreteDistribution<V> {
    /// Build a distribution from parallel value and probability sequences.
    ///
    /// With `normalize = false` the probabilities must already sum to one
    /// within [`DEFAULT_TOLERANCE`]; with `normalize = true` they are divided
    /// by their sum.
    pub fn new(values: Vec<V>, probabilities: Vec<f64>, normalize: bool) -> Result<Self, MathError> {
        Self::with_tolerance(values, probabilities, normalize, DEFAULT_TOLERANCE)
    }

    /// Like [`DiscreteDistribution::new`] with a caller-chosen sum tolerance.
    pub fn with_tolerance(
        values: Vec<V>,
        probabilities: Vec<f64>,
        normalize: bool,
        tolerance: f64,
    ) -> Result<Self, MathError> {
        if values.len() != probabilities.len() {
            return Err(MathError::shape(
                "values",
                values.len(),
                "probabilities",
                probabilities.len(),
            ));
        }
        check_mass(&probabilities)?;
        if let Some(index) = first_duplicate(&values) {
            return Err(MathError::DuplicateValue { index });
        }

        let sum: f64 = probabilities.iter().sum();
        let probabilities = if normalize {
            if sum <= 0.0 {
                return Err(MathError::InvalidProbability {
                    index: 0,
                    value: sum,
                });
            }
            tracing::trace!(sum, len = probabilities.len(), "normalizing distribution");
            normalize_weights(probabilities, sum)
        } else {
            if (sum - 1.0).abs() > tolerance {
                return Err(MathError::Unnormalized { sum });
            }
            probabilities
        };

        Ok(Self {
            entries: values.into_iter().zip(probabilities).collect(),
        })
    }

    /// Pair hypothesis values with (possibly unnormalized) posterior weights.
    pub fn from_weights(values: Vec<V>, weights: Vec<f64>) -> Result<Self, MathError> {
        Self::new(values, weights, true)
    }

    /// Probability mass at `value`, or `None` if it is not in the support list.
    pub fn get(&self, value: &V) -> Option<f64> {
        self.entries
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, p)| *p)
    }

    /// Probability mass at `value`, defaulting to zero for unknown values.
    pub fn probability_of(&self, value: &V) -> f64 {
        self.get(value).unwrap_or(0.0)
    }
}

impl<V> DiscreteDistribution<V> {
    /// Number of hypothesis values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(value, probability)` pairs in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (&V, f64)> + '_ {
        self.entries.iter().map(|(v, p)| (v, *p))
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.iter().map(|(v, _)| v)
    }

    /// Probabilities in stored order, as an owned vector for the updater.
    pub fn probabilities(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, p)| *p).collect()
    }

    /// Consume the distribution, returning its pairs in stored order.
    pub fn into_entries(self) -> Vec<(V, f64)> {
        self.entries
    }

    #[cfg(test)]
    pub(crate) fn from_entries_unchecked(entries: Vec<(V, f64)>) -> Self {
        Self { entries }
    }
}

/// Divide finite, non-negative `weights` by their positive `sum`.
///
/// Finite weights whose total overflows are rescaled by the peak first.
pub(crate) fn normalize_weights(weights: Vec<f64>, sum: f64) -> Vec<f64> {
    if sum.is_infinite() {
        let peak = weights.iter().copied().fold(0.0, f64::max);
        let scaled: Vec<f64> = weights.into_iter().map(|w| w / peak).collect();
        let total: f64 = scaled.iter().sum();
        scaled.into_iter().map(|w| w / total).collect()
    } else {
        weights.into_iter().map(|w| w / sum).collect()
    }
}

/// First weight that is negative or non-finite.
pub(crate) fn check_mass(weights: &[f64]) -> Result<(), MathError> {
    match weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        Some((index, &value)) => Err(MathError::InvalidProbability { index, value }),
        None => Ok(()),
    }
}

/// Index of the first value equal to an earlier one.
fn first_duplicate<V: PartialEq>(values: &[V]) -> Option<usize> {
    (1..values.len()).find(|&i| values[..i].contains(&values[i]))
}
