//! Beta-Binomial conjugate model for a binary success/failure process.
//!
//! The model uses:
//! - Prior: `p ~ Beta(α, β)`
//! - Likelihood: each outcome `x | p ~ Bernoulli(p)`
//! - Posterior after `k` successes and `m` failures: `Beta(α + k, β + m)`
//!
//! Updates return a new model and never touch the receiver, so a caller
//! holding the prior keeps it intact. [`SharedBetaBinomial`] is the one place
//! a model is mutated, behind a mutex.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use super::beta::beta_quantile;
use super::stable::{log_beta, log_choose};
use crate::error::MathError;

/// Beta(alpha, beta) belief about a success probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BetaBinomial {
    alpha: f64,
    beta: f64,
}

impl BetaBinomial {
    /// Create a model, rejecting non-positive or non-finite parameters.
    pub fn new(alpha: f64, beta: f64) -> Result<Self, MathError> {
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(MathError::InvalidParameter {
                name: "alpha",
                value: alpha,
            });
        }
        if !beta.is_finite() || beta <= 0.0 {
            return Err(MathError::InvalidParameter {
                name: "beta",
                value: beta,
            });
        }
        Ok(Self { alpha, beta })
    }

    /// Beta(1, 1), uniform on [0, 1].
    pub fn uniform() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Posterior after a sequence of outcomes (1 = success, 0 = failure).
    ///
    /// Every outcome is checked before any count is applied.
    ///
    /// # Example
    /// ```
    /// use bayes_math::BetaBinomial;
    ///
    /// let post = BetaBinomial::uniform().update(&[1, 1, 0]).unwrap();
    /// assert_eq!((post.alpha(), post.beta()), (3.0, 2.0));
    /// assert!((post.mean() - 0.6).abs() < 1e-12);
    /// ```
    pub fn update(&self, outcomes: &[u8]) -> Result<Self, MathError> {
        if let Some((index, &value)) = outcomes.iter().enumerate().find(|(_, o)| **o > 1) {
            return Err(MathError::InvalidOutcome { index, value });
        }
        let successes = outcomes.iter().filter(|o| **o == 1).count() as u64;
        let failures = outcomes.len() as u64 - successes;
        Ok(self.update_counts(successes, failures))
    }

    /// Posterior after `successes` and `failures` aggregated counts.
    pub fn update_counts(&self, successes: u64, failures: u64) -> Self {
        Self {
            alpha: self.alpha + successes as f64,
            beta: self.beta + failures as f64,
        }
    }

    /// Posterior mean α / (α + β); also the predictive probability of success.
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Posterior variance αβ / ((α+β)²(α+β+1)).
    pub fn variance(&self) -> f64 {
        let sum = self.alpha + self.beta;
        (self.alpha * self.beta) / (sum * sum * (sum + 1.0))
    }

    /// Central credible interval for the success probability.
    pub fn credible_interval(&self, level: f64) -> Result<(f64, f64), MathError> {
        if !(level > 0.0 && level < 1.0) {
            return Err(MathError::InvalidLevel(level));
        }
        let tail = (1.0 - level) / 2.0;
        Ok((
            beta_quantile(tail, self.alpha, self.beta),
            beta_quantile(1.0 - tail, self.alpha, self.beta),
        ))
    }

    /// Probability of exactly `successes` in `trials` future outcomes.
    ///
    /// P(k | n) = C(n, k) · B(α + k, β + n - k) / B(α, β); zero when k > n.
    pub fn predictive_pmf(&self, successes: u64, trials: u64) -> f64 {
        if successes > trials {
            return 0.0;
        }
        let failures = (trials - successes) as f64;
        let log_p = log_choose(trials, successes)
            + log_beta(self.alpha + successes as f64, self.beta + failures)
            - log_beta(self.alpha, self.beta);
        log_p.exp()
    }
}

impl Default for BetaBinomial {
    fn default() -> Self {
        Self::uniform()
    }
}

/// One logical model updated from several observation streams.
///
/// `observe` holds the lock across read, update and write, so concurrent
/// batches never overwrite each other.
#[derive(Debug, Default)]
pub struct SharedBetaBinomial {
    inner: Mutex<BetaBinomial>,
}

impl SharedBetaBinomial {
    pub fn new(model: BetaBinomial) -> Self {
        Self {
            inner: Mutex::new(model),
        }
    }

    /// Apply a batch of outcomes and return the resulting model.
    ///
    /// An invalid batch leaves the shared model unchanged.
    pub fn observe(&self, outcomes: &[u8]) -> Result<BetaBinomial, MathError> {
        // A poisoned lock still guards a valid Copy value.
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let next = guard.update(outcomes)?;
        *guard = next;
        Ok(next)
    }

    /// Current model.
    pub fn snapshot(&self) -> BetaBinomial {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
