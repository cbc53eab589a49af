//! Bayes Stat math: discrete Bayesian updating and the Beta-Binomial family.

pub mod error;
pub mod math;

pub use error::MathError;
pub use math::beta::*;
pub use math::beta_binomial::{BetaBinomial, SharedBetaBinomial};
pub use math::distribution::{DiscreteDistribution, DEFAULT_TOLERANCE};
pub use math::percentile::{credible_interval, percentile};
pub use math::stable::*;
pub use math::summary::{mean, median, mode, summarize, CredibleInterval, PosteriorSummary};
pub use math::updater;

/// Result alias for fallible math operations.
pub type Result<T> = std::result::Result<T, MathError>;
