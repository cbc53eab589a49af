//! Precondition errors raised by distribution construction and updating.
//!
//! Every error is detected before any computation proceeds, so a failing call
//! never leaves partial state behind. None of these are transient.

use thiserror::Error;

/// Errors raised by the Bayes Stat math core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MathError {
    #[error("shape mismatch: {left} has length {left_len} but {right} has length {right_len}")]
    ShapeMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },

    #[error("invalid probability mass at index {index}: {value}")]
    InvalidProbability { index: usize, value: f64 },

    #[error("probabilities sum to {sum}, not 1; construct with normalization")]
    Unnormalized { sum: f64 },

    #[error("duplicate hypothesis value at index {index}")]
    DuplicateValue { index: usize },

    #[error("{0} is empty")]
    EmptySequence(&'static str),

    #[error("distribution has no entries")]
    EmptyDistribution,

    #[error("zero evidence: every hypothesis assigns zero probability to the observed data")]
    ZeroEvidence,

    #[error("credible level must lie strictly between 0 and 1, got {0}")]
    InvalidLevel(f64),

    #[error("percentile must lie in [0, 1], got {0}")]
    InvalidPercentile(f64),

    #[error("invalid Beta parameter {name}={value}: must be positive and finite")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("invalid outcome {value} at index {index}: expected 0 or 1")]
    InvalidOutcome { index: usize, value: u8 },
}

impl MathError {
    pub(crate) fn shape(
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    ) -> Self {
        MathError::ShapeMismatch {
            left,
            left_len,
            right,
            right_len,
        }
    }

    /// Stable snake_case name, used in structured error context.
    pub fn kind(&self) -> &'static str {
        match self {
            MathError::ShapeMismatch { .. } => "shape_mismatch",
            MathError::InvalidProbability { .. } => "invalid_probability",
            MathError::Unnormalized { .. } => "unnormalized",
            MathError::DuplicateValue { .. } => "duplicate_value",
            MathError::EmptySequence(_) => "empty_sequence",
            MathError::EmptyDistribution => "empty_distribution",
            MathError::ZeroEvidence => "zero_evidence",
            MathError::InvalidLevel(_) => "invalid_level",
            MathError::InvalidPercentile(_) => "invalid_percentile",
            MathError::InvalidParameter { .. } => "invalid_parameter",
            MathError::InvalidOutcome { .. } => "invalid_outcome",
        }
    }
}
