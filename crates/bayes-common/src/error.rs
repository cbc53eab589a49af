//! Error types for Bayes Stat.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Remediation suggestions for humans
//! - Suggested actions for scripts driving the CLI
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Zero Evidence
//!   Reason: zero evidence: every hypothesis assigns zero probability to the observed data
//!   Fix: Every hypothesis ruled out the data. Revisit the priors or widen the hypothesis space.
//! ```
//!
//! # Machine-Facing Output
//!
//! ```json
//! {
//!   "code": 30,
//!   "category": "inference",
//!   "message": "zero evidence: every hypothesis assigns zero probability to the observed data",
//!   "retryable": false,
//!   "suggested_action": "revise_priors",
//!   "context": { "kind": "zero_evidence" }
//! }
//! ```

use bayes_math::MathError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for Bayes Stat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Settings file errors.
    Config,
    /// Malformed arguments, model files, or distribution inputs.
    Input,
    /// The data contradicts every hypothesis.
    Inference,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Inference => write!(f, "inference"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Suggested next step for whoever is driving the tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    /// Correct the arguments or model file and run again.
    FixInput,
    /// Revisit the priors or the hypothesis space.
    RevisePriors,
    /// Correct or remove the settings file.
    FixConfig,
    /// Retry the operation.
    Retry,
    /// Manual intervention required.
    ManualIntervention,
}

impl std::fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestedAction::FixInput => write!(f, "fix_input"),
            SuggestedAction::RevisePriors => write!(f, "revise_priors"),
            SuggestedAction::FixConfig => write!(f, "fix_config"),
            SuggestedAction::Retry => write!(f, "retry"),
            SuggestedAction::ManualIntervention => write!(f, "manual_intervention"),
        }
    }
}

/// Unified error type for Bayes Stat.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("settings schema version mismatch: expected {expected}, got {actual}")]
    SchemaVersion { expected: String, actual: String },

    // Input errors (20-29)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid model file: {0}")]
    InvalidModel(String),

    // Math errors: 22 for malformed inputs, 30 for zero evidence
    #[error(transparent)]
    Math(#[from] MathError),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Input errors
    /// - 30-39: Inference errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidSettings(_) => 11,
            Error::SchemaVersion { .. } => 12,
            Error::InvalidArgument(_) => 20,
            Error::InvalidModel(_) => 21,
            Error::Math(MathError::ZeroEvidence) => 30,
            Error::Math(_) => 22,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidSettings(_) | Error::SchemaVersion { .. } => {
                ErrorCategory::Config
            }
            Error::InvalidArgument(_) | Error::InvalidModel(_) => ErrorCategory::Input,
            Error::Math(MathError::ZeroEvidence) => ErrorCategory::Inference,
            Error::Math(_) => ErrorCategory::Input,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Whether running the same command again could succeed.
    ///
    /// Every precondition and inference error is deterministic; only I/O
    /// failures can be transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Returns the suggested action for scripts.
    pub fn suggested_action(&self) -> SuggestedAction {
        match self {
            Error::Config(_) | Error::InvalidSettings(_) | Error::SchemaVersion { .. } => {
                SuggestedAction::FixConfig
            }
            Error::InvalidArgument(_) | Error::InvalidModel(_) => SuggestedAction::FixInput,
            Error::Math(MathError::ZeroEvidence) => SuggestedAction::RevisePriors,
            Error::Math(_) => SuggestedAction::FixInput,
            Error::Io(_) => SuggestedAction::Retry,
            Error::Json(_) => SuggestedAction::ManualIntervention,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) => {
                "Check the settings file path given by --config or BAYES_STAT_CONFIG."
            }
            Error::InvalidSettings(_) => {
                "Fix the reported field in settings.json, or delete the file to use built-in defaults."
            }
            Error::SchemaVersion { .. } => {
                "Update schema_version in settings.json to the version this build expects."
            }
            Error::InvalidArgument(_) => "Run with --help to see the expected arguments.",
            Error::InvalidModel(_) => {
                "Each hypothesis needs a value, a prior and an outcome distribution; see 'bayes-stat posterior --help'."
            }
            Error::Math(MathError::ZeroEvidence) => {
                "Every hypothesis ruled out the data. Revisit the priors or widen the hypothesis space."
            }
            Error::Math(MathError::Unnormalized { .. }) => {
                "Probabilities must sum to 1. Pass --normalize to rescale them."
            }
            Error::Math(MathError::InvalidLevel(_)) => {
                "Pass a credible level strictly between 0 and 1, e.g. --level 0.9."
            }
            Error::Math(_) => "Check that paired inputs have equal length and valid values.",
            Error::Io(_) => "Check that the file exists and is readable, then retry.",
            Error::Json(_) => "Invalid JSON. Check syntax with 'jq . <file>'.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::InvalidSettings(_) => "Invalid Settings",
            Error::SchemaVersion { .. } => "Settings Schema Mismatch",
            Error::InvalidArgument(_) => "Invalid Argument",
            Error::InvalidModel(_) => "Invalid Model File",
            Error::Math(MathError::ZeroEvidence) => "Zero Evidence",
            Error::Math(_) => "Invalid Distribution Input",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Parse Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether a retry could succeed.
    pub retryable: bool,

    /// Suggested next step.
    pub suggested_action: SuggestedAction,

    /// Additional structured context (e.g., offending index).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::SchemaVersion { expected, actual } => {
                context.insert("expected".to_string(), serde_json::json!(expected));
                context.insert("actual".to_string(), serde_json::json!(actual));
            }
            Error::Math(math) => {
                context.insert("kind".to_string(), serde_json::json!(math.kind()));
                match math {
                    MathError::InvalidProbability { index, .. }
                    | MathError::DuplicateValue { index }
                    | MathError::InvalidOutcome { index, .. } => {
                        context.insert("index".to_string(), serde_json::json!(index));
                    }
                    MathError::InvalidParameter { name, .. } => {
                        context.insert("parameter".to_string(), serde_json::json!(name));
                    }
                    _ => {}
                }
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            retryable: err.is_retryable(),
            suggested_action: err.suggested_action(),
            context,
        }
    }
}

impl StructuredError {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}
