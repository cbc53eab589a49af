//! Exit codes for the bayes-stat CLI.
//!
//! Exit codes communicate operation outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0: Success
//! - 10-19: User/input errors (resolved by fixing arguments, settings or data)
//! - 20-29: Internal and I/O errors

use bayes_common::Error;
use bayes_math::MathError;

/// Exit codes for bayes-stat operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Ok = 0,

    // ========================================================================
    // User / Input Errors (10-19)
    // ========================================================================
    /// Invalid arguments
    ArgsError = 10,

    /// Settings file missing, malformed or out of range
    ConfigError = 11,

    /// Distribution or model input violates a precondition
    InputError = 12,

    /// Every hypothesis assigns zero probability to the data
    InferenceError = 13,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Ok => "OK",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::InputError => "ERR_INPUT",
            ExitCode::InferenceError => "ERR_INFERENCE",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::InvalidArgument(_) => ExitCode::ArgsError,
            Error::Config(_) | Error::InvalidSettings(_) | Error::SchemaVersion { .. } => {
                ExitCode::ConfigError
            }
            Error::InvalidModel(_) => ExitCode::InputError,
            Error::Math(MathError::ZeroEvidence) => ExitCode::InferenceError,
            Error::Math(_) => ExitCode::InputError,
            Error::Io(_) => ExitCode::IoError,
            // Inputs are parsed into typed errors upstream; a bare JSON error
            // means serializing our own output failed.
            Error::Json(_) => ExitCode::InternalError,
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
