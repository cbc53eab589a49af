//! Bayes Stat common types and errors.
//!
//! This crate provides types shared across the workspace:
//! - The unified error type with stable codes
//! - Output format selection for CLI commands

pub mod error;
pub mod output;

pub use error::{format_error_human, Error, ErrorCategory, Result, StructuredError, SuggestedAction};
pub use output::OutputFormat;

/// Schema version stamped on JSON output.
pub const SCHEMA_VERSION: &str = "1.0.0";
