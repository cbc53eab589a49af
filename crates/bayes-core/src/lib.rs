//! Bayes Stat core library.
//!
//! This library backs the `bayes-stat` binary:
//! - Exit codes for CLI operations
//! - Logging setup
//! - JSON model files for discrete posteriors
//! - Command implementations and their reports
//!
//! The binary entry point is in `main.rs`.

pub mod commands;
pub mod exit_codes;
pub mod logging;
pub mod model;
pub mod report;
