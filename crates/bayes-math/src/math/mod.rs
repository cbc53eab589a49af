//! Core math modules.

pub mod stable;
pub mod beta;
pub mod distribution;
pub mod percentile;
pub mod updater;
pub mod summary;
pub mod beta_binomial;
