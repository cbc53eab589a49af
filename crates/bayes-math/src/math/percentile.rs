//! Percentiles and central credible intervals of discrete distributions.
//!
//! Both walk the distribution in stored order and accumulate mass, so the
//! answer depends on the caller's value ordering (ascending for the usual
//! reading of "percentile").

use crate::error::MathError;
use crate::math::distribution::DiscreteDistribution;

/// First value at which cumulative mass strictly exceeds `p`.
///
/// When rounding keeps the running total at or below `p` (possible only for
/// `p` close to 1), the last value is returned.
///
/// # Example
/// ```
/// use bayes_math::{percentile, DiscreteDistribution};
///
/// let dist = DiscreteDistribution::new(vec![0, 1, 2], vec![0.2, 0.5, 0.3], false).unwrap();
/// assert_eq!(*percentile(&dist, 0.25).unwrap(), 1);
/// assert_eq!(*percentile(&dist, 0.6).unwrap(), 1);
/// assert_eq!(*percentile(&dist, 0.75).unwrap(), 2);
/// ```
pub fn percentile<V>(dist: &DiscreteDistribution<V>, p: f64) -> Result<&V, MathError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(MathError::InvalidPercentile(p));
    }

    let mut cumulative = 0.0;
    let mut last = None;
    for (value, mass) in dist.iter() {
        cumulative += mass;
        if cumulative > p {
            return Ok(value);
        }
        last = Some(value);
    }

    match last {
        Some(value) => {
            tracing::debug!(p, cumulative, "percentile not exceeded; using last value");
            Ok(value)
        }
        None => Err(MathError::EmptyDistribution),
    }
}

/// Central credible interval holding `level` of the mass.
///
/// The tails are `(1 - level) / 2` each, so the bounds are the percentiles
/// at `(1 - level) / 2` and `level + (1 - level) / 2`. `level` must lie in
/// the open interval (0, 1).
pub fn credible_interval<V>(
    dist: &DiscreteDistribution<V>,
    level: f64,
) -> Result<(&V, &V), MathError> {
    if !(level > 0.0 && level < 1.0) {
        return Err(MathError::InvalidLevel(level));
    }
    let lower = (1.0 - level) / 2.0;
    let upper = level + lower;
    Ok((percentile(dist, lower)?, percentile(dist, upper)?))
}
