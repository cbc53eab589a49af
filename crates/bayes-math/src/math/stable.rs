//! Log-domain helpers used when products of many likelihoods would underflow.

use std::f64::consts::PI;

const HALF_LN_2PI: f64 = 0.918_938_533_204_672_8;
const LANCZOS_G: f64 = 7.0;
#[allow(clippy::excessive_precision)] // Published Lanczos coefficients (g = 7, n = 9)
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// Stable ln(sum(exp(x))).
///
/// Empty input and all `-inf` input both give `-inf`; any NaN gives NaN.
pub fn log_sum_exp(log_values: &[f64]) -> f64 {
    if log_values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    let peak = log_values
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    if peak.is_infinite() {
        // Either nothing survived (-inf) or something dominates (+inf).
        return peak;
    }
    let scaled: f64 = log_values.iter().map(|v| (v - peak).exp()).sum();
    peak + scaled.ln()
}

/// Turn unnormalized log weights into probabilities that sum to one.
///
/// Returns `None` when every weight is `-inf` (no mass anywhere) or the
/// input contains NaN.
pub fn normalize_log_probs(log_weights: &[f64]) -> Option<Vec<f64>> {
    let log_total = log_sum_exp(log_weights);
    if !log_total.is_finite() {
        return None;
    }
    Some(
        log_weights
            .iter()
            .map(|w| (w - log_total).exp())
            .collect(),
    )
}

/// ln |Gamma(z)| via the Lanczos approximation, reflecting for z < 0.5.
pub fn log_gamma(z: f64) -> f64 {
    if z.is_nan() || z == f64::NEG_INFINITY {
        return f64::NAN;
    }
    if z == f64::INFINITY {
        return f64::INFINITY;
    }
    if z <= 0.0 && (z - z.round()).abs() < 1e-15 {
        // Poles at the non-positive integers.
        return f64::NAN;
    }
    if z < 0.5 {
        let sin_pi_z = (PI * z).sin();
        return PI.ln() - sin_pi_z.abs().ln() - log_gamma(1.0 - z);
    }

    let shifted = z - 1.0;
    let series = LANCZOS_COEFFS
        .iter()
        .enumerate()
        .skip(1)
        .fold(LANCZOS_COEFFS[0], |acc, (i, c)| acc + c / (shifted + i as f64));
    let t = shifted + LANCZOS_G + 0.5;
    HALF_LN_2PI + (shifted + 0.5) * t.ln() - t + series.ln()
}

/// ln B(a, b) = ln Gamma(a) + ln Gamma(b) - ln Gamma(a + b).
pub fn log_beta(a: f64, b: f64) -> f64 {
    log_gamma(a) + log_gamma(b) - log_gamma(a + b)
}

/// ln C(n, k); `-inf` when k > n.
pub fn log_choose(n: u64, k: u64) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    if k == 0 || k == n {
        return 0.0;
    }
    let (n, k) = (n as f64, k as f64);
    log_gamma(n + 1.0) - log_gamma(k + 1.0) - log_gamma(n - k + 1.0)
}
