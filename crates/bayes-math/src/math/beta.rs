//! Beta distribution CDF and quantile, used for Beta-Binomial credible intervals.
//!
//! The CDF is the regularized incomplete beta function I_x(a, b), evaluated
//! with the Lentz continued fraction (Numerical Recipes `betacf`). The
//! quantile inverts it by bisection, which is monotone and needs no
//! derivative.

use super::stable::log_beta;

const CF_MAX_ITERS: usize = 200;
const CF_EPS: f64 = 3.0e-12;
const CF_TINY: f64 = 1.0e-30;
const QUANTILE_TOL: f64 = 1e-12;
const QUANTILE_MAX_ITERS: usize = 200;

/// I_x(alpha, beta). NaN for invalid shape parameters.
pub fn beta_cdf(x: f64, alpha: f64, beta: f64) -> f64 {
    if x.is_nan() || invalid_shape(alpha, beta) {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let front = (alpha * x.ln() + beta * (-x).ln_1p() - log_beta(alpha, beta)).exp();
    // The fraction converges fastest on the side of the mean it is evaluated on.
    if x < (alpha + 1.0) / (alpha + beta + 2.0) {
        front * continued_fraction(alpha, beta, x) / alpha
    } else {
        1.0 - front * continued_fraction(beta, alpha, 1.0 - x) / beta
    }
}

/// Smallest x with I_x(alpha, beta) >= p, found by bisection on [0, 1].
pub fn beta_quantile(p: f64, alpha: f64, beta: f64) -> f64 {
    if p.is_nan() || invalid_shape(alpha, beta) {
        return f64::NAN;
    }
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }

    let (mut lo, mut hi) = (0.0f64, 1.0f64);
    for _ in 0..QUANTILE_MAX_ITERS {
        let mid = 0.5 * (lo + hi);
        if beta_cdf(mid, alpha, beta) < p {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo < QUANTILE_TOL {
            break;
        }
    }
    0.5 * (lo + hi)
}

fn invalid_shape(alpha: f64, beta: f64) -> bool {
    alpha.is_nan() || beta.is_nan() || alpha <= 0.0 || beta <= 0.0
}

fn continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    let clamp = |v: f64| if v.abs() < CF_TINY { CF_TINY } else { v };

    let (sum, plus, minus) = (a + b, a + 1.0, a - 1.0);
    let mut c = 1.0;
    let mut d = 1.0 / clamp(1.0 - sum * x / plus);
    let mut h = d;

    for m in 1..=CF_MAX_ITERS {
        let m = m as f64;
        let two_m = 2.0 * m;

        // Even step.
        let num = m * (b - m) * x / ((minus + two_m) * (a + two_m));
        d = 1.0 / clamp(1.0 + num * d);
        c = clamp(1.0 + num / c);
        h *= d * c;

        // Odd step.
        let num = -(a + m) * (sum + m) * x / ((a + two_m) * (plus + two_m));
        d = 1.0 / clamp(1.0 + num * d);
        c = clamp(1.0 + num / c);
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < CF_EPS {
            break;
        }
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return false;
        }
        (a - b).abs() <= tol
    }

    #[test]
    fn uniform_cdf_is_identity() {
        for x in [0.1, 0.42, 0.9] {
            assert!(approx_eq(beta_cdf(x, 1.0, 1.0), x, 1e-9));
        }
    }

    #[test]
    fn cdf_closed_form_beta_2_1() {
        // Beta(2, 1) has CDF x^2.
        assert!(approx_eq(beta_cdf(0.3, 2.0, 1.0), 0.09, 1e-9));
    }

    #[test]
    fn cdf_is_monotone_and_clamped() {
        assert!(beta_cdf(0.2, 2.0, 5.0) < beta_cdf(0.7, 2.0, 5.0));
        assert_eq!(beta_cdf(-0.5, 2.0, 5.0), 0.0);
        assert_eq!(beta_cdf(1.5, 2.0, 5.0), 1.0);
    }

    #[test]
    fn invalid_shape_gives_nan() {
        assert!(beta_cdf(0.5, 0.0, 1.0).is_nan());
        assert!(beta_quantile(0.5, 1.0, -1.0).is_nan());
        assert!(beta_quantile(f64::NAN, 1.0, 1.0).is_nan());
    }

    #[test]
    fn quantile_inverts_cdf() {
        let (a, b) = (3.0, 2.0);
        for p in [0.025, 0.25, 0.5, 0.975] {
            let x = beta_quantile(p, a, b);
            assert!(approx_eq(beta_cdf(x, a, b), p, 1e-8), "p={p}");
        }
    }

    #[test]
    fn quantile_of_symmetric_beta_median_is_half() {
        assert!(approx_eq(beta_quantile(0.5, 4.0, 4.0), 0.5, 1e-9));
    }
}
