//! Fuzz target for distribution construction, percentiles and updating.
//!
//! Structured input drives the public math API with arbitrary floats,
//! including NaN, infinities and mismatched lengths.

#![no_main]

use arbitrary::Arbitrary;
use bayes_math::updater::{likelihood, posterior};
use bayes_math::{credible_interval, percentile, BetaBinomial, DiscreteDistribution};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    values: Vec<i16>,
    weights: Vec<f64>,
    normalize: bool,
    p: f64,
    level: f64,
    datum: i16,
    alpha: f64,
    beta: f64,
    outcomes: Vec<u8>,
}

fuzz_target!(|input: Input| {
    if let Ok(dist) = DiscreteDistribution::new(input.values, input.weights, input.normalize) {
        let total: f64 = dist.probabilities().iter().sum();
        assert!((total - 1.0).abs() < 1e-6, "distribution sums to {total}");
        let _ = percentile(&dist, input.p);
        let _ = credible_interval(&dist, input.level);

        let hypotheses = vec![dist.clone(), dist];
        if let Ok(lik) = likelihood(&hypotheses, &input.datum) {
            let _ = posterior(&[0.5, 0.5], &lik);
        }
    }

    if let Ok(model) = BetaBinomial::new(input.alpha, input.beta) {
        if let Ok(post) = model.update(&input.outcomes) {
            let _ = post.credible_interval(input.level);
        }
    }
});
