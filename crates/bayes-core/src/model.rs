//! JSON model files for the `posterior` command.
//!
//! A model lists the hypotheses (each a numeric value, a prior weight and a
//! distribution over outcomes) plus the observed data:
//!
//! ```json
//! {
//!   "hypotheses": [
//!     { "value": 0.1, "prior": 0.5, "outcomes": { "values": ["H", "T"], "probabilities": [0.1, 0.9] } },
//!     { "value": 0.9, "prior": 0.5, "outcomes": { "values": ["H", "T"], "probabilities": [0.9, 0.1] } }
//!   ],
//!   "data": ["H", "H", "T"]
//! }
//! ```
//!
//! Outcome values may be any JSON scalar or structure; they are matched by
//! equality. Priors need not sum to one.

use std::path::Path;

use bayes_common::{Error, Result};
use bayes_math::updater::update_sequence;
use bayes_math::DiscreteDistribution;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Model file as written on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    pub hypotheses: Vec<HypothesisEntry>,

    #[serde(default)]
    pub data: Vec<Value>,
}

/// One hypothesis: its numeric value, prior weight and outcome distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisEntry {
    pub value: f64,
    pub prior: f64,
    pub outcomes: OutcomeTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeTable {
    pub values: Vec<Value>,
    pub probabilities: Vec<f64>,

    /// Rescale `probabilities` instead of requiring them to sum to one.
    #[serde(default)]
    pub normalize: bool,
}

/// Validated model ready for updating.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub values: Vec<f64>,
    pub prior: Vec<f64>,
    pub hypotheses: Vec<DiscreteDistribution<Value>>,
    pub data: Vec<Value>,
}

impl ModelFile {
    /// Load a model from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_json(&content)
    }

    /// Parse a model from a JSON string.
    pub fn parse_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidModel(format!("Invalid JSON: {}", e)))
    }

    /// Build every outcome distribution, failing on the first bad hypothesis.
    pub fn build(self, tolerance: f64) -> Result<Model> {
        if self.hypotheses.is_empty() {
            return Err(Error::InvalidModel("no hypotheses given".to_string()));
        }

        let mut values = Vec::with_capacity(self.hypotheses.len());
        let mut prior = Vec::with_capacity(self.hypotheses.len());
        let mut hypotheses = Vec::with_capacity(self.hypotheses.len());
        for (index, entry) in self.hypotheses.into_iter().enumerate() {
            if !entry.value.is_finite() {
                return Err(Error::InvalidModel(format!(
                    "hypotheses[{index}].value must be finite, got {}",
                    entry.value
                )));
            }
            if let Some(first) = values.iter().position(|v| *v == entry.value) {
                return Err(Error::InvalidModel(format!(
                    "hypotheses[{index}].value {} duplicates hypotheses[{first}]",
                    entry.value
                )));
            }
            let outcomes = DiscreteDistribution::with_tolerance(
                entry.outcomes.values,
                entry.outcomes.probabilities,
                entry.outcomes.normalize,
                tolerance,
            )
            .map_err(|e| Error::InvalidModel(format!("hypotheses[{index}].outcomes: {e}")))?;

            values.push(entry.value);
            prior.push(entry.prior);
            hypotheses.push(outcomes);
        }

        Ok(Model {
            values,
            prior,
            hypotheses,
            data: self.data,
        })
    }
}

impl Model {
    /// Posterior over the hypotheses after every datum, in file order.
    pub fn posterior(&self) -> Result<Vec<f64>> {
        Ok(update_sequence(&self.prior, &self.hypotheses, &self.data)?)
    }
}
