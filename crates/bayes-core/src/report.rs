//! Command payloads and their rendering.
//!
//! Every command returns one of these reports; `main` renders it as pretty
//! JSON (the default) or as a short summary honoring `display_precision`.

use std::path::PathBuf;

use bayes_common::{OutputFormat, Result, SCHEMA_VERSION};
use bayes_config::Settings;
use bayes_math::{BetaBinomial, CredibleInterval, PosteriorSummary};
use serde::Serialize;

/// A command result that can be printed in every output format.
pub trait Report: Serialize {
    /// Short human-readable rendering with `precision` decimal places.
    fn summary(&self, precision: usize) -> String;
}

/// JSON output wrapper stamping the schema version on every payload.
#[derive(Serialize)]
struct Envelope<'a, R> {
    schema_version: &'static str,
    #[serde(flatten)]
    report: &'a R,
}

/// Render a report for stdout.
pub fn render<R: Report>(report: &R, format: OutputFormat, precision: usize) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&Envelope {
            schema_version: SCHEMA_VERSION,
            report,
        })?),
        OutputFormat::Summary => Ok(report.summary(precision)),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileReport {
    pub p: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalReport {
    #[serde(flatten)]
    pub interval: CredibleInterval,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    #[serde(flatten)]
    pub summary: PosteriorSummary,
}

/// Posterior mass for one hypothesis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HypothesisPosterior {
    pub value: f64,
    pub prior: f64,
    pub posterior: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosteriorReport {
    pub observations: usize,
    pub hypotheses: Vec<HypothesisPosterior>,
    pub summary: PosteriorSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BetaReport {
    pub prior: BetaBinomial,
    pub posterior: BetaBinomial,
    pub successes: u64,
    pub failures: u64,
    pub mean: f64,
    pub variance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credible_interval: Option<CredibleInterval>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigReport {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub settings: Settings,
}

fn interval_line(interval: &CredibleInterval, precision: usize) -> String {
    format!(
        "{:.0}% credible interval: [{:.prec$}, {:.prec$}]",
        interval.level * 100.0,
        interval.lower,
        interval.upper,
        prec = precision
    )
}

fn summary_lines(summary: &PosteriorSummary, precision: usize) -> Vec<String> {
    let mut lines = vec![
        format!("mean:   {:.prec$}", summary.mean, prec = precision),
        format!("mode:   {:.prec$}", summary.mode, prec = precision),
        format!("median: {:.prec$}", summary.median, prec = precision),
    ];
    if let Some(interval) = &summary.credible_interval {
        lines.push(interval_line(interval, precision));
    }
    lines
}

impl Report for PercentileReport {
    fn summary(&self, precision: usize) -> String {
        format!(
            "percentile {:.prec$}: {:.prec$}",
            self.p,
            self.value,
            prec = precision
        )
    }
}

impl Report for IntervalReport {
    fn summary(&self, precision: usize) -> String {
        interval_line(&self.interval, precision)
    }
}

impl Report for SummaryReport {
    fn summary(&self, precision: usize) -> String {
        summary_lines(&self.summary, precision).join("\n")
    }
}

impl Report for PosteriorReport {
    fn summary(&self, precision: usize) -> String {
        let mut lines = vec![format!(
            "{} hypotheses, {} observations",
            self.hypotheses.len(),
            self.observations
        )];
        for h in &self.hypotheses {
            lines.push(format!(
                "  {:>12.prec$}  prior {:.prec$}  posterior {:.prec$}",
                h.value,
                h.prior,
                h.posterior,
                prec = precision
            ));
        }
        lines.extend(summary_lines(&self.summary, precision));
        lines.join("\n")
    }
}

impl Report for BetaReport {
    fn summary(&self, precision: usize) -> String {
        let mut lines = vec![
            format!(
                "Beta({}, {}) -> Beta({}, {}) after {} successes, {} failures",
                self.prior.alpha(),
                self.prior.beta(),
                self.posterior.alpha(),
                self.posterior.beta(),
                self.successes,
                self.failures
            ),
            format!("mean:     {:.prec$}", self.mean, prec = precision),
            format!("variance: {:.prec$}", self.variance, prec = precision),
        ];
        if let Some(interval) = &self.credible_interval {
            lines.push(interval_line(interval, precision));
        }
        lines.join("\n")
    }
}

impl Report for ConfigReport {
    fn summary(&self, _precision: usize) -> String {
        let path = self
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string());
        let level = self
            .settings
            .credible_level
            .map(|l| l.to_string())
            .unwrap_or_else(|| "(unset)".to_string());
        format!(
            "source:            {}\npath:              {}\nschema_version:    {}\ntolerance:         {:e}\ncredible_level:    {}\ndisplay_precision: {}",
            self.source,
            path,
            self.settings.schema_version,
            self.settings.tolerance,
            level,
            self.settings.display_precision
        )
    }
}
