//! Bayes Stat - discrete Bayesian updating from the command line
//!
//! The main entry point for bayes-stat, handling:
//! - Percentiles and credible intervals of discrete distributions
//! - Posterior summaries (mean, mode, median)
//! - Discrete posteriors from JSON model files
//! - Beta-Binomial conjugate updates

use std::io::IsTerminal;
use std::path::PathBuf;

use bayes_common::{format_error_human, Error, OutputFormat, Result, StructuredError};
use bayes_config::{load_settings, LoadedSettings};
use bayes_core::commands::{
    distribution_from_args, run_beta, run_config, run_interval, run_percentile, run_posterior,
    run_summary, settings_error,
};
use bayes_core::exit_codes::ExitCode;
use bayes_core::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use bayes_core::report::render;
use bayes_math::DiscreteDistribution;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

/// Bayes Stat - discrete Bayesian updating and Beta-Binomial inference
#[derive(Parser)]
#[command(name = "bayes-stat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to settings.json (overrides BAYES_STAT_CONFIG and XDG lookup)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr: human or jsonl
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

/// A discrete distribution given as two parallel lists.
#[derive(Args, Debug)]
struct DistArgs {
    /// Hypothesis values, comma separated, in the order percentiles walk them
    #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
    values: Vec<f64>,

    /// Probability of each value, comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    probs: Vec<f64>,

    /// Rescale the probabilities to sum to one instead of requiring it
    #[arg(long)]
    normalize: bool,
}

impl DistArgs {
    fn build(&self, loaded: &LoadedSettings) -> Result<DiscreteDistribution<f64>> {
        distribution_from_args(
            self.values.clone(),
            self.probs.clone(),
            self.normalize,
            loaded,
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Value at which cumulative probability first exceeds P
    Percentile {
        #[command(flatten)]
        dist: DistArgs,

        /// Cumulative probability in [0, 1]
        #[arg(long)]
        p: f64,
    },

    /// Central credible interval of a distribution
    Interval {
        #[command(flatten)]
        dist: DistArgs,

        /// Central mass to capture, in (0, 1); defaults to credible_level from settings
        #[arg(long)]
        level: Option<f64>,
    },

    /// Mean, mode, median and optional credible interval
    Summary {
        #[command(flatten)]
        dist: DistArgs,

        /// Central mass for the credible interval
        #[arg(long)]
        level: Option<f64>,
    },

    /// Posterior over the hypotheses of a JSON model after its observed data
    Posterior {
        /// Model file: {"hypotheses": [{"value", "prior", "outcomes": {"values", "probabilities"}}], "data": [..]}
        #[arg(long)]
        model: PathBuf,

        /// Central mass for the credible interval
        #[arg(long)]
        level: Option<f64>,
    },

    /// Beta-Binomial update of Beta(alpha, beta) on 0/1 outcomes
    Beta {
        /// Prior successes pseudo-count
        #[arg(long, default_value_t = 1.0)]
        alpha: f64,

        /// Prior failures pseudo-count
        #[arg(long, default_value_t = 1.0)]
        beta: f64,

        /// Observed outcomes, comma separated (1 = success, 0 = failure)
        #[arg(long, value_delimiter = ',')]
        outcomes: Vec<u8>,

        /// Central mass for the credible interval
        #[arg(long)]
        level: Option<f64>,
    },

    /// Show the resolved settings and where they came from
    Config,
}

// ============================================================================
// Main entry point
// ============================================================================

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version come through here too.
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Ok
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    let log_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };
    init_logging(&LogConfig::from_env(log_level, cli.global.log_format));

    let exit_code = match run(&cli) {
        Ok(()) => ExitCode::Ok,
        Err(err) => {
            print_error(&err, cli.global.format);
            let code = ExitCode::from(&err);
            debug!(exit = %code, "command failed");
            code
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn run(cli: &Cli) -> Result<()> {
    let loaded = load_settings(cli.global.config.as_deref()).map_err(settings_error)?;
    debug!(source = %loaded.source, "settings resolved");

    let format = cli.global.format;
    let precision = loaded.settings.display_precision;

    let output = match &cli.command {
        Commands::Percentile { dist, p } => {
            let dist = dist.build(&loaded)?;
            render(&run_percentile(&dist, *p)?, format, precision)?
        }
        Commands::Interval { dist, level } => {
            let dist = dist.build(&loaded)?;
            render(&run_interval(&dist, *level, &loaded)?, format, precision)?
        }
        Commands::Summary { dist, level } => {
            let dist = dist.build(&loaded)?;
            render(&run_summary(&dist, *level, &loaded)?, format, precision)?
        }
        Commands::Posterior { model, level } => {
            render(&run_posterior(model, *level, &loaded)?, format, precision)?
        }
        Commands::Beta {
            alpha,
            beta,
            outcomes,
            level,
        } => render(
            &run_beta(*alpha, *beta, outcomes, *level, &loaded)?,
            format,
            precision,
        )?,
        Commands::Config => render(&run_config(&loaded), format, precision)?,
    };

    println!("{output}");
    Ok(())
}

/// Errors go to stderr: structured JSON for `--format json`, prose otherwise.
fn print_error(err: &Error, format: OutputFormat) {
    match format {
        OutputFormat::Json => eprintln!("{}", StructuredError::from(err).to_json()),
        OutputFormat::Summary => {
            eprintln!("{}", format_error_human(err, std::io::stderr().is_terminal()))
        }
    }
}
