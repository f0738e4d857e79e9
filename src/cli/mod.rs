//! Command-line parsing for the Gaussian comparison tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the loading/scoring/plotting code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_DELIMITER, DEFAULT_LABEL, DEFAULT_STEMS, DEFAULT_X_MAX, DEFAULT_X_MIN};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gcmp", version, about = "Compare sampled NN output against the analytic Gaussian")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load samples, score them against the Gaussian, print a report, and optionally plot/export.
    Compare(CompareArgs),
    /// Print the RMSE rankings only (useful for scripting).
    Rank(CompareArgs),
    /// Browse the comparison figures in an interactive terminal viewer.
    Show(CompareArgs),
    /// Write synthetic NN-like sample files.
    Sample(SampleArgs),
}

/// Input selection shared by every reading command.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Directory containing the `<stem>.txt` sample files.
    #[arg(short = 'd', long, env = "GCMP_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// File stem to load (repeatable). The prefix before the first `_` selects the kind (v, d1, d2).
    #[arg(short = 'f', long = "file", value_name = "STEM", default_values_t = DEFAULT_STEMS.map(String::from))]
    pub files: Vec<String>,

    /// Source label appended to each stem to form the series key.
    #[arg(long, default_value = DEFAULT_LABEL)]
    pub label: String,

    /// Load every v_*, d1_* and d2_* text file in the data directory.
    #[arg(long)]
    pub discover: bool,

    /// Skip missing files instead of aborting.
    #[arg(long)]
    pub allow_missing: bool,

    /// Column delimiter of the sample files.
    #[arg(long, default_value = DEFAULT_DELIMITER)]
    pub delimiter: String,

    /// Gaussian width parameter `a` in exp(-a (x - b)^2).
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub gauss_a: f64,

    /// Gaussian center `b` in exp(-a (x - b)^2).
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub gauss_b: f64,

    /// Lower bound of the plotted x window.
    #[arg(long, default_value_t = DEFAULT_X_MIN, allow_hyphen_values = true)]
    pub x_min: f64,

    /// Upper bound of the plotted x window.
    #[arg(long, default_value_t = DEFAULT_X_MAX, allow_hyphen_values = true)]
    pub x_max: f64,
}

/// Options for comparing, ranking and viewing.
#[derive(Debug, Args, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Render ASCII plots in the terminal.
    #[arg(long)]
    pub ascii: bool,

    /// ASCII plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// ASCII plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Write comparison figures as SVG (`comp_<kind>.svg`) into this directory.
    #[arg(long, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,

    /// Also write RMSE ranking figures (`diff_<kind>.svg`); most useful with several NNs.
    #[arg(long)]
    pub rank_plots: bool,

    /// Export per-series scores to CSV.
    #[arg(long, value_name = "CSV")]
    pub export_csv: Option<PathBuf>,

    /// Export scores and Gaussian parameters to JSON.
    #[arg(long, value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for synthetic sample generation.
#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Output directory for the `<stem>.txt` files.
    #[arg(short = 'o', long, default_value = ".")]
    pub out: PathBuf,

    /// File stem to write (repeatable).
    #[arg(short = 'f', long = "file", value_name = "STEM", default_values_t = DEFAULT_STEMS.map(String::from))]
    pub files: Vec<String>,

    /// Number of samples per file.
    #[arg(short = 'n', long, default_value_t = 101)]
    pub points: usize,

    /// Lower bound of the sampled x grid.
    #[arg(long, default_value_t = DEFAULT_X_MIN, allow_hyphen_values = true)]
    pub x_min: f64,

    /// Upper bound of the sampled x grid.
    #[arg(long, default_value_t = DEFAULT_X_MAX, allow_hyphen_values = true)]
    pub x_max: f64,

    /// Standard deviation of additive Gaussian noise.
    #[arg(long, default_value_t = 0.01)]
    pub noise: f64,

    /// Relative amplitude error applied to every sample.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub bias: f64,

    /// Random seed for the noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Gaussian width parameter `a`.
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub gauss_a: f64,

    /// Gaussian center `b`.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub gauss_b: f64,

    /// Column delimiter to write.
    #[arg(long, default_value = DEFAULT_DELIMITER)]
    pub delimiter: String,
}
