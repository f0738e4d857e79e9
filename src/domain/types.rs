//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - used in-memory during loading and scoring
//! - exported to JSON/CSV
//! - handed to any of the renderers without conversion

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// File stems loaded when no `--file` is given.
pub const DEFAULT_STEMS: [&str; 3] = ["v_0_0", "d1_0_0", "d2_0_0"];

/// Source label appended to each stem to form the series key.
pub const DEFAULT_LABEL: &str = "NN";

/// Column delimiter used by the approximator's dump files.
pub const DEFAULT_DELIMITER: &str = "   ";

/// Fixed x window of the comparison figures.
pub const DEFAULT_X_MIN: f64 = -2.5;
pub const DEFAULT_X_MAX: f64 = 2.5;

/// Which quantity a series samples: the function or one of its derivatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QuantityKind {
    #[value(name = "v")]
    #[serde(rename = "v")]
    Value,
    #[value(name = "d1")]
    #[serde(rename = "d1")]
    FirstDerivative,
    #[value(name = "d2")]
    #[serde(rename = "d2")]
    SecondDerivative,
}

impl QuantityKind {
    pub const ALL: [QuantityKind; 3] = [
        QuantityKind::Value,
        QuantityKind::FirstDerivative,
        QuantityKind::SecondDerivative,
    ];

    /// File/key prefix (`v`, `d1`, `d2`).
    pub fn prefix(self) -> &'static str {
        match self {
            QuantityKind::Value => "v",
            QuantityKind::FirstDerivative => "d1",
            QuantityKind::SecondDerivative => "d2",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.prefix() == prefix)
    }

    /// Resolve the kind from a series key or file stem (text before the first `_`).
    pub fn from_key(key: &str) -> Option<Self> {
        key.split('_').next().and_then(Self::from_prefix)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            QuantityKind::Value => "value",
            QuantityKind::FirstDerivative => "first derivative",
            QuantityKind::SecondDerivative => "second derivative",
        }
    }

    pub fn y_label(self) -> &'static str {
        match self {
            QuantityKind::Value => "f(x)",
            QuantityKind::FirstDerivative => "d/dx f(x)",
            QuantityKind::SecondDerivative => "d^2/dx^2 f(x)",
        }
    }

    fn title_suffix(self) -> &'static str {
        match self {
            QuantityKind::Value => "",
            QuantityKind::FirstDerivative => ", first derivative",
            QuantityKind::SecondDerivative => ", second derivative",
        }
    }

    pub fn comparison_title(self) -> String {
        format!("Fitted NNs vs. Gaussian{}", self.title_suffix())
    }

    pub fn ranking_title(self) -> String {
        format!("RMSE of Fitted NNs vs. Gaussian{}", self.title_suffix())
    }
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Composite series identifier: quantity kind + full key (`v_0_0_NN`).
///
/// Ordering is by kind first, then by key, which fixes the order series are
/// plotted and reported in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    pub kind: QuantityKind,
    pub name: String,
}

impl SeriesKey {
    /// Build a key from a file stem and a source label (`v_0_0` + `NN`).
    pub fn from_stem(stem: &str, label: &str) -> Option<Self> {
        let kind = QuantityKind::from_key(stem)?;
        let name = if label.is_empty() {
            stem.to_string()
        } else {
            format!("{stem}_{label}")
        };
        Some(Self { kind, name })
    }

    pub fn parse(name: &str) -> Option<Self> {
        let kind = QuantityKind::from_key(name)?;
        Some(Self {
            kind,
            name: name.to_string(),
        })
    }

    /// Legend label: the key without its kind prefix (`v_0_0_NN` -> `0_0_NN`).
    pub fn legend_label(&self) -> &str {
        self.name
            .strip_prefix(self.kind.prefix())
            .and_then(|rest| rest.strip_prefix('_'))
            .unwrap_or(&self.name)
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A loaded sample table: `x[i]` pairs with `y[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub key: SeriesKey,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// `(x, y)` pairs in file order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Parameters of `g(x) = exp(-a (x - b)^2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianParams {
    pub a: f64,
    pub b: f64,
}

impl Default for GaussianParams {
    fn default() -> Self {
        Self { a: 1.0, b: 0.0 }
    }
}

/// Error score of one series against its analytic reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub key: SeriesKey,
    pub rmse: f64,
    pub max_abs_error: f64,
    pub n: usize,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults and `.env`).
#[derive(Debug, Clone)]
pub struct CompareConfig {
    pub data_dir: PathBuf,
    pub stems: Vec<String>,
    pub label: String,
    /// Load every `v_*`, `d1_*`, `d2_*` text file in `data_dir` instead of `stems`.
    pub discover: bool,
    /// Skip missing files with a warning instead of aborting.
    pub allow_missing: bool,
    pub delimiter: String,
    pub params: GaussianParams,

    pub x_min: f64,
    pub x_max: f64,

    pub ascii: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub save_dir: Option<PathBuf>,
    pub rank_plots: bool,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            stems: DEFAULT_STEMS.iter().map(|s| s.to_string()).collect(),
            label: DEFAULT_LABEL.to_string(),
            discover: false,
            allow_missing: false,
            delimiter: DEFAULT_DELIMITER.to_string(),
            params: GaussianParams::default(),
            x_min: DEFAULT_X_MIN,
            x_max: DEFAULT_X_MAX,
            ascii: false,
            plot_width: 100,
            plot_height: 25,
            save_dir: None,
            rank_plots: false,
            export_csv: None,
            export_json: None,
        }
    }
}

/// Configuration for writing synthetic approximator output.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub out_dir: PathBuf,
    pub stems: Vec<String>,
    pub points: usize,
    pub x_min: f64,
    pub x_max: f64,
    /// Standard deviation of the additive Gaussian noise.
    pub noise: f64,
    /// Relative amplitude error applied to every sample (`y * (1 + bias)`).
    pub bias: f64,
    pub seed: u64,
    pub params: GaussianParams,
    pub delimiter: String,
}
