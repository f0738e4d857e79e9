//! Shared comparison pipeline used by the CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> reference + scores -> rankings -> figures
//!
//! The front-ends then only deal with presentation (printing vs widgets vs files).

use crate::domain::{CompareConfig, Score};
use crate::error::AppError;
use crate::io::ingest::{Dataset, load_dataset};
use crate::plot::{ComparisonFigure, RankingFigure, comparison_figures, ranking_figures};
use crate::report::{Ranking, compute_scores, rank_by_error};

/// All computed outputs of a single comparison run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: Dataset,
    pub scores: Vec<Score>,
    pub rankings: Vec<Ranking>,
    pub figures: Vec<ComparisonFigure>,
    pub ranking_figures: Vec<RankingFigure>,
}

/// Load the configured files and run the pipeline on them.
pub fn run_compare(config: &CompareConfig) -> Result<RunOutput, AppError> {
    let dataset = load_dataset(config)?;
    run_compare_with_dataset(config, dataset)
}

/// Run the pipeline on an already loaded dataset.
///
/// Each quantity kind is handled independently: a kind without series yields
/// no score, ranking or figure.
pub fn run_compare_with_dataset(config: &CompareConfig, dataset: Dataset) -> Result<RunOutput, AppError> {
    if !(config.x_min.is_finite() && config.x_max.is_finite() && config.x_max > config.x_min) {
        return Err(AppError::input(format!(
            "Invalid x window [{}, {}].",
            config.x_min, config.x_max
        )));
    }

    let scores = compute_scores(&dataset, config.params)?;
    let rankings = rank_by_error(&scores);
    let figures = comparison_figures(&dataset, config.params, (config.x_min, config.x_max));
    let ranking_figures = ranking_figures(&rankings);

    Ok(RunOutput {
        dataset,
        scores,
        rankings,
        figures,
        ranking_figures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{QuantityKind, Series, SeriesKey};

    #[test]
    fn value_only_dataset_leaves_derivative_stages_empty() {
        let mut dataset = Dataset::default();
        dataset.insert(Series {
            key: SeriesKey::parse("v_0_0_NN").unwrap(),
            x: vec![0.0, 1.0],
            y: vec![1.0, 0.36],
        });

        let run = run_compare_with_dataset(&CompareConfig::default(), dataset).unwrap();
        assert_eq!(run.scores.len(), 1);
        assert_eq!(run.rankings.len(), 1);
        assert_eq!(run.figures.len(), 1);
        assert_eq!(run.figures[0].kind, QuantityKind::Value);
        assert!((run.scores[0].rmse - 0.0056).abs() < 1e-4);
    }

    #[test]
    fn inverted_window_is_rejected() {
        let config = CompareConfig {
            x_min: 1.0,
            x_max: -1.0,
            ..CompareConfig::default()
        };
        assert!(run_compare_with_dataset(&config, Dataset::default()).is_err());
    }
}
