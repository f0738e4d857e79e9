//! Reporting utilities: per-series scores and error rankings.

use crate::domain::{GaussianParams, QuantityKind, Score, Series};
use crate::error::AppError;
use crate::io::ingest::Dataset;
use crate::math::{max_abs_error, reference, rmse};

pub mod format;

pub use format::*;

/// Series of one kind ordered worst-first (descending RMSE).
#[derive(Debug, Clone)]
pub struct Ranking {
    pub kind: QuantityKind,
    pub scores: Vec<Score>,
}

/// Score one series against the analytic reference of its kind.
pub fn score_series(series: &Series, params: GaussianParams) -> Result<Score, AppError> {
    if series.x.len() != series.y.len() {
        return Err(AppError::no_data(format!(
            "Series {} has {} x values but {} y values.",
            series.key,
            series.x.len(),
            series.y.len()
        )));
    }
    let expected = reference(series.key.kind, &series.x, params);
    let rmse = rmse(&series.y, &expected)
        .map_err(|e| AppError::new(e.exit_code(), format!("{}: {e}", series.key)))?;
    let max_abs_error = max_abs_error(&series.y, &expected)?;

    Ok(Score {
        key: series.key.clone(),
        rmse,
        max_abs_error,
        n: series.len(),
    })
}

/// Compute a score for every series, in dataset order.
pub fn compute_scores(dataset: &Dataset, params: GaussianParams) -> Result<Vec<Score>, AppError> {
    let mut out = Vec::with_capacity(dataset.len());
    for series in dataset.series.values() {
        let score = score_series(series, params)?;
        log::debug!("{}: rmse={:.6e} max={:.6e}", score.key, score.rmse, score.max_abs_error);
        out.push(score);
    }
    Ok(out)
}

/// Rank the series of each kind by RMSE, worst first.
///
/// Kinds without any score are omitted.
pub fn rank_by_error(scores: &[Score]) -> Vec<Ranking> {
    QuantityKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let mut sorted: Vec<Score> = scores.iter().filter(|s| s.key.kind == kind).cloned().collect();
            if sorted.is_empty() {
                return None;
            }
            sorted.sort_by(|a, b| b.rmse.partial_cmp(&a.rmse).unwrap_or(std::cmp::Ordering::Equal));
            Some(Ranking { kind, scores: sorted })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeriesKey;

    fn series(name: &str, x: Vec<f64>, y: Vec<f64>) -> Series {
        Series {
            key: SeriesKey::parse(name).unwrap(),
            x,
            y,
        }
    }

    #[test]
    fn exact_reference_scores_zero() {
        let p = GaussianParams::default();
        let x: Vec<f64> = (0..21).map(|i| -2.0 + 0.2 * i as f64).collect();
        for kind in QuantityKind::ALL {
            let y = reference(kind, &x, p);
            let s = series(&format!("{}_0_0_NN", kind.prefix()), x.clone(), y);
            let score = score_series(&s, p).unwrap();
            assert_eq!(score.rmse, 0.0);
            assert_eq!(score.n, 21);
        }
    }

    #[test]
    fn worked_value_example() {
        let s = series("v_0_0_NN", vec![0.0, 1.0], vec![1.0, 0.36]);
        let score = score_series(&s, GaussianParams::default()).unwrap();
        assert!((score.rmse - 0.0056).abs() < 1e-4, "rmse={}", score.rmse);
        assert!((score.max_abs_error - ((-1.0f64).exp() - 0.36)).abs() < 1e-12);
    }

    #[test]
    fn unequal_columns_are_rejected() {
        let s = series("d1_0_0_NN", vec![0.0, 1.0], vec![0.0]);
        assert!(score_series(&s, GaussianParams::default()).is_err());
    }

    #[test]
    fn ranking_is_worst_first_per_kind() {
        let mk = |name: &str, rmse: f64| Score {
            key: SeriesKey::parse(name).unwrap(),
            rmse,
            max_abs_error: rmse,
            n: 1,
        };
        let scores = vec![
            mk("v_0_0_NN", 0.1),
            mk("v_1_0_NN", 0.3),
            mk("v_2_0_NN", 0.2),
            mk("d2_0_0_NN", 0.5),
        ];
        let rankings = rank_by_error(&scores);
        assert_eq!(rankings.len(), 2);
        assert_eq!(rankings[0].kind, QuantityKind::Value);
        let order: Vec<&str> = rankings[0].scores.iter().map(|s| s.key.name.as_str()).collect();
        assert_eq!(order, ["v_1_0_NN", "v_2_0_NN", "v_0_0_NN"]);
        assert_eq!(rankings[1].kind, QuantityKind::SecondDerivative);
    }
}
