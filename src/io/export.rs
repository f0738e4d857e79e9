//! Export scores to CSV/JSON and write sample tables.
//!
//! The CSV export is meant to be easy to consume in spreadsheets or downstream
//! scripts; the JSON report also records the Gaussian parameters it was
//! scored against.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::domain::{GaussianParams, Score, Series};
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct ScoreRow<'a> {
    key: &'a str,
    kind: &'a str,
    label: &'a str,
    n: usize,
    rmse: f64,
    max_abs_error: f64,
}

/// Serialized form of a whole scoring run.
#[derive(Debug, Serialize)]
pub struct ScoreReport<'a> {
    pub tool: &'static str,
    pub gaussian: GaussianParams,
    pub scores: &'a [Score],
}

/// Write one row per score.
pub fn write_scores_csv(path: &Path, scores: &[Score]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::input(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    for s in scores {
        writer
            .serialize(ScoreRow {
                key: &s.key.name,
                kind: s.key.kind.prefix(),
                label: s.key.legend_label(),
                n: s.n,
                rmse: s.rmse,
                max_abs_error: s.max_abs_error,
            })
            .map_err(|e| AppError::input(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to flush export CSV: {e}")))?;
    log::info!("Wrote {} scores to '{}'", scores.len(), path.display());
    Ok(())
}

pub fn write_scores_json(path: &Path, params: GaussianParams, scores: &[Score]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create report JSON '{}': {e}", path.display())))?;

    let report = ScoreReport {
        tool: "gcmp",
        gaussian: params,
        scores,
    };
    serde_json::to_writer_pretty(BufWriter::new(file), &report)
        .map_err(|e| AppError::input(format!("Failed to write report JSON: {e}")))?;

    log::info!("Wrote report to '{}'", path.display());
    Ok(())
}

/// Write a series in the approximator's table format.
pub fn write_series_file(path: &Path, series: &Series, delimiter: &str) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create sample file '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    for (x, y) in series.points() {
        writeln!(out, "{x}{delimiter}{y}")
            .map_err(|e| AppError::input(format!("Failed to write sample file '{}': {e}", path.display())))?;
    }
    out.flush()
        .map_err(|e| AppError::input(format!("Failed to flush sample file '{}': {e}", path.display())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeriesKey;
    use crate::io::ingest::read_series_file;

    fn score(name: &str, rmse: f64) -> Score {
        Score {
            key: SeriesKey::parse(name).unwrap(),
            rmse,
            max_abs_error: rmse * 2.0,
            n: 10,
        }
    }

    #[test]
    fn csv_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.csv");
        write_scores_csv(&path, &[score("v_0_0_NN", 0.5), score("d1_0_0_NN", 0.25)]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "key,kind,label,n,rmse,max_abs_error");
        assert_eq!(lines[1], "v_0_0_NN,v,0_0_NN,10,0.5,1.0");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn json_report_carries_params() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_scores_json(&path, GaussianParams::default(), &[score("v_0_0_NN", 0.5)]).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["gaussian"]["a"], 1.0);
        assert_eq!(value["scores"][0]["key"]["kind"], "v");
        assert_eq!(value["scores"][0]["rmse"], 0.5);
    }

    #[test]
    fn written_series_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("d1_0_0.txt");
        let key = SeriesKey::from_stem("d1_0_0", "NN").unwrap();
        let series = Series {
            key: key.clone(),
            x: vec![-0.5, 0.0, 0.5],
            y: vec![0.7788007830714049, 0.0, -0.7788007830714049],
        };
        write_series_file(&path, &series, "   ").unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("-0.5   0.7788007830714049\n"));
        assert_eq!(read_series_file(&path, key, "   ").unwrap(), series);
    }
}
