//! Sample table ingest.
//!
//! The approximator dumps each quantity as a two-column text table, one
//! `(x, y)` pair per line, columns separated by a fixed run of spaces:
//!
//! ```text
//! -2.5   0.00193
//! -2.45   0.00247
//! ```
//!
//! Parsing is strict: a line that does not yield two floats aborts the load.
//! No rows are skipped apart from whitespace-only lines.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{CompareConfig, QuantityKind, Series, SeriesKey};
use crate::error::AppError;

/// All series loaded for one run, ordered by key.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub series: BTreeMap<SeriesKey, Series>,
}

impl Dataset {
    /// Series of one quantity kind, in key order.
    pub fn of_kind(&self, kind: QuantityKind) -> impl Iterator<Item = &Series> + '_ {
        self.series.values().filter(move |s| s.key.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn insert(&mut self, series: Series) {
        self.series.insert(series.key.clone(), series);
    }
}

/// Load every configured series.
///
/// With `config.discover` the data directory is scanned instead of using
/// `config.stems`.
pub fn load_dataset(config: &CompareConfig) -> Result<Dataset, AppError> {
    if config.delimiter.is_empty() {
        return Err(AppError::input("Column delimiter must not be empty."));
    }

    let stems = if config.discover {
        discover_stems(&config.data_dir)?
    } else {
        config.stems.clone()
    };

    let mut dataset = Dataset::default();
    for stem in &stems {
        let key = SeriesKey::from_stem(stem, &config.label).ok_or_else(|| {
            AppError::input(format!(
                "Cannot infer quantity kind from file stem '{stem}' (expected a v_, d1_ or d2_ prefix)."
            ))
        })?;
        let path = series_path(&config.data_dir, stem);

        if !path.is_file() && config.allow_missing {
            log::warn!("Skipping missing sample file '{}'", path.display());
            continue;
        }

        let series = read_series_file(&path, key, &config.delimiter)?;
        log::info!(
            "Loaded {} ({} samples) from '{}'",
            series.key,
            series.len(),
            path.display()
        );
        dataset.insert(series);
    }

    if dataset.is_empty() {
        return Err(AppError::no_data(format!(
            "No sample files were loaded from '{}'.",
            config.data_dir.display()
        )));
    }

    Ok(dataset)
}

pub fn series_path(data_dir: &Path, stem: &str) -> PathBuf {
    data_dir.join(format!("{stem}.txt"))
}

/// Read one `(x, y)` table.
pub fn read_series_file(path: &Path, key: SeriesKey, delimiter: &str) -> Result<Series, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::input(format!("Failed to read sample file '{}': {e}", path.display())))?;

    let (x, y) = parse_series_text(&text, delimiter)
        .map_err(|e| AppError::input(format!("{}: {e}", path.display())))?;

    if x.is_empty() {
        return Err(AppError::no_data(format!(
            "Sample file '{}' contains no data.",
            path.display()
        )));
    }

    Ok(Series { key, x, y })
}

/// Parse table text into paired `x`/`y` columns.
///
/// Fields after the second one are ignored.
pub fn parse_series_text(text: &str, delimiter: &str) -> Result<(Vec<f64>, Vec<f64>), String> {
    let mut x = Vec::new();
    let mut y = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split(delimiter);
        let (Some(xs), Some(ys)) = (fields.next(), fields.next()) else {
            return Err(format!("line {line_no}: expected two columns, got '{line}'"));
        };

        x.push(parse_field(xs, line_no, "x")?);
        y.push(parse_field(ys, line_no, "y")?);
    }

    Ok((x, y))
}

fn parse_field(raw: &str, line_no: usize, column: &str) -> Result<f64, String> {
    let s = raw.trim();
    s.parse::<f64>()
        .map_err(|_| format!("line {line_no}: invalid {column} value '{s}'"))
}

/// Stems of every `v_*`, `d1_*` and `d2_*` text file in `dir`, sorted.
fn discover_stems(dir: &Path) -> Result<Vec<String>, AppError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| AppError::input(format!("Failed to list data directory '{}': {e}", dir.display())))?;

    let mut stems = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AppError::input(format!("Failed to read directory entry: {e}")))?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if stem.contains('_') && QuantityKind::from_key(stem).is_some() {
            stems.push(stem.to_string());
        }
    }
    stems.sort();
    log::debug!("Discovered {} sample files in '{}'", stems.len(), dir.display());
    Ok(stems)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EXIT_INPUT, EXIT_NO_DATA};

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    fn config_for(dir: &Path) -> CompareConfig {
        CompareConfig {
            data_dir: dir.to_path_buf(),
            ..CompareConfig::default()
        }
    }

    #[test]
    fn parses_three_space_table() {
        let (x, y) = parse_series_text("0.0   1.0\n1.0   0.36\n", "   ").unwrap();
        assert_eq!(x, vec![0.0, 1.0]);
        assert_eq!(y, vec![1.0, 0.36]);
    }

    #[test]
    fn tolerates_wider_gaps_and_extra_columns() {
        let (x, y) = parse_series_text("-1.5    0.105   extra\n2e-1   -3.5E+0\n", "   ").unwrap();
        assert_eq!(x, vec![-1.5, 0.2]);
        assert_eq!(y, vec![0.105, -3.5]);
    }

    #[test]
    fn non_numeric_field_is_an_error() {
        let err = parse_series_text("0.0   1.0\n1.0   abc\n", "   ").unwrap_err();
        assert!(err.contains("line 2"), "{err}");
        assert!(err.contains("abc"), "{err}");
    }

    #[test]
    fn single_space_rows_do_not_split() {
        assert!(parse_series_text("0.0 1.0\n", "   ").is_err());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let (x, _) = parse_series_text("0.0   1.0\n\n  \n1.0   0.5\n", "   ").unwrap();
        assert_eq!(x.len(), 2);
    }

    #[test]
    fn loads_default_stems() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "v_0_0.txt", "0.0   1.0\n1.0   0.36\n");
        write(dir.path(), "d1_0_0.txt", "0.5   -0.77\n");
        write(dir.path(), "d2_0_0.txt", "0.0   -2.0\n");

        let data = load_dataset(&config_for(dir.path())).unwrap();
        assert_eq!(data.len(), 3);
        let v: Vec<_> = data.of_kind(QuantityKind::Value).collect();
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].key.name, "v_0_0_NN");
        assert_eq!(v[0].y, vec![1.0, 0.36]);
    }

    #[test]
    fn missing_file_aborts_by_default() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "v_0_0.txt", "0.0   1.0\n");
        let err = load_dataset(&config_for(dir.path())).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
    }

    #[test]
    fn missing_files_can_be_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "v_0_0.txt", "0.0   1.0\n");
        let config = CompareConfig {
            allow_missing: true,
            ..config_for(dir.path())
        };
        let data = load_dataset(&config).unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.of_kind(QuantityKind::FirstDerivative).count(), 0);
    }

    #[test]
    fn empty_file_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "v_0_0.txt", "\n");
        let key = SeriesKey::from_stem("v_0_0", "NN").unwrap();
        let err = read_series_file(&dir.path().join("v_0_0.txt"), key, "   ").unwrap_err();
        assert_eq!(err.exit_code(), EXIT_NO_DATA);
    }

    #[test]
    fn discover_finds_all_kinds() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "v_0_0.txt", "0.0   1.0\n");
        write(dir.path(), "v_1_0.txt", "0.0   0.9\n");
        write(dir.path(), "d2_1_0.txt", "0.0   -2.0\n");
        write(dir.path(), "notes.txt", "ignored\n");
        write(dir.path(), "v_0_0.csv", "ignored\n");

        let config = CompareConfig {
            discover: true,
            ..config_for(dir.path())
        };
        let data = load_dataset(&config).unwrap();
        let names: Vec<&str> = data.series.keys().map(|k| k.name.as_str()).collect();
        assert_eq!(names, ["v_0_0_NN", "v_1_0_NN", "d2_1_0_NN"]);
    }

    #[test]
    fn unknown_stem_prefix_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = CompareConfig {
            stems: vec!["q_0_0".to_string()],
            ..config_for(dir.path())
        };
        assert!(load_dataset(&config).is_err());
    }
}
