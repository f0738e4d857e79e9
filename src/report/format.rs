//! Formatted terminal output.
//!
//! Formatting lives in one place so the scoring code stays clean and output
//! changes are localized.

use crate::domain::{CompareConfig, QuantityKind, Score};
use crate::io::ingest::Dataset;
use crate::report::Ranking;

/// Format the run summary (inputs, Gaussian parameters, per-kind scores).
pub fn format_run_summary(dataset: &Dataset, scores: &[Score], config: &CompareConfig) -> String {
    let mut out = String::new();

    out.push_str("=== gcmp - NN output vs. Gaussian ===\n");
    out.push_str(&format!("Data: {}\n", config.data_dir.display()));
    out.push_str(&format!(
        "Gaussian: g(x) = exp(-a (x - b)^2) | a={} b={}\n",
        config.params.a, config.params.b
    ));
    out.push_str(&format!("Series: {}\n", dataset.len()));

    for kind in QuantityKind::ALL {
        let rows: Vec<&Score> = scores.iter().filter(|s| s.key.kind == kind).collect();
        out.push_str(&format!("\n{} ({}):\n", kind.display_name(), kind.y_label()));
        if rows.is_empty() {
            out.push_str("  (no series)\n");
            continue;
        }
        out.push_str(&format_table(&rows));
    }

    out
}

/// Format the per-kind error rankings (worst first).
pub fn format_rankings(rankings: &[Ranking]) -> String {
    let mut out = String::new();

    for (i, ranking) in rankings.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{}:\n", ranking.kind.ranking_title()));
        let rows: Vec<&Score> = ranking.scores.iter().collect();
        out.push_str(&format_table(&rows));
    }

    if rankings.is_empty() {
        out.push_str("No series to rank.\n");
    }

    out
}

fn format_table(rows: &[&Score]) -> String {
    let mut out = String::new();
    out.push_str(format!("{:<24} {:>6} {:>12} {:>12}", "series", "n", "rmse", "max_abs").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<24} {:-<6} {:-<12} {:-<12}", "", "", "", "").trim_end());
    out.push('\n');

    for s in rows {
        out.push_str(
            format!(
                "{:<24} {:>6} {:>12} {:>12}",
                truncate(&s.key.name, 24),
                s.n,
                fmt_err(s.rmse),
                fmt_err(s.max_abs_error),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn fmt_err(v: f64) -> String {
    format!("{v:.4e}")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeriesKey;
    use crate::report::rank_by_error;

    fn score(name: &str, rmse: f64) -> Score {
        Score {
            key: SeriesKey::parse(name).unwrap(),
            rmse,
            max_abs_error: rmse,
            n: 101,
        }
    }

    #[test]
    fn table_rows_are_aligned() {
        let rows = [score("v_0_0_NN", 0.0056)];
        let refs: Vec<&Score> = rows.iter().collect();
        let expected = concat!(
            "series                        n         rmse      max_abs\n",
            "------------------------ ------ ------------ ------------\n",
            "v_0_0_NN                    101    5.6000e-3    5.6000e-3\n",
        );
        assert_eq!(format_table(&refs), expected);
    }

    #[test]
    fn rankings_list_kinds_with_titles() {
        let txt = format_rankings(&rank_by_error(&[score("v_0_0_NN", 0.1), score("d1_0_0_NN", 0.2)]));
        assert!(txt.starts_with("RMSE of Fitted NNs vs. Gaussian:\n"));
        assert!(txt.contains("RMSE of Fitted NNs vs. Gaussian, first derivative:\n"));
    }

    #[test]
    fn summary_marks_missing_kinds() {
        let txt = format_run_summary(&Dataset::default(), &[score("v_0_0_NN", 0.1)], &CompareConfig::default());
        assert!(txt.contains("second derivative (d^2/dx^2 f(x)):\n  (no series)\n"));
    }

    #[test]
    fn truncate_long_names() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
