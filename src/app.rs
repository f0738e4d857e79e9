//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initializes logging
//! - parses CLI arguments
//! - runs the comparison pipeline
//! - prints reports/plots
//! - writes optional figures and exports

use clap::Parser;

use crate::cli::{Command, CompareArgs, InputArgs, SampleArgs};
use crate::domain::{CompareConfig, GaussianParams, SampleConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `gcmp` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` may provide GCMP_DATA_DIR and RUST_LOG, so load it first.
    dotenvy::dotenv().ok();
    init_logging();

    // We want `gcmp` and `gcmp -d DIR` to behave like `gcmp compare ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Compare(args) => handle_compare(args, OutputMode::Full),
        Command::Rank(args) => handle_compare(args, OutputMode::RankOnly),
        Command::Show(args) => handle_show(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    // A second init (e.g. from tests) is harmless.
    let _ = env_logger::Builder::from_env(env).format_timestamp(None).try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    RankOnly,
}

fn handle_compare(args: CompareArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = compare_config_from_args(&args);
    let run = pipeline::run_compare(&config)?;

    match mode {
        OutputMode::Full => {
            println!(
                "{}",
                crate::report::format_run_summary(&run.dataset, &run.scores, &config)
            );
        }
        OutputMode::RankOnly => {
            println!("{}", crate::report::format_rankings(&run.rankings));
            return Ok(());
        }
    }

    if config.ascii {
        for fig in &run.figures {
            println!(
                "{}",
                crate::plot::render_ascii_figure(fig, config.plot_width, config.plot_height)
            );
        }
    }

    if config.rank_plots {
        println!("{}", crate::report::format_rankings(&run.rankings));
    }

    if let Some(dir) = &config.save_dir {
        let rankings: &[crate::plot::RankingFigure] = if config.rank_plots {
            &run.ranking_figures
        } else {
            &[]
        };
        let written = crate::plot::save_figures(dir, &run.figures, rankings)?;
        for path in written {
            println!("Wrote {}", path.display());
        }
    }

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::export::write_scores_csv(path, &run.scores)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::export::write_scores_json(path, config.params, &run.scores)?;
    }

    Ok(())
}

fn handle_show(args: CompareArgs) -> Result<(), AppError> {
    let config = compare_config_from_args(&args);
    let run = pipeline::run_compare(&config)?;
    crate::tui::run(run)
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = sample_config_from_args(&args);
    let written = crate::data::write_sample(&config)?;
    for path in written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

pub fn compare_config_from_args(args: &CompareArgs) -> CompareConfig {
    let input: &InputArgs = &args.input;
    CompareConfig {
        data_dir: input.data_dir.clone(),
        stems: input.files.clone(),
        label: input.label.clone(),
        discover: input.discover,
        allow_missing: input.allow_missing,
        delimiter: input.delimiter.clone(),
        params: GaussianParams {
            a: input.gauss_a,
            b: input.gauss_b,
        },
        x_min: input.x_min,
        x_max: input.x_max,
        ascii: args.ascii,
        plot_width: args.width,
        plot_height: args.height,
        save_dir: args.save_dir.clone(),
        rank_plots: args.rank_plots,
        export_csv: args.export_csv.clone(),
        export_json: args.export_json.clone(),
    }
}

pub fn sample_config_from_args(args: &SampleArgs) -> SampleConfig {
    SampleConfig {
        out_dir: args.out.clone(),
        stems: args.files.clone(),
        points: args.points,
        x_min: args.x_min,
        x_max: args.x_max,
        noise: args.noise,
        bias: args.bias,
        seed: args.seed,
        params: GaussianParams {
            a: args.gauss_a,
            b: args.gauss_b,
        },
        delimiter: args.delimiter.clone(),
    }
}

/// Rewrite argv so `gcmp` defaults to `gcmp compare`.
///
/// Rules:
/// - `gcmp`                        -> `gcmp compare`
/// - `gcmp -d DIR ...`             -> `gcmp compare -d DIR ...`
/// - `gcmp --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("compare".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "compare" | "rank" | "show" | "sample");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "compare flags".
    if arg1.starts_with('-') {
        argv.insert(1, "compare".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs_compare() {
        assert_eq!(rewrite_args(argv(&["gcmp"])), argv(&["gcmp", "compare"]));
    }

    #[test]
    fn leading_flags_run_compare() {
        assert_eq!(
            rewrite_args(argv(&["gcmp", "-d", "build", "--ascii"])),
            argv(&["gcmp", "compare", "-d", "build", "--ascii"])
        );
    }

    #[test]
    fn help_and_subcommands_are_untouched() {
        assert_eq!(rewrite_args(argv(&["gcmp", "--help"])), argv(&["gcmp", "--help"]));
        assert_eq!(rewrite_args(argv(&["gcmp", "rank", "-d", "x"])), argv(&["gcmp", "rank", "-d", "x"]));
    }

    #[test]
    fn parsed_defaults_match_dump_layout() {
        let cli = crate::cli::Cli::parse_from(argv(&["gcmp", "compare", "-d", "build/examples"]));
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        let config = compare_config_from_args(&args);
        assert_eq!(config.stems, ["v_0_0", "d1_0_0", "d2_0_0"]);
        assert_eq!(config.label, "NN");
        assert_eq!(config.delimiter, "   ");
        assert_eq!(config.params, GaussianParams { a: 1.0, b: 0.0 });
        assert_eq!((config.x_min, config.x_max), (-2.5, 2.5));
        assert_eq!(config.data_dir, std::path::PathBuf::from("build/examples"));
    }

    #[test]
    fn negative_values_parse() {
        let cli = crate::cli::Cli::parse_from(argv(&["gcmp", "sample", "--x-min", "-4", "--bias", "-0.1"]));
        let Command::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        let config = sample_config_from_args(&args);
        assert_eq!(config.x_min, -4.0);
        assert_eq!(config.bias, -0.1);
        assert_eq!(config.points, 101);
    }
}
