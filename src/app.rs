//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the data source
//! - runs the load pipeline and renders the SVG, or hands off to the TUI
//! - writes synthetic sample datasets

use clap::Parser;

use crate::cli::{Command, RenderArgs, SampleArgs};
use crate::data::{sample, DataSource};
use crate::domain::{ChartConfig, GroupingScheme};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `sentiment` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `sentiment` (and `sentiment -s region ...`) to behave
    // like `sentiment tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while keeping the interactive UI the default.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Render(args) => handle_render(args),
        Command::Tui(args) => crate::tui::run(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_render(args: RenderArgs) -> Result<(), AppError> {
    let source = data_source_from_args(&args)?;
    let config = ChartConfig {
        scheme: args.scheme,
        metric: args.metric.clone(),
    };

    let Some(chart) = pipeline::load_chart(&source, &config)? else {
        // An empty dataset is not an error; it just draws nothing.
        eprintln!(
            "No data rows in {}; nothing rendered.",
            source.describe(args.scheme)
        );
        return Ok(());
    };

    for err in &chart.row_errors {
        eprintln!("line {}: {}", err.line, err.message);
    }

    crate::plot::render::render_svg(&chart, &args.out)?;
    println!(
        "Wrote {} ({} of {} rows used).",
        args.out.display(),
        chart.rows_used,
        chart.rows_read
    );
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    std::fs::create_dir_all(&args.out_dir).map_err(|e| {
        AppError::config(format!(
            "Failed to create '{}': {e}",
            args.out_dir.display()
        ))
    })?;

    for scheme in GroupingScheme::ALL {
        let bytes = sample::sample_csv(scheme, &args.metric, args.seed)?;
        let path = args.out_dir.join(scheme.csv_file());
        std::fs::write(&path, bytes)
            .map_err(|e| AppError::runtime(format!("Failed to write '{}': {e}", path.display())))?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Pick the data source for a render/tui invocation.
pub fn data_source_from_args(args: &RenderArgs) -> Result<DataSource, AppError> {
    if args.sample {
        return Ok(DataSource::Sample { seed: args.seed });
    }
    match &args.base {
        Some(base) => Ok(DataSource::from_base(base)),
        None => DataSource::from_env(),
    }
}

/// Rewrite argv so `sentiment` defaults to `sentiment tui`.
///
/// Rules:
/// - `sentiment`                     -> `sentiment tui`
/// - `sentiment -s region ...`       -> `sentiment tui -s region ...`
/// - `sentiment --help/--version`    -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "render" | "tui" | "sample");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is (clap will report the unknown subcommand).
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(args(&["sentiment"])), args(&["sentiment", "tui"]));
        assert_eq!(
            rewrite_args(args(&["sentiment", "-s", "region"])),
            args(&["sentiment", "tui", "-s", "region"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(args(&["sentiment", "render", "--sample"])),
            args(&["sentiment", "render", "--sample"])
        );
        assert_eq!(
            rewrite_args(args(&["sentiment", "--help"])),
            args(&["sentiment", "--help"])
        );
    }

    #[test]
    fn sample_flag_wins_over_base() {
        let render = RenderArgs {
            scheme: GroupingScheme::Region,
            metric: "sentiment".to_string(),
            base: Some("https://example.org/data".to_string()),
            sample: true,
            seed: 3,
            out: "out.svg".into(),
        };
        assert!(matches!(
            data_source_from_args(&render).unwrap(),
            DataSource::Sample { seed: 3 }
        ));
    }
}
