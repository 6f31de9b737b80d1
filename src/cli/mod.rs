//! Command-line parsing.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the pipeline and rendering code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::GroupingScheme;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sentiment", version, about = "Yearly sentiment aggregates line chart")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch one dataset and render the chart to an SVG file.
    Render(RenderArgs),
    /// Launch the interactive TUI.
    ///
    /// The same pipeline as `render`, but the grouping scheme and metric are
    /// live selectors: changing one reloads the data and redraws the chart.
    Tui(RenderArgs),
    /// Write synthetic sample datasets (one CSV per grouping scheme).
    Sample(SampleArgs),
}

/// Common options for rendering, shared by the one-shot and TUI front-ends.
#[derive(Debug, Parser, Clone)]
pub struct RenderArgs {
    /// Grouping scheme to plot.
    #[arg(short = 's', long, value_enum, default_value_t = GroupingScheme::FullDataset)]
    pub scheme: GroupingScheme,

    /// Name of the CSV value column to plot.
    #[arg(short = 'm', long, default_value = "sentiment")]
    pub metric: String,

    /// Base URL or directory holding the aggregates CSV files.
    ///
    /// Falls back to the SENTIMENT_DATA_BASE environment variable (a `.env`
    /// file is honored).
    #[arg(long)]
    pub base: Option<String>,

    /// Use seeded synthetic data instead of fetching.
    #[arg(long)]
    pub sample: bool,

    /// Seed for --sample generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output SVG path (in the TUI: the target of the `s` snapshot key).
    #[arg(short = 'o', long, default_value = "sentiment.svg")]
    pub out: PathBuf,
}

/// Options for writing synthetic datasets.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Directory to write the four aggregates CSV files into.
    #[arg(long, default_value = "data")]
    pub out_dir: PathBuf,

    /// Name of the generated value column.
    #[arg(short = 'm', long, default_value = "sentiment")]
    pub metric: String,

    /// Generation seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_scheme_is_rejected_at_parse_time() {
        // The selector is validated before any fetch or drawing side effect.
        let err = Cli::try_parse_from(["sentiment", "render", "--scheme", "by-mascot"]);
        assert!(err.is_err());
    }

    #[test]
    fn scheme_names_parse_to_variants() {
        let cli =
            Cli::try_parse_from(["sentiment", "render", "--scheme", "elite-status"]).unwrap();
        match cli.command {
            Command::Render(args) => {
                assert_eq!(args.scheme, GroupingScheme::EliteStatus);
                assert_eq!(args.metric, "sentiment");
            }
            _ => panic!("expected render subcommand"),
        }
    }
}
