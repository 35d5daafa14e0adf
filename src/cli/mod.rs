//! Command-line parsing for the external debt dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the analytics code.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::PeriodPreset;

pub mod picker;

/// Environment variable consulted when `--data` is not given.
pub const DATA_ENV_VAR: &str = "DEBT_DATA_CSV";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "debtdash", version, about = "External debt dashboard (World Bank IDS CSV)")]
pub struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Period statistics, growth rates and a line chart for a year range.
    Period(ViewArgs),
    /// Debt composition and public/private split for one year.
    Composition(ViewArgs),
    /// Both views.
    Report(ViewArgs),
    /// Print the loaded table.
    Raw(RawArgs),
    /// Re-render a snapshot JSON written by `--export-json` or the TUI.
    Show(ShowArgs),
    /// Launch the interactive TUI.
    ///
    /// Uses the same recomputation pipeline as the report commands, but renders
    /// results in a terminal UI using Ratatui.
    Tui(DataArgs),
}

/// Where the source table comes from.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// CSV with `Indicator Code`, `refPeriod` and `Value` columns.
    ///
    /// Falls back to `DEBT_DATA_CSV` (also read from `.env`), then to an
    /// interactive picker over CSV files in the current directory.
    #[arg(short = 'd', long, value_name = "CSV")]
    pub data: Option<PathBuf>,
}

/// Options shared by the report commands.
#[derive(Debug, Args, Clone)]
pub struct ViewArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Predefined economic period.
    #[arg(short = 'p', long, value_enum, default_value_t = PeriodPreset::PostCrisis)]
    pub preset: PeriodPreset,

    /// Custom period start year (implies `--preset custom`).
    #[arg(long)]
    pub start: Option<i32>,

    /// Custom period end year (implies `--preset custom`).
    ///
    /// Without `--start`, the window begins in 2010, or at the first year of
    /// data when the end is before 2010.
    #[arg(long)]
    pub end: Option<i32>,

    /// Year for the composition view (defaults to the fifth most recent year).
    #[arg(short = 'y', long)]
    pub year: Option<i32>,

    /// Composition component to show details for (display name).
    #[arg(long, value_name = "NAME")]
    pub slice: Option<String>,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export period statistics to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the full dashboard snapshot to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct RawArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Only print the first N rows.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Snapshot JSON file.
    #[arg(value_name = "JSON")]
    pub snapshot: PathBuf,
}
