//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - resolves and loads the source CSV (once)
//! - turns flags into a `Selection`
//! - runs the recomputation pipeline
//! - prints reports/plots and writes optional exports

use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};

use crate::cli::{Command, DATA_ENV_VAR, DataArgs, RawArgs, ShowArgs, ViewArgs};
use crate::domain::selection::{CUSTOM_DEFAULT_START, preset_range};
use crate::domain::{DashboardConfig, IndicatorCatalog, PeriodPreset, Selection, YearBounds, YearRange};
use crate::error::AppError;
use crate::io::ingest::{DebtTable, load_debt_table};
use crate::io::snapshot::{DashboardSnapshot, read_snapshot_json, write_snapshot_json};
use crate::logging::{self, LogTarget};

pub mod pipeline;

/// Entry point for the `debtdash` binary.
pub fn run() -> Result<(), AppError> {
    // We want `debtdash` and `debtdash -d file.csv` to behave like `debtdash tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let target = match cli.command {
        Command::Tui(_) => LogTarget::Discard,
        _ => LogTarget::Stderr,
    };
    logging::init(cli.verbose, cli.quiet, target);

    match cli.command {
        Command::Period(args) => handle_view(args, ViewMode::Period),
        Command::Composition(args) => handle_view(args, ViewMode::Composition),
        Command::Report(args) => handle_view(args, ViewMode::Both),
        Command::Raw(args) => handle_raw(args),
        Command::Show(args) => handle_show(args),
        Command::Tui(args) => handle_tui(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Period,
    Composition,
    Both,
}

fn handle_view(args: ViewArgs, mode: ViewMode) -> Result<(), AppError> {
    let config = config_from_args(&args)?;
    let table = load_table(&config)?;
    let selection = selection_from_args(&args, &table)?;
    let run = pipeline::run_dashboard(&table, &selection, &config);

    println!("{}", crate::report::format_load_summary(&table));

    if mode != ViewMode::Composition {
        println!(
            "{}",
            crate::report::format_period_report(run.period.as_ref(), &run.selection)
        );
        if config.plot {
            if let Some(period) = &run.period {
                println!(
                    "{}",
                    crate::plot::render_period_plot(period, config.plot_width, config.plot_height)
                );
            }
        }
    }

    if mode != ViewMode::Period {
        println!(
            "{}",
            crate::report::format_composition_report(
                run.composition.as_ref(),
                run.selection.year,
                run.selection.clicked_slice.as_deref(),
            )
        );
    }

    // Optional exports.
    if let Some(path) = &config.export_stats {
        match &run.period {
            Some(period) => crate::io::export::write_period_stats_csv(path, period)?,
            None => info!("no period data; skipping statistics export"),
        }
    }
    if let Some(path) = &config.export_json {
        write_snapshot_json(path, &DashboardSnapshot::from_run(&run, table.source()))?;
    }

    Ok(())
}

fn handle_raw(args: RawArgs) -> Result<(), AppError> {
    let config = DashboardConfig::for_path(resolve_data_path(&args.data)?);
    let table = load_table(&config)?;
    println!("{}", crate::report::format_load_summary(&table));
    print!("{}", crate::report::format_raw_table(&table, args.limit));
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let snapshot = read_snapshot_json(&args.snapshot)?;
    println!(
        "Snapshot of {} ({} at {})\n",
        snapshot.source.display(),
        snapshot.tool,
        snapshot.generated_at
    );
    let run = pipeline::DashboardRun {
        selection: snapshot.selection,
        period: snapshot.period,
        composition: snapshot.composition,
    };
    print!("{}", crate::report::format_run(&run));
    Ok(())
}

fn handle_tui(args: DataArgs) -> Result<(), AppError> {
    let config = DashboardConfig::for_path(resolve_data_path(&args)?);
    // Load before touching the terminal: a bad file is reported on a normal
    // screen and the session never starts.
    let table = load_table(&config)?;
    crate::tui::run(table, config)
}

/// Build the run configuration from flags (plus defaults).
pub fn config_from_args(args: &ViewArgs) -> Result<DashboardConfig, AppError> {
    let mut config = DashboardConfig::for_path(resolve_data_path(&args.data)?);
    config.plot = !args.no_plot;
    config.plot_width = args.width;
    config.plot_height = args.height;
    config.export_stats = args.export.clone();
    config.export_json = args.export_json.clone();
    Ok(config)
}

/// Load the table named by `config` with the built-in catalog.
pub fn load_table(config: &DashboardConfig) -> Result<DebtTable, AppError> {
    let catalog = IndicatorCatalog::world_bank();
    Ok(load_debt_table(&config.data_path, &catalog)?)
}

/// `--data`, else `DEBT_DATA_CSV` (after loading `.env`), else the picker.
fn resolve_data_path(args: &DataArgs) -> Result<PathBuf, AppError> {
    if let Some(path) = &args.data {
        return Ok(path.clone());
    }
    dotenvy::dotenv().ok();
    if let Ok(path) = std::env::var(DATA_ENV_VAR) {
        if !path.trim().is_empty() {
            debug!(%path, "using data path from environment");
            return Ok(PathBuf::from(path.trim()));
        }
    }
    crate::cli::picker::prompt_for_csv_path()
}

/// Turn period/year flags into a validated selection for `table`.
pub fn selection_from_args(args: &ViewArgs, table: &DebtTable) -> Result<Selection, AppError> {
    let bounds = table
        .bounds()
        .ok_or_else(|| AppError::new(3, "The table has no years."))?;

    let preset = if args.start.is_some() || args.end.is_some() {
        PeriodPreset::Custom
    } else {
        args.preset
    };
    let range = custom_range(args.start, args.end, bounds)?
        .map(|r| preset_range(preset, bounds, Some(r)))
        .unwrap_or_else(|| preset_range(preset, bounds, None));

    let year = match args.year {
        Some(year) if table.has_year(year) => year,
        Some(year) => {
            return Err(AppError::new(
                2,
                format!(
                    "Year {year} is not in the data (available: {}-{}, {} distinct years).",
                    bounds.min,
                    bounds.max,
                    table.years().len()
                ),
            ));
        }
        None => crate::domain::selection::default_year(table.years())
            .ok_or_else(|| AppError::new(3, "The table has no years."))?,
    };

    Ok(Selection {
        preset,
        range,
        year,
        clicked_slice: args.slice.clone(),
    })
}

/// Custom window from `--start`/`--end`, clamped into the data's years.
///
/// A missing start defaults to the custom window's usual 2010, or to the
/// first year of data when `--end` is before 2010.
fn custom_range(start: Option<i32>, end: Option<i32>, bounds: YearBounds) -> Result<Option<YearRange>, AppError> {
    if start.is_none() && end.is_none() {
        return Ok(None);
    }
    let default_start = match end {
        Some(end) if end < CUSTOM_DEFAULT_START => bounds.min,
        _ => CUSTOM_DEFAULT_START,
    };
    let range = bounds.clamp_range(YearRange::new(
        start.unwrap_or(default_start),
        end.unwrap_or(bounds.max),
    ));
    if range.start > range.end {
        return Err(AppError::new(
            2,
            format!("Start year {} is after end year {}.", range.start, range.end),
        ));
    }
    Ok(Some(range))
}

/// Rewrite argv so `debtdash` defaults to `debtdash tui`.
///
/// Rules:
/// - `debtdash`                      -> `debtdash tui`
/// - `debtdash -d file.csv ...`      -> `debtdash tui -d file.csv ...`
/// - `debtdash --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "period" | "composition" | "report" | "raw" | "show" | "tui"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
