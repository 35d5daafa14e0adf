//! Shared domain types.
//!
//! Records are immutable once loaded; every statistic below is a derived view
//! that is recomputed from the table on each selection change.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::indicators;

/// Raw currency units per billion.
pub const BILLION: f64 = 1e9;

/// One row of the source table. Only the derived views are serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct DebtRecord {
    pub indicator_code: String,
    /// Display name, resolved from `indicator_code` when the table is loaded.
    pub indicator_name: String,
    /// `refPeriod`: the calendar year the observation belongs to.
    pub year: i32,
    /// Raw value in currency units.
    pub value: f64,
}

impl DebtRecord {
    pub fn value_billions(&self) -> f64 {
        self.value / BILLION
    }
}

/// Per-indicator statistics over a closed year window (values in billions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two points.
    pub stddev: Option<f64>,
    pub start_value: f64,
    pub end_value: f64,
    pub total_growth_pct: f64,
    pub annual_growth_pct: f64,
    pub points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPeriodStats {
    pub indicator: String,
    pub stats: PeriodStats,
}

/// A single indicator's `(year, billions)` points, year-ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub indicator: String,
    pub points: Vec<(i32, f64)>,
}

/// Peak and trough of the total-debt series within a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodExtremes {
    pub peak_year: i32,
    pub peak_value: f64,
    pub trough_year: i32,
    pub trough_value: f64,
}

impl PeriodExtremes {
    pub fn range(&self) -> f64 {
        self.peak_value - self.trough_value
    }
}

/// Closed year interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// Years between the endpoints (the exponent base for annualized growth).
    pub fn span(&self) -> i32 {
        self.end - self.start
    }

    /// Calendar years covered, counting both endpoints.
    pub fn duration_years(&self) -> i32 {
        self.end - self.start + 1
    }
}

/// The period view: everything the line chart and its side panels need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub range: YearRange,
    pub indicators: Vec<IndicatorPeriodStats>,
    pub series: Vec<IndicatorSeries>,
    pub extremes: Option<PeriodExtremes>,
    /// Distinct years with at least one row in the window.
    pub data_points: usize,
    pub duration_years: i32,
}

impl PeriodSummary {
    pub fn stats_for(&self, indicator: &str) -> Option<&PeriodStats> {
        crate::analytics::period::find_stats(&self.indicators, indicator)
    }
}

/// One slice of the composition view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionEntry {
    pub indicator: String,
    pub value_billions: f64,
    /// Share of the composition total; `None` when the total is zero.
    pub share_pct: Option<f64>,
}

/// The composition view for a single year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionStats {
    pub year: i32,
    pub total: f64,
    pub entries: Vec<CompositionEntry>,
    /// Index into `entries` of the largest component.
    pub largest: usize,
    pub public_total: f64,
    pub private_total: f64,
    pub public_pct: f64,
    pub private_pct: f64,
}

impl CompositionStats {
    pub fn largest_component(&self) -> Option<&CompositionEntry> {
        self.entries.get(self.largest)
    }

    /// Details for a selected slice (first entry with that name).
    pub fn slice(&self, indicator: &str) -> Option<&CompositionEntry> {
        self.entries.iter().find(|e| e.indicator == indicator)
    }
}

/// Dashboard configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: PathBuf,

    pub key_indicators: Vec<String>,
    pub composition_indicators: Vec<String>,
    pub public_indicators: Vec<String>,
    pub private_indicators: Vec<String>,
    pub total_indicator: String,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_stats: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

impl DashboardConfig {
    /// Default indicator groupings for a given data file.
    pub fn for_path(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            key_indicators: to_owned(indicators::KEY_DEBT_INDICATORS),
            composition_indicators: to_owned(indicators::COMPOSITION_INDICATORS),
            public_indicators: to_owned(indicators::PUBLIC_DEBT_INDICATORS),
            private_indicators: to_owned(indicators::PRIVATE_DEBT_INDICATORS),
            total_indicator: indicators::TOTAL_DEBT_INDICATOR.to_string(),
            plot: true,
            plot_width: 100,
            plot_height: 25,
            export_stats: None,
            export_json: None,
        }
    }
}

fn to_owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
