//! Shared "recompute" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! table + selection -> period view + composition view
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use tracing::debug;

use crate::analytics::{compute_composition, summarize_period};
use crate::domain::{CompositionEntry, CompositionStats, DashboardConfig, PeriodSummary, Selection};
use crate::io::ingest::DebtTable;

/// All computed outputs of one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardRun {
    pub selection: Selection,
    /// `None`: no data for the selected period.
    pub period: Option<PeriodSummary>,
    /// `None`: no composition data for the selected year.
    pub composition: Option<CompositionStats>,
}

impl DashboardRun {
    /// Details of the clicked slice, if one is selected and present this year.
    pub fn clicked_slice(&self) -> Option<&CompositionEntry> {
        let name = self.selection.clicked_slice.as_deref()?;
        self.composition.as_ref()?.slice(name)
    }
}

/// Recompute both views for `selection` over the (unchanged) table.
pub fn run_dashboard(table: &DebtTable, selection: &Selection, config: &DashboardConfig) -> DashboardRun {
    let records = table.records();

    let period = summarize_period(
        records,
        selection.range,
        &config.key_indicators,
        &config.total_indicator,
    );

    let composition = compute_composition(
        records,
        selection.year,
        &config.composition_indicators,
        &config.public_indicators,
        &config.private_indicators,
    );

    debug!(
        start = selection.range.start,
        end = selection.range.end,
        year = selection.year,
        period_rows = period.as_ref().map(|p| p.indicators.len()).unwrap_or(0),
        composition_rows = composition.as_ref().map(|c| c.entries.len()).unwrap_or(0),
        "recomputed dashboard"
    );

    DashboardRun {
        selection: selection.clone(),
        period,
        composition,
    }
}
