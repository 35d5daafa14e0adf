//! Reporting utilities: plain-text views of a dashboard run.

pub mod format;

pub use format::{format_composition_report, format_load_summary, format_period_report, format_raw_table};

use crate::app::pipeline::DashboardRun;

/// Both views, period first, the way `debtdash report` prints them.
pub fn format_run(run: &DashboardRun) -> String {
    let mut out = format_period_report(run.period.as_ref(), &run.selection);
    out.push('\n');
    out.push_str(&format_composition_report(
        run.composition.as_ref(),
        run.selection.year,
        run.selection.clicked_slice.as_deref(),
    ));
    out
}
