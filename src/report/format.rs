//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the analytics code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::indicators::short_label;
use crate::domain::{CompositionEntry, CompositionStats, PeriodSummary, Selection};
use crate::io::ingest::DebtTable;

/// Header block describing the loaded table.
pub fn format_load_summary(table: &DebtTable) -> String {
    let mut out = String::new();
    out.push_str("=== debtdash - External Debt Dashboard ===\n");
    out.push_str(&format!("Source: {}\n", table.source().display()));
    let span = table
        .bounds()
        .map(|b| format!("{}-{}", b.min, b.max))
        .unwrap_or_else(|| "-".to_string());
    out.push_str(&format!(
        "Rows: {} used / {} read | years: {} ({span})\n",
        table.rows_used(),
        table.rows_read(),
        table.years().len(),
    ));
    if !table.row_errors().is_empty() {
        out.push_str(&format!("Skipped rows: {}\n", table.row_errors().len()));
        for err in table.row_errors().iter().take(5) {
            out.push_str(&format!("  line {}: {}\n", err.line, err.message));
        }
        if table.row_errors().len() > 5 {
            out.push_str("  ...\n");
        }
    }
    out
}

/// Period statistics, growth rates, context, and key insights.
pub fn format_period_report(period: Option<&PeriodSummary>, selection: &Selection) -> String {
    let mut out = String::new();
    let range = selection.range;
    out.push_str(&format!(
        "--- Period: {} ({}-{}) ---\n",
        selection.preset.display_name(),
        range.start,
        range.end
    ));

    let Some(period) = period else {
        out.push_str("No data available for the selected time period.\n");
        return out;
    };

    out.push_str(&format!(
        "{:<32} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
        "indicator", "avg ($B)", "volatility", "start", "end", "total %", "annual %"
    ));
    out.push_str(&format!(
        "{:-<32} {:-<10} {:-<10} {:-<10} {:-<10} {:-<10} {:-<10}\n",
        "", "", "", "", "", "", ""
    ));

    for row in &period.indicators {
        let s = &row.stats;
        out.push_str(&format!(
            "{:<32} {:>10.1} {:>10} {:>10.1} {:>10.1} {:>10} {:>10}\n",
            truncate(short_label(&row.indicator), 32),
            s.mean,
            s.stddev.map(|v| format!("{v:.1}")).unwrap_or_else(|| "n/a".to_string()),
            s.start_value,
            s.end_value,
            format!("{} {:+.1}", direction(s.total_growth_pct), s.total_growth_pct),
            format!("{:+.1}", s.annual_growth_pct),
        ));
    }

    out.push('\n');
    out.push_str(&format!("Context: {}\n", selection.preset.context(range)));
    out.push_str(&format!("Duration: {} years\n", period.duration_years));
    out.push_str(&format!("Data points: {} years\n", period.data_points));

    if let Some(ext) = &period.extremes {
        out.push_str("\nKey insights:\n");
        out.push_str(&format!("- Peak debt: ${:.1}B in {}\n", ext.peak_value, ext.peak_year));
        out.push_str(&format!("- Lowest debt: ${:.1}B in {}\n", ext.trough_value, ext.trough_year));
        out.push_str(&format!("- Range: ${:.1}B difference\n", ext.range()));
    }

    out
}

/// Composition table, largest component, public/private split, clicked slice.
pub fn format_composition_report(
    composition: Option<&CompositionStats>,
    year: i32,
    clicked: Option<&str>,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("--- Debt composition in {year} ---\n"));

    let Some(comp) = composition else {
        out.push_str("No debt composition data available for the selected year.\n");
        return out;
    };

    out.push_str(&format!("Total debt: ${:.1}B\n", comp.total));
    if let Some(largest) = comp.largest_component() {
        out.push_str(&format!(
            "Largest component: {} ${:.1}B ({} of total)\n",
            largest.indicator,
            largest.value_billions,
            fmt_share(largest),
        ));
    }
    out.push('\n');

    out.push_str(&format!("{:<48} {:>10} {:>8}\n", "component", "$B", "share"));
    out.push_str(&format!("{:-<48} {:-<10} {:-<8}\n", "", "", ""));
    for e in &comp.entries {
        out.push_str(&format!(
            "{:<48} {:>10.2} {:>8}\n",
            truncate(&e.indicator, 48),
            e.value_billions,
            fmt_share(e)
        ));
    }
    if comp.total == 0.0 {
        out.push_str("(total is zero: shares are undefined)\n");
    }

    out.push('\n');
    out.push_str(&format!(
        "Public sector debt:  ${:.1}B ({:.1}%)\n",
        comp.public_total, comp.public_pct
    ));
    out.push_str(&format!(
        "Private sector debt: ${:.1}B ({:.1}%)\n",
        comp.private_total, comp.private_pct
    ));

    if let Some(name) = clicked {
        out.push('\n');
        out.push_str(&format!("Selected: {name}\n"));
        match comp.slice(name) {
            Some(entry) => out.push_str(&format!("Value: ${:.2} Billion\n", entry.value_billions)),
            None => out.push_str("Not part of this year's composition.\n"),
        }
    }

    out
}

/// The raw table, one row per record.
pub fn format_raw_table(table: &DebtTable, limit: Option<usize>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<20} {:<56} {:>6} {:>12}\n",
        "code", "indicator", "year", "value ($B)"
    ));
    out.push_str(&format!("{:-<20} {:-<56} {:-<6} {:-<12}\n", "", "", "", ""));

    let n = limit.unwrap_or(usize::MAX);
    for r in table.records().iter().take(n) {
        out.push_str(&format!(
            "{:<20} {:<56} {:>6} {:>12.4}\n",
            truncate(&r.indicator_code, 20),
            truncate(&r.indicator_name, 56),
            r.year,
            r.value_billions(),
        ));
    }
    if table.records().len() > n {
        out.push_str(&format!("... {} more rows\n", table.records().len() - n));
    }
    out
}

fn fmt_share(entry: &CompositionEntry) -> String {
    entry
        .share_pct
        .map(|p| format!("{p:.1}%"))
        .unwrap_or_else(|| "n/a".to_string())
}

fn direction(growth: f64) -> &'static str {
    if growth > 0.0 {
        "▲"
    } else if growth < 0.0 {
        "▼"
    } else {
        "="
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
