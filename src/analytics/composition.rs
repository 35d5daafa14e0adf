//! Composition aggregation: how one year's debt splits across components.

use crate::analytics::stats;
use crate::domain::{CompositionEntry, CompositionStats, DebtRecord};

/// Build the composition view for `year`.
///
/// Entries keep table order. `public_set` and `private_set` are disjoint
/// classification lists; components in neither still count toward the total.
/// Returns `None` when no requested indicator has a row for the year.
pub fn compute_composition<S: AsRef<str>>(
    records: &[DebtRecord],
    year: i32,
    indicator_names: &[S],
    public_set: &[S],
    private_set: &[S],
) -> Option<CompositionStats> {
    let contains = |set: &[S], name: &str| set.iter().any(|n| n.as_ref() == name);

    let rows: Vec<&DebtRecord> = records
        .iter()
        .filter(|r| r.year == year && contains(indicator_names, &r.indicator_name))
        .collect();
    if rows.is_empty() {
        return None;
    }

    let total: f64 = rows.iter().map(|r| r.value_billions()).sum();

    let entries: Vec<CompositionEntry> = rows
        .iter()
        .map(|r| {
            let value_billions = r.value_billions();
            CompositionEntry {
                indicator: r.indicator_name.clone(),
                value_billions,
                share_pct: stats::share_pct(value_billions, total),
            }
        })
        .collect();

    let mut largest = 0usize;
    for (idx, e) in entries.iter().enumerate().skip(1) {
        if e.value_billions > entries[largest].value_billions {
            largest = idx;
        }
    }

    let bucket_total = |set: &[S]| -> f64 {
        entries
            .iter()
            .filter(|e| contains(set, &e.indicator))
            .map(|e| e.value_billions)
            .sum()
    };
    let public_total = bucket_total(public_set);
    let private_total = bucket_total(private_set);

    Some(CompositionStats {
        year,
        total,
        entries,
        largest,
        public_total,
        private_total,
        public_pct: stats::share_pct(public_total, total).unwrap_or(0.0),
        private_pct: stats::share_pct(private_total, total).unwrap_or(0.0),
    })
}
