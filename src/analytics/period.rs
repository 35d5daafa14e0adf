//! Period aggregation: statistics for each indicator over a year window.

use std::collections::BTreeSet;

use crate::analytics::stats;
use crate::domain::{
    DebtRecord, IndicatorPeriodStats, IndicatorSeries, PeriodExtremes, PeriodStats, PeriodSummary, YearRange,
};

/// `(year, billions)` points of one indicator inside `range`, year-ascending.
///
/// The sort is stable, so duplicate years keep their table order.
pub fn indicator_series(records: &[DebtRecord], range: YearRange, indicator: &str) -> Vec<(i32, f64)> {
    let mut points: Vec<(i32, f64)> = records
        .iter()
        .filter(|r| range.contains(r.year) && r.indicator_name == indicator)
        .map(|r| (r.year, r.value_billions()))
        .collect();
    points.sort_by_key(|&(year, _)| year);
    points
}

/// Statistics for one year-ascending series; `None` if it is empty.
pub fn series_stats(points: &[(i32, f64)], range: YearRange) -> Option<PeriodStats> {
    let (_, start_value) = *points.first()?;
    let (_, end_value) = *points.last()?;
    let values: Vec<f64> = points.iter().map(|&(_, v)| v).collect();

    Some(PeriodStats {
        mean: stats::mean(&values)?,
        stddev: stats::sample_stddev(&values),
        start_value,
        end_value,
        total_growth_pct: stats::total_growth_pct(start_value, end_value),
        // The exponent uses the selected window, not the first/last observed years.
        annual_growth_pct: stats::annual_growth_pct(start_value, end_value, range.span()),
        points: values.len(),
    })
}

/// Per-indicator statistics, in the order of `indicator_names`.
///
/// Indicators without rows in the window are omitted.
pub fn compute_period_stats<S: AsRef<str>>(
    records: &[DebtRecord],
    range: YearRange,
    indicator_names: &[S],
) -> Vec<IndicatorPeriodStats> {
    let mut out: Vec<IndicatorPeriodStats> = Vec::with_capacity(indicator_names.len());
    for name in indicator_names {
        let name = name.as_ref();
        if out.iter().any(|s| s.indicator == name) {
            continue;
        }
        let points = indicator_series(records, range, name);
        if let Some(stats) = series_stats(&points, range) {
            out.push(IndicatorPeriodStats {
                indicator: name.to_string(),
                stats,
            });
        }
    }
    out
}

pub fn find_stats<'a>(stats: &'a [IndicatorPeriodStats], indicator: &str) -> Option<&'a PeriodStats> {
    stats.iter().find(|s| s.indicator == indicator).map(|s| &s.stats)
}

/// Peak and trough of one indicator inside `range`.
///
/// Ties resolve to the earliest year.
pub fn period_extremes(records: &[DebtRecord], range: YearRange, indicator: &str) -> Option<PeriodExtremes> {
    let points = indicator_series(records, range, indicator);
    let (first_year, first_value) = *points.first()?;

    let mut ext = PeriodExtremes {
        peak_year: first_year,
        peak_value: first_value,
        trough_year: first_year,
        trough_value: first_value,
    };
    for &(year, value) in &points[1..] {
        if value > ext.peak_value {
            ext.peak_year = year;
            ext.peak_value = value;
        }
        if value < ext.trough_value {
            ext.trough_year = year;
            ext.trough_value = value;
        }
    }
    Some(ext)
}

/// Build the full period view.
///
/// Returns `None` when no requested indicator has a row in the window; in that
/// case nothing downstream is computed.
pub fn summarize_period<S: AsRef<str>>(
    records: &[DebtRecord],
    range: YearRange,
    indicator_names: &[S],
    total_indicator: &str,
) -> Option<PeriodSummary> {
    let wanted = |name: &str| indicator_names.iter().any(|n| n.as_ref() == name);

    let years: BTreeSet<i32> = records
        .iter()
        .filter(|r| range.contains(r.year) && wanted(&r.indicator_name))
        .map(|r| r.year)
        .collect();
    if years.is_empty() {
        return None;
    }

    let indicators = compute_period_stats(records, range, indicator_names);
    let series = indicators
        .iter()
        .map(|s| IndicatorSeries {
            indicator: s.indicator.clone(),
            points: indicator_series(records, range, &s.indicator),
        })
        .collect();

    let extremes = if wanted(total_indicator) {
        period_extremes(records, range, total_indicator)
    } else {
        None
    };

    Some(PeriodSummary {
        range,
        indicators,
        series,
        extremes,
        data_points: years.len(),
        duration_years: range.duration_years(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOTAL: &str = "External debt stocks, total (US$)";

    fn rec(name: &str, year: i32, billions: f64) -> DebtRecord {
        DebtRecord {
            indicator_code: name.to_string(),
            indicator_name: name.to_string(),
            year,
            value: billions * 1e9,
        }
    }

    #[test]
    fn single_point_window() {
        let records = vec![rec("A", 2005, 3.0), rec("B", 2005, 7.0), rec("A", 2006, 99.0)];
        let stats = compute_period_stats(&records, YearRange::new(2005, 2005), &["A", "B"]);
        assert_eq!(stats.len(), 2);
        for s in &stats {
            assert_eq!(s.stats.stddev, None);
            assert_eq!(s.stats.mean, s.stats.start_value);
            assert_eq!(s.stats.start_value, s.stats.end_value);
            assert_eq!(s.stats.total_growth_pct, 0.0);
            assert_eq!(s.stats.annual_growth_pct, 0.0);
            assert_eq!(s.stats.points, 1);
        }
    }

    #[test]
    fn doubling_over_one_year() {
        let records = vec![rec("A", 2000, 10.0), rec("A", 2001, 20.0)];
        let stats = compute_period_stats(&records, YearRange::new(2000, 2001), &["A"]);
        let a = find_stats(&stats, "A").unwrap();
        assert_relative_eq!(a.total_growth_pct, 100.0, epsilon = 1e-9);
        assert_relative_eq!(a.annual_growth_pct, 100.0, epsilon = 1e-9);
        assert_relative_eq!(a.mean, 15.0, epsilon = 1e-12);
        assert_relative_eq!(a.stddev.unwrap(), 50.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn zero_start_value_does_not_divide() {
        let records = vec![rec("A", 2000, 0.0), rec("A", 2003, 5.0)];
        let stats = compute_period_stats(&records, YearRange::new(2000, 2003), &["A"]);
        let a = find_stats(&stats, "A").unwrap();
        assert_eq!(a.total_growth_pct, 0.0);
        assert_eq!(a.annual_growth_pct, 0.0);
    }

    #[test]
    fn negative_start_keeps_zero_annual_growth() {
        let records = vec![rec("A", 2000, -4.0), rec("A", 2002, 2.0)];
        let stats = compute_period_stats(&records, YearRange::new(2000, 2002), &["A"]);
        let a = find_stats(&stats, "A").unwrap();
        assert_relative_eq!(a.total_growth_pct, -150.0, epsilon = 1e-9);
        assert_eq!(a.annual_growth_pct, 0.0);
    }

    #[test]
    fn start_and_end_follow_year_order_not_row_order() {
        let records = vec![rec("A", 2003, 30.0), rec("A", 2001, 10.0), rec("A", 2002, 20.0)];
        let stats = compute_period_stats(&records, YearRange::new(2000, 2005), &["A"]);
        let a = find_stats(&stats, "A").unwrap();
        assert_eq!(a.start_value, 10.0);
        assert_eq!(a.end_value, 30.0);
        // Span is the selected window (5 years), not the observed one.
        assert_relative_eq!(a.annual_growth_pct, (3.0_f64.powf(0.2) - 1.0) * 100.0, epsilon = 1e-9);
    }

    #[test]
    fn missing_indicators_are_omitted() {
        let records = vec![rec("A", 2000, 1.0), rec("B", 1990, 1.0)];
        let stats = compute_period_stats(&records, YearRange::new(2000, 2001), &["A", "B", "C"]);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].indicator, "A");
        assert!(find_stats(&stats, "B").is_none());
    }

    #[test]
    fn extremes_prefer_first_year_on_ties() {
        let records = vec![
            rec(TOTAL, 2004, 5.0),
            rec(TOTAL, 2001, 9.0),
            rec(TOTAL, 2002, 2.0),
            rec(TOTAL, 2003, 9.0),
            rec(TOTAL, 2005, 2.0),
        ];
        let ext = period_extremes(&records, YearRange::new(2000, 2010), TOTAL).unwrap();
        assert_eq!((ext.peak_year, ext.peak_value), (2001, 9.0));
        assert_eq!((ext.trough_year, ext.trough_value), (2002, 2.0));
        assert_eq!(ext.range(), 7.0);
    }

    #[test]
    fn empty_window_has_no_summary() {
        let records = vec![rec(TOTAL, 1995, 1.0), rec("Other", 2020, 1.0)];
        assert!(summarize_period(&records, YearRange::new(2019, 2023), &[TOTAL], TOTAL).is_none());
    }

    #[test]
    fn summary_counts_distinct_years() {
        let records = vec![
            rec(TOTAL, 2019, 40.0),
            rec("Short-term debt (US$)", 2019, 4.0),
            rec(TOTAL, 2021, 60.0),
            rec("Ignored", 2022, 1.0),
        ];
        let names = [TOTAL, "Short-term debt (US$)"];
        let summary = summarize_period(&records, YearRange::new(2019, 2023), &names, TOTAL).unwrap();
        assert_eq!(summary.data_points, 2);
        assert_eq!(summary.duration_years, 5);
        assert_eq!(summary.series.len(), 2);
        assert_eq!(summary.series[0].points, vec![(2019, 40.0), (2021, 60.0)]);
        let ext = summary.extremes.unwrap();
        assert_eq!(ext.peak_year, 2021);
        assert_eq!(ext.trough_year, 2019);
    }

    #[test]
    fn extremes_require_total_in_requested_set() {
        let records = vec![rec(TOTAL, 2019, 40.0), rec("A", 2019, 1.0)];
        let summary = summarize_period(&records, YearRange::new(2019, 2019), &["A"], TOTAL).unwrap();
        assert!(summary.extremes.is_none());
    }
}
