//! Export period statistics to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::path::Path;

use tracing::info;

use crate::domain::{IndicatorPeriodStats, PeriodSummary};
use crate::error::AppError;

const HEADER: [&str; 10] = [
    "indicator",
    "start_year",
    "end_year",
    "points",
    "mean_bn",
    "stddev_bn",
    "start_bn",
    "end_bn",
    "total_growth_pct",
    "annual_growth_pct",
];

/// Write one row per indicator of the period summary.
pub fn write_period_stats_csv(path: &Path, summary: &PeriodSummary) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(HEADER)
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV header: {e}")))?;

    for row in &summary.indicators {
        writer
            .write_record(stats_row(row, summary))
            .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush export CSV: {e}")))?;

    info!(path = %path.display(), rows = summary.indicators.len(), "wrote period statistics");
    Ok(())
}

fn stats_row(row: &IndicatorPeriodStats, summary: &PeriodSummary) -> Vec<String> {
    let s = &row.stats;
    vec![
        row.indicator.clone(),
        summary.range.start.to_string(),
        summary.range.end.to_string(),
        s.points.to_string(),
        format!("{:.6}", s.mean),
        s.stddev.map(|v| format!("{v:.6}")).unwrap_or_default(),
        format!("{:.6}", s.start_value),
        format!("{:.6}", s.end_value),
        format!("{:.4}", s.total_growth_pct),
        format!("{:.4}", s.annual_growth_pct),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PeriodStats, YearRange};

    #[test]
    fn writes_header_and_rows() {
        let summary = PeriodSummary {
            range: YearRange::new(2019, 2023),
            indicators: vec![IndicatorPeriodStats {
                indicator: "External debt stocks, total (US$)".to_string(),
                stats: PeriodStats {
                    mean: 67.5,
                    stddev: None,
                    start_value: 40.0,
                    end_value: 95.0,
                    total_growth_pct: 137.5,
                    annual_growth_pct: 24.1,
                    points: 2,
                },
            }],
            series: Vec::new(),
            extremes: None,
            data_points: 2,
            duration_years: 5,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        write_period_stats_csv(&path, &summary).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), HEADER.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "\"External debt stocks, total (US$)\",2019,2023,2,67.500000,,40.000000,95.000000,137.5000,24.1000"
        );
        assert!(lines.next().is_none());
    }
}
