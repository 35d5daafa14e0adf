//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observations: one marker per series (`*`, `+`, `x`, ...)
//! - connecting lines: `.`

use crate::domain::indicators::short_label;
use crate::domain::{IndicatorSeries, PeriodSummary};

const MARKERS: [char; 6] = ['*', '+', 'x', 'o', '#', '@'];

/// Render the period's series as a line chart over the selected years.
pub fn render_period_plot(period: &PeriodSummary, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = x_range(period.range.start, period.range.end);
    let (y_min, y_max) = y_range(&period.series).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Lines first so markers can overlay them.
    for s in &period.series {
        let mut prev = None;
        for &(year, v) in &s.points {
            let x = map_x(f64::from(year), x_min, x_max, width);
            let y = map_y(v, y_min, y_max, height);
            if let Some((x0, y0)) = prev {
                draw_line(&mut grid, x0, y0, x, y, '.');
            }
            prev = Some((x, y));
        }
    }
    for (idx, s) in period.series.iter().enumerate() {
        let marker = MARKERS[idx % MARKERS.len()];
        for &(year, v) in &s.points {
            let x = map_x(f64::from(year), x_min, x_max, width);
            let y = map_y(v, y_min, y_max, height);
            grid[y][x] = marker;
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: years=[{}, {}] | y=[{y_min:.2}, {y_max:.2}] $B\n",
        period.range.start, period.range.end
    ));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    for (idx, s) in period.series.iter().enumerate() {
        out.push_str(&format!("  {} {}\n", MARKERS[idx % MARKERS.len()], short_label(&s.indicator)));
    }

    out
}

fn x_range(start: i32, end: i32) -> (f64, f64) {
    let (a, b) = (f64::from(start), f64::from(end));
    if b > a { (a, b) } else { (a - 0.5, a + 0.5) }
}

fn y_range(series: &[IndicatorSeries]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for s in series {
        for &(_, y) in &s.points {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }
    if !(min_y.is_finite() && max_y.is_finite()) {
        return None;
    }
    if max_y > min_y {
        Some((min_y, max_y))
    } else {
        Some((min_y - 0.5, max_y + 0.5))
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only fills blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::YearRange;

    fn summary(series: Vec<IndicatorSeries>, start: i32, end: i32) -> PeriodSummary {
        PeriodSummary {
            range: YearRange::new(start, end),
            indicators: Vec::new(),
            series,
            extremes: None,
            data_points: 0,
            duration_years: end - start + 1,
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let period = summary(
            vec![IndicatorSeries {
                indicator: "External debt stocks, total (US$)".to_string(),
                points: vec![(2000, 10.0), (2010, 20.0)],
            }],
            2000,
            2010,
        );

        let txt = render_period_plot(&period, 10, 5);
        let expected = concat!(
            "Plot: years=[2000, 2010] | y=[9.50, 20.50] $B\n",
            "        .*\n",
            "      ..\n",
            "    ..\n",
            "  ..\n",
            "*.\n",
            "  * External debt stocks, total\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn single_year_window_does_not_divide_by_zero() {
        let period = summary(
            vec![
                IndicatorSeries {
                    indicator: "A".to_string(),
                    points: vec![(2020, 5.0)],
                },
                IndicatorSeries {
                    indicator: "B".to_string(),
                    points: vec![(2020, 5.0)],
                },
            ],
            2020,
            2020,
        );
        let txt = render_period_plot(&period, 12, 6);
        assert!(txt.contains('+'));
        assert!(txt.ends_with("  * A\n  + B\n"));
    }
}
