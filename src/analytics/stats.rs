//! Small descriptive-statistics helpers.

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator); `None` below two values.
pub fn sample_stddev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() as f64 - 1.0)).sqrt())
}

/// Percentage change from `start` to `end`; zero when `start` is zero.
pub fn total_growth_pct(start: f64, end: f64) -> f64 {
    if start != 0.0 {
        (end - start) / start * 100.0
    } else {
        0.0
    }
}

/// Compound annual growth over `years`.
///
/// Only defined for a positive starting value and a positive span; anything
/// else reports zero.
pub fn annual_growth_pct(start: f64, end: f64, years: i32) -> f64 {
    if start > 0.0 && years > 0 {
        ((end / start).powf(1.0 / f64::from(years)) - 1.0) * 100.0
    } else {
        0.0
    }
}

/// `part / total * 100`, or `None` when the total is zero.
pub fn share_pct(part: f64, total: f64) -> Option<f64> {
    if total != 0.0 {
        Some(part / total * 100.0)
    } else {
        None
    }
}
