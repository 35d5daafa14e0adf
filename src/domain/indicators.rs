//! Fixed indicator groupings used by the dashboard views.
//!
//! All names here are display names (post-resolution), not codes.

/// The series whose peak/trough is reported for a period.
pub const TOTAL_DEBT_INDICATOR: &str = "External debt stocks, total (US$)";

/// Series plotted and summarized in the period view.
pub const KEY_DEBT_INDICATORS: &[&str] = &[
    "External debt stocks, total (US$)",
    "Long-term external debt (US$)",
    "Short-term debt (US$)",
];

/// Series that make up the composition view for a single year.
///
/// The total itself is part of the list, so composition shares are relative to
/// the sum of all nine series rather than to the reported total.
pub const COMPOSITION_INDICATORS: &[&str] = &[
    "External debt stocks, total (US$)",
    "Multilateral debt (US$)",
    "Public and publicly guaranteed debt (US$)",
    "World Bank debt outstanding (US$)",
    "Public commercial bank debt (US$)",
    "Other public bank debt (US$)",
    "Private sector debt, other (US$)",
    "Private debt (US$)",
    "Private non-guaranteed commercial debt (US$)",
];

pub const PUBLIC_DEBT_INDICATORS: &[&str] = &[
    "Public and publicly guaranteed debt (US$)",
    "Multilateral debt (US$)",
    "World Bank debt outstanding (US$)",
    "Public commercial bank debt (US$)",
    "Other public bank debt (US$)",
];

pub const PRIVATE_DEBT_INDICATORS: &[&str] = &[
    "Private debt (US$)",
    "Private sector debt, other (US$)",
    "Private non-guaranteed commercial debt (US$)",
];

/// Short label for tables and chart legends (drops the trailing unit).
pub fn short_label(name: &str) -> &str {
    name.strip_suffix(" (US$)").unwrap_or(name)
}
