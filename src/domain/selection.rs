//! Caller-owned selection state: which period, which year, which slice.
//!
//! The aggregators never hold any of this; front-ends keep a `Selection` and
//! pass it into each recomputation pass.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::YearRange;

/// Earliest and latest year present in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    /// Bounds of an ascending list of years (`None` if empty).
    pub fn from_sorted(years: &[i32]) -> Option<Self> {
        Some(Self {
            min: *years.first()?,
            max: *years.last()?,
        })
    }

    pub fn clamp(&self, year: i32) -> i32 {
        year.clamp(self.min, self.max)
    }

    /// Clamp both ends of a range into the bounds.
    pub fn clamp_range(&self, range: YearRange) -> YearRange {
        YearRange::new(self.clamp(range.start), self.clamp(range.end))
    }
}

/// Predefined economic periods in Lebanon's debt history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodPreset {
    PostCrisis,
    PreCrisis,
    GlobalFinancialCrisis,
    GrowthEra,
    Reconstruction,
    Custom,
}

impl PeriodPreset {
    pub const ALL: [PeriodPreset; 6] = [
        PeriodPreset::PostCrisis,
        PeriodPreset::PreCrisis,
        PeriodPreset::GlobalFinancialCrisis,
        PeriodPreset::GrowthEra,
        PeriodPreset::Reconstruction,
        PeriodPreset::Custom,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            PeriodPreset::PostCrisis => "Post-2019 Crisis (2019-2023)",
            PeriodPreset::PreCrisis => "Pre-Crisis Stability (2010-2018)",
            PeriodPreset::GlobalFinancialCrisis => "Global Financial Crisis Impact (2007-2012)",
            PeriodPreset::GrowthEra => "Economic Growth Era (2000-2008)",
            PeriodPreset::Reconstruction => "Post-War Reconstruction (1990-2000)",
            PeriodPreset::Custom => "Custom Period",
        }
    }

    /// Fixed window for the named periods; `None` for `Custom`.
    pub fn range(self) -> Option<YearRange> {
        let (start, end) = match self {
            PeriodPreset::PostCrisis => (2019, 2023),
            PeriodPreset::PreCrisis => (2010, 2018),
            PeriodPreset::GlobalFinancialCrisis => (2007, 2012),
            PeriodPreset::GrowthEra => (2000, 2008),
            PeriodPreset::Reconstruction => (1990, 2000),
            PeriodPreset::Custom => return None,
        };
        Some(YearRange::new(start, end))
    }

    /// Context line shown next to the period statistics.
    pub fn context(self, range: YearRange) -> String {
        match self {
            PeriodPreset::PostCrisis => {
                "Banking crisis, currency collapse, economic meltdown, political instability".to_string()
            }
            PeriodPreset::PreCrisis => {
                "Relative stability, high public debt, banking sector confidence before 2019 crisis".to_string()
            }
            PeriodPreset::GlobalFinancialCrisis => {
                "Resilience during global crisis, continued borrowing, pre-crisis confidence".to_string()
            }
            PeriodPreset::GrowthEra => {
                "Post-war reconstruction completion, economic growth, increased foreign investment".to_string()
            }
            PeriodPreset::Reconstruction => {
                "Massive reconstruction spending, Solidere project, rapid debt accumulation".to_string()
            }
            PeriodPreset::Custom => format!("Analysis period: {} to {}", range.start, range.end),
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// First year of the default custom window.
pub const CUSTOM_DEFAULT_START: i32 = 2010;

/// Initial custom window: 2010 through the latest year, clamped to the data.
pub fn default_custom_range(bounds: YearBounds) -> YearRange {
    bounds.clamp_range(YearRange::new(CUSTOM_DEFAULT_START, bounds.max))
}

/// Default composition year: fifth from the end when there are at least five
/// years, else the first.
pub fn default_year(years: &[i32]) -> Option<i32> {
    if years.len() >= 5 {
        years.get(years.len() - 5).copied()
    } else {
        years.first().copied()
    }
}

/// Everything the user has selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub preset: PeriodPreset,
    pub range: YearRange,
    pub year: i32,
    /// Last composition slice the user picked, if any.
    pub clicked_slice: Option<String>,
}

impl Selection {
    /// Initial selection for a table with the given (ascending) distinct years.
    pub fn initial(years: &[i32]) -> Option<Self> {
        let bounds = YearBounds::from_sorted(years)?;
        let preset = PeriodPreset::PostCrisis;
        Some(Self {
            preset,
            range: preset_range(preset, bounds, None),
            year: default_year(years)?,
            clicked_slice: None,
        })
    }

    /// Switch preset, recomputing the window.
    ///
    /// Entering `Custom` from a named preset restores `last_custom` (the
    /// custom window the user last had), or the default window when there is
    /// none. Staying on `Custom` keeps the current window.
    pub fn with_preset(mut self, preset: PeriodPreset, bounds: YearBounds, last_custom: Option<YearRange>) -> Self {
        let previous = if self.preset == PeriodPreset::Custom {
            Some(self.range)
        } else {
            last_custom
        };
        self.range = preset_range(preset, bounds, previous);
        self.preset = preset;
        self
    }
}

/// Window for a preset. Named presets use their fixed years as-is (data
/// outside them simply yields no rows); `Custom` keeps the previous custom
/// window when there is one and always clamps into the data.
pub fn preset_range(preset: PeriodPreset, bounds: YearBounds, previous: Option<YearRange>) -> YearRange {
    match preset.range() {
        Some(range) => range,
        None => previous
            .map(|r| bounds.clamp_range(r))
            .unwrap_or_else(|| default_custom_range(bounds)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_year_is_fifth_from_last() {
        let years: Vec<i32> = (2015..=2023).collect();
        assert_eq!(default_year(&years), Some(2019));
        assert_eq!(default_year(&[2001, 2002, 2003]), Some(2001));
        assert_eq!(default_year(&[]), None);
    }

    #[test]
    fn clamp_range_into_bounds() {
        let bounds = YearBounds { min: 1970, max: 2023 };
        assert_eq!(bounds.clamp_range(YearRange::new(1900, 2050)), YearRange::new(1970, 2023));
        assert_eq!(bounds.clamp_range(YearRange::new(2000, 2005)), YearRange::new(2000, 2005));
    }

    #[test]
    fn entering_custom_from_named_preset_uses_default_window() {
        let bounds = YearBounds { min: 1970, max: 2023 };
        let years: Vec<i32> = (1970..=2023).collect();
        let sel = Selection::initial(&years).unwrap();
        assert_eq!(sel.range, YearRange::new(2019, 2023));

        let custom = sel.clone().with_preset(PeriodPreset::Custom, bounds, None);
        assert_eq!(custom.range, YearRange::new(2010, 2023));

        let restored = sel.with_preset(PeriodPreset::Custom, bounds, Some(YearRange::new(1995, 2001)));
        assert_eq!(restored.range, YearRange::new(1995, 2001));

        let mut edited = custom;
        edited.range = YearRange::new(2000, 2005);
        let kept = edited.with_preset(PeriodPreset::Custom, bounds, None);
        assert_eq!(kept.range, YearRange::new(2000, 2005));
    }

    #[test]
    fn custom_preset_defaults_to_2010_through_latest() {
        let bounds = YearBounds { min: 1970, max: 2023 };
        assert_eq!(preset_range(PeriodPreset::Custom, bounds, None), YearRange::new(2010, 2023));

        let late = YearBounds { min: 2015, max: 2020 };
        assert_eq!(preset_range(PeriodPreset::Custom, late, None), YearRange::new(2015, 2020));
    }

    #[test]
    fn preset_cycle_wraps() {
        assert_eq!(PeriodPreset::Custom.next(), PeriodPreset::PostCrisis);
        assert_eq!(PeriodPreset::PostCrisis.prev(), PeriodPreset::Custom);
        let mut p = PeriodPreset::PostCrisis;
        for _ in 0..PeriodPreset::ALL.len() {
            p = p.next();
        }
        assert_eq!(p, PeriodPreset::PostCrisis);
    }

    #[test]
    fn initial_selection() {
        let years: Vec<i32> = (1970..=2023).collect();
        let sel = Selection::initial(&years).unwrap();
        assert_eq!(sel.preset, PeriodPreset::PostCrisis);
        assert_eq!(sel.range, YearRange::new(2019, 2023));
        assert_eq!(sel.year, 2019);
        assert!(sel.clicked_slice.is_none());
        assert!(Selection::initial(&[]).is_none());
    }

    #[test]
    fn custom_context_names_the_window() {
        let text = PeriodPreset::Custom.context(YearRange::new(1995, 2001));
        assert_eq!(text, "Analysis period: 1995 to 2001");
    }
}
