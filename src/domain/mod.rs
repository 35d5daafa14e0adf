//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - the source record and derived statistics (`types`)
//! - indicator code resolution (`catalog`)
//! - the fixed indicator groupings (`indicators`)
//! - caller-owned selection state (`selection`)

pub mod catalog;
pub mod indicators;
pub mod selection;
pub mod types;

pub use catalog::IndicatorCatalog;
pub use selection::{PeriodPreset, Selection, YearBounds};
pub use types::*;
