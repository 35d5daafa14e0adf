//! Pure computations over the loaded table.
//!
//! Nothing in here holds state: every function takes the records plus the
//! current selection and returns a fresh view.

pub mod composition;
pub mod period;
pub mod stats;

pub use composition::compute_composition;
pub use period::{compute_period_stats, period_extremes, summarize_period};
