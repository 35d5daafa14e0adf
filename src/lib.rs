//! `debt-dashboard` library crate.
//!
//! The binary (`debtdash`) is a thin wrapper around this library so that:
//!
//! - the aggregators are testable without spawning processes or a terminal
//! - the CLI report and the TUI share one recomputation pipeline

pub mod analytics;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod tui;
