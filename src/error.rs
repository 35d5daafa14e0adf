//! Error types.
//!
//! `AppError` is what crosses the binary boundary: a message plus the process
//! exit code. `LoadError` describes why the source CSV could not be turned into
//! a table; it converts into `AppError` so `?` works everywhere.
//!
//! Exit codes:
//! - `2`: bad input (missing file, schema problems, invalid flags)
//! - `3`: the input was readable but contained no usable rows
//! - `4`: runtime failures (terminal, exports)

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

/// Failure to load the source table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open CSV '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV headers: {0}")]
    Header(#[from] csv::Error),

    #[error("Missing required column: `{0}`")]
    MissingColumn(&'static str),

    #[error("No valid rows in '{}' ({rows_read} read, {rejected} rejected).", path.display())]
    NoRows {
        path: PathBuf,
        rows_read: usize,
        rejected: usize,
    },
}

impl LoadError {
    pub fn exit_code(&self) -> u8 {
        match self {
            LoadError::NoRows { .. } => 3,
            _ => 2,
        }
    }
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}
