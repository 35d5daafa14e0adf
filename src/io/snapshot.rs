//! Read/write dashboard snapshot JSON files.
//!
//! A snapshot is the portable record of one recomputation pass: the selection
//! that produced it plus both derived views. It can be reloaded later and
//! re-rendered without the source CSV.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::app::pipeline::DashboardRun;
use crate::domain::{CompositionEntry, CompositionStats, PeriodSummary, Selection};
use crate::error::AppError;

pub const TOOL_NAME: &str = "debtdash";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub tool: String,
    /// RFC 3339 local time.
    pub generated_at: String,
    pub source: PathBuf,
    pub selection: Selection,
    pub period: Option<PeriodSummary>,
    pub composition: Option<CompositionStats>,
    pub clicked_slice: Option<CompositionEntry>,
}

impl DashboardSnapshot {
    pub fn from_run(run: &DashboardRun, source: &Path) -> Self {
        Self {
            tool: TOOL_NAME.to_string(),
            generated_at: Local::now().to_rfc3339(),
            source: source.to_path_buf(),
            selection: run.selection.clone(),
            period: run.period.clone(),
            composition: run.composition.clone(),
            clicked_slice: run.clicked_slice().cloned(),
        }
    }
}

/// Write a snapshot JSON file.
pub fn write_snapshot_json(path: &Path, snapshot: &DashboardSnapshot) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create snapshot JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, snapshot)
        .map_err(|e| AppError::new(4, format!("Failed to write snapshot JSON: {e}")))?;

    info!(path = %path.display(), "wrote dashboard snapshot");
    Ok(())
}

/// Read a snapshot JSON file.
pub fn read_snapshot_json(path: &Path) -> Result<DashboardSnapshot, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open snapshot JSON '{}': {e}", path.display())))?;
    let snapshot: DashboardSnapshot =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid snapshot JSON: {e}")))?;
    Ok(snapshot)
}

/// Write a timestamped snapshot under `dir`, creating it if needed.
pub fn write_timestamped_snapshot(dir: &Path, snapshot: &DashboardSnapshot) -> Result<PathBuf, AppError> {
    fs::create_dir_all(dir).map_err(|e| AppError::new(4, format!("Failed to create export dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let sel = &snapshot.selection;
    let path = dir.join(format!(
        "debt_snapshot_{}-{}_y{}_{ts}.json",
        sel.range.start, sel.range.end, sel.year
    ));

    write_snapshot_json(&path, snapshot)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PeriodPreset, YearRange};

    fn snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            tool: TOOL_NAME.to_string(),
            generated_at: "2024-09-05T17:32:22+00:00".to_string(),
            source: PathBuf::from("lebanon.csv"),
            selection: Selection {
                preset: PeriodPreset::Custom,
                range: YearRange::new(2001, 2004),
                year: 2003,
                clicked_slice: Some("Private debt (US$)".to_string()),
            },
            period: None,
            composition: None,
            clicked_slice: None,
        }
    }

    #[test]
    fn snapshot_file_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.json");
        let snap = snapshot();
        write_snapshot_json(&path, &snap).unwrap();
        assert_eq!(read_snapshot_json(&path).unwrap(), snap);
    }

    #[test]
    fn timestamped_name_includes_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_timestamped_snapshot(&dir.path().join("exports"), &snapshot()).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("debt_snapshot_2001-2004_y2003_"), "{name}");
        assert!(path.exists());
    }

    #[test]
    fn invalid_json_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(read_snapshot_json(&path).unwrap_err().exit_code(), 2);
    }
}
