//! Interactive CSV picker.
//!
//! This is kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "run `debtdash` and choose a CSV" UX when neither
//!   `--data` nor `DEBT_DATA_CSV` names a file
//!
//! The picker searches for `*.csv` files under the current working directory.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Default directory recursion depth for finding CSV files.
const DEFAULT_SEARCH_DEPTH: usize = 4;

/// Prompt the user to select a CSV file from the current directory tree.
///
/// Accepts either a number from the list or an explicit path; `q` cancels.
pub fn prompt_for_csv_path() -> Result<PathBuf, AppError> {
    let files = discover_csv_files(Path::new("."));
    if files.is_empty() {
        return Err(AppError::new(
            2,
            "No .csv files found. Provide one with `debtdash -d <file.csv>` or DEBT_DATA_CSV.",
        ));
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    choose_csv(&files, &mut stdin.lock(), &mut stdout)
}

/// Selection loop over an arbitrary input/output pair.
fn choose_csv<R: BufRead, W: Write>(files: &[PathBuf], input: &mut R, out: &mut W) -> Result<PathBuf, AppError> {
    let io_err = |e: io::Error| AppError::new(2, format!("Picker I/O failed: {e}"));

    writeln!(out, "Found {} CSV file(s):", files.len()).map_err(io_err)?;
    for (idx, path) in files.iter().enumerate() {
        writeln!(out, "{:>3}) {}", idx + 1, pretty_path(path)).map_err(io_err)?;
    }

    loop {
        write!(out, "Select a file by number (1-{}) or type a path (q to quit): ", files.len()).map_err(io_err)?;
        out.flush().map_err(io_err)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(io_err)? == 0 {
            return Err(AppError::new(
                2,
                "No input received. Provide a CSV path with `debtdash -d <file.csv>`.",
            ));
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }

        if let Ok(choice) = line.parse::<usize>() {
            if (1..=files.len()).contains(&choice) {
                return validate_csv_path(&files[choice - 1]);
            }
            writeln!(out, "Invalid choice: {choice}. Enter a number between 1 and {}.", files.len())
                .map_err(io_err)?;
            continue;
        }

        match validate_csv_path(Path::new(line)) {
            Ok(path) => return Ok(path),
            Err(err) => writeln!(out, "{err}").map_err(io_err)?,
        }
    }
}

/// Validate the provided path points to an existing `.csv` file.
pub fn validate_csv_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.exists() {
        return Err(AppError::new(2, format!("CSV file not found: {}", path.display())));
    }
    if path.is_dir() {
        return Err(AppError::new(
            2,
            format!("Expected a file, got a directory: {}", path.display()),
        ));
    }
    if !has_csv_extension(path) {
        return Err(AppError::new(
            2,
            format!("Expected a .csv file (got: {}).", path.display()),
        ));
    }
    Ok(path.to_path_buf())
}

/// Discover `*.csv` files under `root` (deterministic order).
pub fn discover_csv_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    find_csv_files(root, 0, DEFAULT_SEARCH_DEPTH, &mut out);
    out.sort_by_key(|p| pretty_path(p));
    out
}

fn find_csv_files(root: &Path, depth: usize, max_depth: usize, out: &mut Vec<PathBuf>) {
    if depth > max_depth {
        return;
    }
    let Ok(entries) = fs::read_dir(root) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            if !should_skip_dir(&path) {
                find_csv_files(&path, depth + 1, max_depth, out);
            }
        } else if file_type.is_file() && has_csv_extension(&path) {
            out.push(path);
        }
    }
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn should_skip_dir(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    matches!(name, ".git" | "target" | "node_modules" | "exports")
}

fn pretty_path(path: &Path) -> String {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    stripped.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (tempfile::TempDir, Vec<PathBuf>) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::create_dir_all(dir.path().join("target")).unwrap();
        fs::write(dir.path().join("data/lebanon.csv"), "a\n").unwrap();
        fs::write(dir.path().join("b.CSV"), "a\n").unwrap();
        fs::write(dir.path().join("target/skip.csv"), "a\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "a\n").unwrap();
        let files = discover_csv_files(dir.path());
        (dir, files)
    }

    #[test]
    fn discovers_csv_files_and_skips_build_dirs() {
        let (_dir, files) = fixture();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"lebanon.csv".to_string()));
        assert!(names.contains(&"b.CSV".to_string()));
    }

    #[test]
    fn picks_by_number_after_invalid_choice() {
        let (_dir, files) = fixture();
        let mut input = io::Cursor::new("9\n1\n");
        let mut out = Vec::new();
        let path = choose_csv(&files, &mut input, &mut out).unwrap();
        assert_eq!(path, files[0]);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Invalid choice: 9"));
    }

    #[test]
    fn quit_and_eof_cancel() {
        let (_dir, files) = fixture();
        let mut out = Vec::new();
        assert!(choose_csv(&files, &mut io::Cursor::new("q\n"), &mut out).is_err());
        assert!(choose_csv(&files, &mut io::Cursor::new(""), &mut out).is_err());
    }

    #[test]
    fn validate_rejects_non_csv() {
        let (dir, _files) = fixture();
        assert!(validate_csv_path(&dir.path().join("notes.txt")).is_err());
        assert!(validate_csv_path(&dir.path().join("missing.csv")).is_err());
        assert!(validate_csv_path(dir.path()).is_err());
    }
}
