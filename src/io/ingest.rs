//! CSV ingest and normalization.
//!
//! Turns a World Bank IDS export into an immutable `DebtTable`.
//!
//! - **Strict schema** for required columns (`Indicator Code`, `refPeriod`, `Value`)
//! - **Row-level validation**: bad rows are skipped and reported, never guessed at
//! - **Load once**: the table is built at startup and only ever borrowed afterwards

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::{info, warn};

use crate::domain::{DebtRecord, IndicatorCatalog, YearBounds};
use crate::error::LoadError;

const COL_CODE: &str = "indicator code";
const COL_YEAR: &str = "refperiod";
const COL_VALUE: &str = "value";

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// The loaded source table.
#[derive(Debug, Clone)]
pub struct DebtTable {
    source: PathBuf,
    records: Vec<DebtRecord>,
    years: Vec<i32>,
    row_errors: Vec<RowError>,
    rows_read: usize,
}

impl DebtTable {
    /// Build a table from already-parsed records (file order is kept).
    pub fn from_records(source: impl Into<PathBuf>, records: Vec<DebtRecord>) -> Self {
        let years: BTreeSet<i32> = records.iter().map(|r| r.year).collect();
        let rows_read = records.len();
        Self {
            source: source.into(),
            records,
            years: years.into_iter().collect(),
            row_errors: Vec::new(),
            rows_read,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn records(&self) -> &[DebtRecord] {
        &self.records
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn bounds(&self) -> Option<YearBounds> {
        YearBounds::from_sorted(&self.years)
    }

    pub fn has_year(&self, year: i32) -> bool {
        self.years.binary_search(&year).is_ok()
    }

    pub fn row_errors(&self) -> &[RowError] {
        &self.row_errors
    }

    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    pub fn rows_used(&self) -> usize {
        self.records.len()
    }
}

/// Load the CSV at `path`, resolving indicator names through `catalog`.
pub fn load_debt_table(path: &Path, catalog: &IndicatorCatalog) -> Result<DebtTable, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut table = read_debt_table(file, catalog)?;
    table.source = path.to_path_buf();

    if table.records.is_empty() {
        return Err(LoadError::NoRows {
            path: path.to_path_buf(),
            rows_read: table.rows_read,
            rejected: table.row_errors.len(),
        });
    }

    info!(
        path = %path.display(),
        rows_read = table.rows_read,
        rows_used = table.records.len(),
        years = table.years.len(),
        "loaded debt table"
    );
    if !table.row_errors.is_empty() {
        warn!(skipped = table.row_errors.len(), "skipped invalid rows");
    }

    Ok(table)
}

/// Parse CSV from any reader. An empty result is not an error here.
pub fn read_debt_table<R: Read>(reader: R, catalog: &IndicatorCatalog) -> Result<DebtTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let header_map = build_header_map(&headers);

    let code_idx = required_column(&header_map, COL_CODE, "Indicator Code")?;
    let year_idx = required_column(&header_map, COL_YEAR, "refPeriod")?;
    let value_idx = required_column(&header_map, COL_VALUE, "Value")?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, code_idx, year_idx, value_idx) {
            Ok((code, year, value)) => records.push(DebtRecord {
                indicator_name: catalog.resolve(&code).to_string(),
                indicator_code: code,
                year,
                value,
            }),
            Err(message) => {
                warn!(line, reason = message.as_str(), "skipping row");
                row_errors.push(RowError { line, message });
            }
        }
    }

    let mut table = DebtTable::from_records(PathBuf::new(), records);
    table.row_errors = row_errors;
    table.rows_read = rows_read;
    Ok(table)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins on duplicate headers.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will incorrectly
    // report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn required_column(
    header_map: &HashMap<String, usize>,
    key: &str,
    display: &'static str,
) -> Result<usize, LoadError> {
    header_map
        .get(key)
        .copied()
        .ok_or(LoadError::MissingColumn(display))
}

fn parse_row(record: &StringRecord, code_idx: usize, year_idx: usize, value_idx: usize) -> Result<(String, i32, f64), String> {
    let code = get_field(record, code_idx).ok_or_else(|| "Missing `Indicator Code` value.".to_string())?;
    let year_raw = get_field(record, year_idx).ok_or_else(|| "Missing `refPeriod` value.".to_string())?;
    let value_raw = get_field(record, value_idx).ok_or_else(|| "Missing `Value` value.".to_string())?;

    let year = parse_year(year_raw).ok_or_else(|| format!("Invalid `refPeriod` '{year_raw}'."))?;
    let value = value_raw
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("Invalid `Value` '{value_raw}'."))?;

    Ok((code.to_string(), year, value))
}

fn get_field(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

/// Accept `2019` as well as the float-formatted `2019.0` some exports produce.
fn parse_year(s: &str) -> Option<i32> {
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) {
        Some(f as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(csv: &str) -> Result<DebtTable, LoadError> {
        read_debt_table(csv.as_bytes(), &IndicatorCatalog::world_bank())
    }

    #[test]
    fn empty_value_rows_are_skipped_and_their_years_dropped() {
        let table = read(concat!(
            "Indicator Code,refPeriod,Value\n",
            "DT.DOD.DECT.CD,2019,\n",
            "DT.DOD.DECT.CD,2020,1000000000\n",
        ))
        .unwrap();

        assert_eq!(table.rows_read(), 2);
        assert_eq!(table.rows_used(), 1);
        assert_eq!(table.years(), &[2020]);
        assert_eq!(table.row_errors().len(), 1);
        assert_eq!(table.row_errors()[0].line, 2);
        assert!(table.row_errors()[0].message.contains("Value"));
    }

    #[test]
    fn resolves_names_and_keeps_file_order() {
        let table = read(concat!(
            "Indicator Code,refPeriod,Value\n",
            "DT.DOD.DECT.CD,2023,95000000000\n",
            "XX.NEW.CODE,2019,1.5\n",
            "DT.DOD.DECT.CD,2019,40000000000\n",
        ))
        .unwrap();

        assert_eq!(table.rows_read(), 3);
        assert_eq!(table.rows_used(), 3);
        assert_eq!(table.years(), &[2019, 2023]);
        let r = &table.records()[0];
        assert_eq!(r.indicator_name, "External debt stocks, total (US$)");
        assert_eq!(r.year, 2023);
        assert_eq!(r.value_billions(), 95.0);
        assert_eq!(table.records()[1].indicator_name, "XX.NEW.CODE");
    }

    #[test]
    fn headers_are_case_insensitive_and_extra_columns_ignored() {
        let table = read(concat!(
            "\u{feff}Country, indicator code ,REFPERIOD,value,Unit\n",
            "Lebanon,DT.DOD.DSTC.CD,2010.0,2e9,USD\n",
        ))
        .unwrap();
        assert_eq!(table.records()[0].indicator_name, "Short-term debt (US$)");
        assert_eq!(table.records()[0].year, 2010);
        assert!(table.has_year(2010));
    }

    #[test]
    fn bad_rows_are_reported_not_loaded() {
        let table = read(concat!(
            "Indicator Code,refPeriod,Value\n",
            "DT.DOD.DECT.CD,2019,\n",
            "DT.DOD.DECT.CD,20x9,1\n",
            ",2019,1\n",
            "DT.DOD.DECT.CD,2019,abc\n",
            "DT.DOD.DECT.CD,2020,5\n",
        ))
        .unwrap();
        assert_eq!(table.rows_read(), 5);
        assert_eq!(table.rows_used(), 1);
        let lines: Vec<usize> = table.row_errors().iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![2, 3, 4, 5]);
    }

    #[test]
    fn missing_column_is_a_load_error() {
        let err = read("Indicator Code,Value\nDT.DOD.DECT.CD,1\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("refPeriod")));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_debt_table(Path::new("does/not/exist.csv"), &IndicatorCatalog::world_bank()).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }

    #[test]
    fn parse_year_variants() {
        assert_eq!(parse_year("1999"), Some(1999));
        assert_eq!(parse_year("1999.0"), Some(1999));
        assert_eq!(parse_year("1999.5"), None);
        assert_eq!(parse_year("nan"), None);
    }
}
