//! Loading the named tuning-table sheets.
//!
//! Each sheet is a CSV export stored as `<dir>/<sheet name>.csv`.

use csv::{ReaderBuilder, Trim};
use std::path::{Path, PathBuf};

use super::{NormalizedGrid, RawTable, TableError};

pub const SHEET_BASE_TIMING: &str = "base timing";
pub const SHEET_KCA: &str = "kca";
pub const SHEET_OL_FUELING: &str = "ol fueling";
pub const SHEET_BOOST: &str = "boost";
pub const SHEET_AVCS: &str = "avcs groupn";

/// Sheet file extension
const SHEET_EXTENSION: &str = "csv";

/// Path of a named sheet inside the tuning-table directory
pub fn sheet_path(dir: &Path, sheet: &str) -> PathBuf {
    dir.join(format!("{}.{}", sheet, SHEET_EXTENSION))
}

/// Parse the text of one sheet into a raw table.
///
/// A leading record with no numeric cells (RomRaider's "[Table3D]" marker or
/// a title line) is skipped. An empty corner cell is read as 0.
pub fn parse_sheet(name: &str, contents: &str) -> Result<RawTable, TableError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(contents.as_bytes());

    let mut rows = Vec::new();
    for (row_index, record) in reader.records().enumerate() {
        let record = record.map_err(|source| TableError::Csv {
            sheet: name.to_string(),
            source,
        })?;

        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        if rows.is_empty() && !record.iter().any(|cell| cell.parse::<f64>().is_ok()) {
            tracing::debug!("Skipping title line in sheet '{}'", name);
            continue;
        }

        // Trailing empty cells come from spreadsheet exports with ragged widths
        let cells: Vec<&str> = record.iter().collect();
        let last = cells
            .iter()
            .rposition(|cell| !cell.is_empty())
            .unwrap_or(0);

        let row = cells
            .iter()
            .take(last + 1)
            .enumerate()
            .map(|(column, cell)| {
                if cell.is_empty() && rows.is_empty() && column == 0 {
                    return Ok(0.0);
                }
                cell.parse::<f64>().map_err(|_| TableError::InvalidNumber {
                    table: name.to_string(),
                    row: row_index,
                    column,
                    text: cell.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, TableError>>()?;

        rows.push(row);
    }

    Ok(RawTable::new(name, rows))
}

/// Read and parse one sheet from the tuning-table directory
pub fn load_sheet(dir: &Path, sheet: &str) -> Result<RawTable, TableError> {
    let path = sheet_path(dir, sheet);
    if !path.exists() {
        return Err(TableError::MissingSheet(sheet.to_string()));
    }
    let contents = std::fs::read_to_string(&path).map_err(|source| TableError::Io {
        sheet: sheet.to_string(),
        source,
    })?;
    parse_sheet(sheet, &contents)
}

/// Read a sheet and normalize it in one step
pub fn load_grid(dir: &Path, sheet: &str) -> Result<NormalizedGrid, TableError> {
    NormalizedGrid::from_raw(&load_sheet(dir, sheet)?)
}

/// Every table the report draws, shared read-only across runs
#[derive(Clone, Debug)]
pub struct TuningTables {
    pub base_timing: NormalizedGrid,
    pub knock_advance: NormalizedGrid,
    /// Base timing plus knock correction advance, cell by cell
    pub total_timing: NormalizedGrid,
    pub ol_fueling: NormalizedGrid,
    pub boost: NormalizedGrid,
    pub avcs: NormalizedGrid,
}

impl TuningTables {
    /// Assemble the table set from already normalized grids
    pub fn new(
        base_timing: NormalizedGrid,
        knock_advance: NormalizedGrid,
        ol_fueling: NormalizedGrid,
        boost: NormalizedGrid,
        avcs: NormalizedGrid,
    ) -> Result<Self, TableError> {
        let total_timing = knock_advance.add(&base_timing, "total timing")?;
        Ok(Self {
            base_timing,
            knock_advance,
            total_timing,
            ol_fueling,
            boost,
            avcs,
        })
    }

    /// Load all sheets from a directory
    pub fn load(dir: &Path) -> Result<Self, TableError> {
        let tables = Self::new(
            load_grid(dir, SHEET_BASE_TIMING)?,
            load_grid(dir, SHEET_KCA)?,
            load_grid(dir, SHEET_OL_FUELING)?,
            load_grid(dir, SHEET_BOOST)?,
            load_grid(dir, SHEET_AVCS)?,
        )?;

        tracing::info!(
            "Loaded tuning tables from {}: timing {}x{}, fueling {}x{}, AVCS {}x{}",
            dir.display(),
            tables.total_timing.row_axis().len(),
            tables.total_timing.column_axis().len(),
            tables.ol_fueling.row_axis().len(),
            tables.ol_fueling.column_axis().len(),
            tables.avcs.row_axis().len(),
            tables.avcs.column_axis().len(),
        );

        Ok(tables)
    }
}
