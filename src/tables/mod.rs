//! ROM tuning tables.
//!
//! A table copied out of RomRaider is a rectangular block of numbers: the
//! first row holds the load axis, the first column holds the RPM axis and the
//! rest is the table body. [`NormalizedGrid::from_raw`] turns that block into
//! a grid with typed axes.

pub mod workbook;

use thiserror::Error;

pub use workbook::{
    TuningTables, SHEET_AVCS, SHEET_BASE_TIMING, SHEET_BOOST, SHEET_KCA, SHEET_OL_FUELING,
};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while loading or combining tables
#[derive(Debug, Error)]
pub enum TableError {
    /// Axis label counts don't match the value grid
    #[error("Malformed table '{table}': {reason}")]
    MalformedTable { table: String, reason: String },

    /// The same axis value appears twice after normalization
    #[error("Table '{table}' has duplicate {axis} axis value {value}")]
    DuplicateAxisValue {
        table: String,
        axis: &'static str,
        value: String,
    },

    /// A cell could not be read as a number
    #[error("Table '{table}' has a non-numeric cell at row {row}, column {column}: '{text}'")]
    InvalidNumber {
        table: String,
        row: usize,
        column: usize,
        text: String,
    },

    /// Two grids with different axes were combined
    #[error("Cannot combine '{left}' and '{right}': axes differ")]
    AxisMismatch { left: String, right: String },

    /// A column a chart needs is not in the table
    #[error("Table '{table}' has no column for load {column}")]
    MissingColumn { table: String, column: f64 },

    /// A named sheet is absent from the tuning-table directory
    #[error("Sheet '{0}' not found")]
    MissingSheet(String),

    /// Failed to read a sheet from disk
    #[error("Failed to read sheet '{sheet}': {source}")]
    Io {
        sheet: String,
        #[source]
        source: std::io::Error,
    },

    /// The CSV layer rejected a sheet
    #[error("Failed to parse sheet '{sheet}': {source}")]
    Csv {
        sheet: String,
        #[source]
        source: csv::Error,
    },
}

// ============================================================================
// Raw and Normalized Tables
// ============================================================================

/// A table exactly as it was pasted: axis row, axis column and body together
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
    pub name: String,
    pub rows: Vec<Vec<f64>>,
}

impl RawTable {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

/// Round a load axis value to 2 decimal places
pub fn round_load(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// A 2-D lookup table indexed by (RPM, load).
///
/// Axes are kept in the order the source table emitted them and cannot be
/// changed after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedGrid {
    name: String,
    rows: Vec<i64>,
    columns: Vec<f64>,
    values: Vec<Vec<f64>>,
}

impl NormalizedGrid {
    /// Normalize a raw table.
    ///
    /// Row 0 (minus the corner cell) becomes the load axis, rounded to 2
    /// decimals. Column 0 of rows 1.. becomes the RPM axis, truncated to
    /// integers. Body rows are labeled by position, not by key.
    pub fn from_raw(raw: &RawTable) -> Result<Self, TableError> {
        let malformed = |reason: String| TableError::MalformedTable {
            table: raw.name.clone(),
            reason,
        };

        let (header, body) = raw
            .rows
            .split_first()
            .ok_or_else(|| malformed("table is empty".to_string()))?;

        if header.len() < 2 {
            return Err(malformed("axis row has no load values".to_string()));
        }
        if body.is_empty() {
            return Err(malformed("table has no RPM rows".to_string()));
        }

        let columns: Vec<f64> = header[1..].iter().copied().map(round_load).collect();

        let mut rows = Vec::with_capacity(body.len());
        let mut values = Vec::with_capacity(body.len());
        for (i, row) in body.iter().enumerate() {
            let Some((rpm, cells)) = row.split_first() else {
                return Err(malformed(format!("row {} is empty", i + 1)));
            };
            if cells.len() != columns.len() {
                return Err(malformed(format!(
                    "row {} has {} values but the load axis has {}",
                    i + 1,
                    cells.len(),
                    columns.len()
                )));
            }
            rows.push(rpm.trunc() as i64);
            values.push(cells.to_vec());
        }

        Self::new(raw.name.clone(), rows, columns, values)
    }

    /// Build a grid from already separated axes and body
    pub fn new(
        name: impl Into<String>,
        rows: Vec<i64>,
        columns: Vec<f64>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self, TableError> {
        let name = name.into();

        if values.len() != rows.len() || values.iter().any(|r| r.len() != columns.len()) {
            return Err(TableError::MalformedTable {
                table: name,
                reason: format!(
                    "body does not match {} RPM x {} load axis labels",
                    rows.len(),
                    columns.len()
                ),
            });
        }

        for (i, rpm) in rows.iter().enumerate() {
            if rows[..i].contains(rpm) {
                return Err(TableError::DuplicateAxisValue {
                    table: name,
                    axis: "RPM",
                    value: rpm.to_string(),
                });
            }
        }
        for (i, load) in columns.iter().enumerate() {
            if columns[..i].contains(load) {
                return Err(TableError::DuplicateAxisValue {
                    table: name,
                    axis: "load",
                    value: load.to_string(),
                });
            }
        }

        Ok(Self {
            name,
            rows,
            columns,
            values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// RPM axis, in source order
    pub fn row_axis(&self) -> &[i64] {
        &self.rows
    }

    /// Load axis, in source order
    pub fn column_axis(&self) -> &[f64] {
        &self.columns
    }

    /// Table body, one inner vector per RPM row
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    pub fn row_index(&self, rpm: i64) -> Option<usize> {
        self.rows.iter().position(|&r| r == rpm)
    }

    pub fn column_index(&self, load: f64) -> Option<usize> {
        self.columns.iter().position(|&c| c == load)
    }

    /// Look up a cell by its axis labels
    pub fn get(&self, rpm: i64, load: f64) -> Option<f64> {
        let row = self.row_index(rpm)?;
        let column = self.column_index(load)?;
        Some(self.values[row][column])
    }

    /// All values in one load column, top to bottom
    pub fn column(&self, load: f64) -> Result<Vec<f64>, TableError> {
        let index = self
            .column_index(round_load(load))
            .ok_or_else(|| TableError::MissingColumn {
                table: self.name.clone(),
                column: load,
            })?;
        Ok(self.values.iter().map(|row| row[index]).collect())
    }

    /// Cell-wise sum of two grids with identical axes
    pub fn add(&self, other: &NormalizedGrid, name: impl Into<String>) -> Result<Self, TableError> {
        if self.rows != other.rows || self.columns != other.columns {
            return Err(TableError::AxisMismatch {
                left: self.name.clone(),
                right: other.name.clone(),
            });
        }

        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| a.iter().zip(b).map(|(x, y)| x + y).collect())
            .collect();

        Ok(Self {
            name: name.into(),
            rows: self.rows.clone(),
            columns: self.columns.clone(),
            values,
        })
    }
}
