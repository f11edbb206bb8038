//! Mapping logged operating points onto table cells.
//!
//! Each logged (load, RPM) pair is matched to a table bucket by scanning the
//! axis in stored order and taking the first bucket whose window contains the
//! value. Windows are half-open on the low side: `(c - tol, c + tol]`. Where
//! neighbouring windows overlap the lower-indexed bucket wins, so this is a
//! first-match scan and not a nearest-bucket search. The scan is O(axis length)
//! per sample, which is fine for tables with tens of buckets.

use crate::sample::LogSample;
use crate::tables::NormalizedGrid;

/// Half-width of a load bucket window, g/rev
pub const LOAD_TOLERANCE: f64 = 0.1;

/// Half-width of an RPM bucket window
pub const RPM_TOLERANCE: f64 = 200.0;

/// One table cell, identified by its axis labels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellCoordinate {
    pub rpm: i64,
    pub load: f64,
}

/// Matched cells, one entry per input pair that hit both axes
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellMatches {
    /// Matched load-axis values
    pub columns: Vec<f64>,
    /// Matched RPM-axis values
    pub rows: Vec<i64>,
}

impl CellMatches {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Matched cells in input order
    pub fn iter(&self) -> impl Iterator<Item = CellCoordinate> + '_ {
        self.rows
            .iter()
            .zip(&self.columns)
            .map(|(&rpm, &load)| CellCoordinate { rpm, load })
    }

    /// Matched cells with repeats removed, keeping first-seen order
    pub fn distinct(&self) -> Vec<CellCoordinate> {
        let mut cells: Vec<CellCoordinate> = Vec::new();
        for cell in self.iter() {
            if !cells.contains(&cell) {
                cells.push(cell);
            }
        }
        cells
    }
}

/// First load bucket whose window contains `load`
pub fn match_column(columns: &[f64], load: f64) -> Option<f64> {
    columns
        .iter()
        .copied()
        .find(|&c| c - LOAD_TOLERANCE < load && load <= c + LOAD_TOLERANCE)
}

/// First RPM bucket whose window contains `rpm`
pub fn match_row(rows: &[i64], rpm: f64) -> Option<i64> {
    rows.iter().copied().find(|&r| {
        let r = r as f64;
        r - RPM_TOLERANCE < rpm && rpm <= r + RPM_TOLERANCE
    })
}

/// Matches logged operating points against one grid's axes
#[derive(Clone, Copy, Debug)]
pub struct CellMapper<'a> {
    rows: &'a [i64],
    columns: &'a [f64],
}

impl<'a> CellMapper<'a> {
    pub fn new(rows: &'a [i64], columns: &'a [f64]) -> Self {
        Self { rows, columns }
    }

    pub fn for_grid(grid: &'a NormalizedGrid) -> Self {
        Self::new(grid.row_axis(), grid.column_axis())
    }

    /// Match a single (load, RPM) pair; both axes must match
    pub fn locate(&self, load: f64, rpm: f64) -> Option<CellCoordinate> {
        let load = match_column(self.columns, load)?;
        let rpm = match_row(self.rows, rpm)?;
        Some(CellCoordinate { rpm, load })
    }

    /// Match every (load, RPM) pair, silently skipping those that miss
    pub fn map<I>(&self, pairs: I) -> CellMatches
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut matches = CellMatches::default();
        for (load, rpm) in pairs {
            if let Some(cell) = self.locate(load, rpm) {
                matches.columns.push(cell.load);
                matches.rows.push(cell.rpm);
            }
        }
        matches
    }

    /// Match every sample of a run
    pub fn map_samples(&self, samples: &[LogSample]) -> CellMatches {
        self.map(samples.iter().map(|s| (s.load, s.rpm)))
    }
}

/// Cells exercised by a run
pub fn used_cells(grid: &NormalizedGrid, run: &[LogSample]) -> CellMatches {
    CellMapper::for_grid(grid).map_samples(run)
}

/// Cells where knock correction was pulled during a run.
///
/// Returns `None` when no sample has a negative FBKC or FLKC reading, so the
/// caller can skip knock highlighting entirely.
pub fn knock_cells(grid: &NormalizedGrid, run: &[LogSample]) -> Option<CellMatches> {
    let knocking: Vec<LogSample> = run.iter().filter(|s| s.is_knocking()).copied().collect();
    if knocking.is_empty() {
        return None;
    }
    Some(CellMapper::for_grid(grid).map_samples(&knocking))
}

/// Cells of the AVCS table exercised by a run
pub fn avcs_cells(avcs: &NormalizedGrid, run: &[LogSample]) -> CellMatches {
    used_cells(avcs, run)
}
