//! Analysis of WOT runs against the tuning tables.
//!
//! - [`runs`] splits a log into contiguous wide-open-throttle runs
//! - [`cells`] maps logged (load, RPM) pairs onto table cells
//! - [`derived`] computes volumetric efficiency per sample

pub mod cells;
pub mod derived;
pub mod runs;

use thiserror::Error;

use crate::sample::LogSample;

/// Errors that can occur during analysis of a single run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// A required channel is missing from the log data
    #[error("Missing required channel: {0}")]
    MissingChannel(String),

    /// Not enough data points for the analysis
    #[error("Insufficient data: need {needed} points, got {got}")]
    InsufficientData { needed: usize, got: usize },
}

/// Collect an optional channel from every sample, failing if the log lacks it
pub fn require_channel<F>(
    samples: &[LogSample],
    name: &str,
    field: F,
) -> Result<Vec<f64>, AnalysisError>
where
    F: Fn(&LogSample) -> Option<f64>,
{
    samples
        .iter()
        .map(|s| field(s).ok_or_else(|| AnalysisError::MissingChannel(name.to_string())))
        .collect()
}

/// Helper to check minimum data length
pub fn require_min_length(data: &[f64], min_len: usize) -> Result<(), AnalysisError> {
    if data.len() < min_len {
        Err(AnalysisError::InsufficientData {
            needed: min_len,
            got: data.len(),
        })
    } else {
        Ok(())
    }
}

/// The first maximum of a series, as (index, value). NaN entries are skipped.
pub fn find_peak(values: &[f64]) -> Option<(usize, f64)> {
    values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best, (i, v)| match best {
            Some((_, b)) if v <= b => best,
            _ => Some((i, v)),
        })
}
