//! Run segmentation.
//!
//! A run is a maximal stretch of consecutive samples that all satisfy a
//! predicate. Samples outside every run are dropped; runs are never merged.

use crate::sample::LogSample;

/// Throttle reading that counts as wide open
pub const WOT_THROTTLE: f64 = 100.0;

/// Engine speed below which a sample counts as idle
pub const IDLE_RPM: f64 = 1000.0;

/// True when the throttle is fully open
pub fn is_wide_open(sample: &LogSample) -> bool {
    sample.throttle == WOT_THROTTLE
}

/// Split a sequence into maximal runs of items satisfying `open`.
///
/// A new run starts on every false-to-true transition, including the very
/// first item. Order is preserved within and across runs.
pub fn segment_runs<T, F>(items: &[T], open: F) -> Vec<Vec<T>>
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    let mut runs: Vec<Vec<T>> = Vec::new();
    let mut was_open = false;

    for item in items {
        let is_open = open(item);
        if is_open {
            if !was_open {
                runs.push(Vec::new());
            }
            if let Some(current) = runs.last_mut() {
                current.push(item.clone());
            }
        }
        was_open = is_open;
    }

    runs
}

/// All wide-open-throttle runs in a log
pub fn wot_runs(samples: &[LogSample]) -> Vec<Vec<LogSample>> {
    segment_runs(samples, is_wide_open)
}

/// Every sample taken at idle, in log order
pub fn idle_samples(samples: &[LogSample]) -> Vec<LogSample> {
    samples
        .iter()
        .filter(|s| s.rpm < IDLE_RPM)
        .copied()
        .collect()
}
