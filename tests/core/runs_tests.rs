//! Tests for WOT run segmentation

use wotlog::analysis::runs::{idle_samples, segment_runs, wot_runs};
use wotlog::sample::LogSample;

fn throttle_trace(values: &[f64]) -> Vec<LogSample> {
    values
        .iter()
        .enumerate()
        .map(|(i, &t)| LogSample::new(3000.0 + i as f64 * 100.0, 1.0, t))
        .collect()
}

fn throttles(runs: &[Vec<LogSample>]) -> Vec<Vec<f64>> {
    runs.iter()
        .map(|run| run.iter().map(|s| s.throttle).collect())
        .collect()
}

// ============================================
// Segmentation Tests
// ============================================

#[test]
fn test_two_runs() {
    let runs = wot_runs(&throttle_trace(&[0.0, 100.0, 100.0, 0.0, 100.0]));
    assert_eq!(throttles(&runs), vec![vec![100.0, 100.0], vec![100.0]]);
}

#[test]
fn test_never_wide_open() {
    assert!(wot_runs(&throttle_trace(&[0.0, 50.0, 99.9])).is_empty());
}

#[test]
fn test_starts_wide_open() {
    let runs = wot_runs(&throttle_trace(&[100.0, 100.0, 20.0]));
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].len(), 2);
}

#[test]
fn test_partial_throttle_breaks_run() {
    let runs = wot_runs(&throttle_trace(&[100.0, 99.5, 100.0]));
    assert_eq!(runs.len(), 2);
}

#[test]
fn test_runs_keep_sample_order() {
    let runs = wot_runs(&throttle_trace(&[100.0, 100.0, 100.0]));
    let rpm: Vec<f64> = runs[0].iter().map(|s| s.rpm).collect();
    assert_eq!(rpm, vec![3000.0, 3100.0, 3200.0]);
}

#[test]
fn test_empty_log() {
    assert!(wot_runs(&[]).is_empty());
}

#[test]
fn test_segment_runs_generic() {
    let runs = segment_runs(&[1, 2, 0, 3, 0, 0, 4], |&v| v > 0);
    assert_eq!(runs, vec![vec![1, 2], vec![3], vec![4]]);
}

// ============================================
// Idle Filter Tests
// ============================================

#[test]
fn test_idle_samples_below_threshold() {
    let samples: Vec<LogSample> = [750.0, 1000.0, 999.0, 3000.0]
        .iter()
        .map(|&rpm| LogSample::new(rpm, 0.2, 0.0))
        .collect();
    let idle: Vec<f64> = idle_samples(&samples).iter().map(|s| s.rpm).collect();
    assert_eq!(idle, vec![750.0, 999.0]);
}
