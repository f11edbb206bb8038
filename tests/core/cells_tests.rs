//! Tests for mapping logged operating points onto table cells

use wotlog::analysis::cells::{
    knock_cells, match_column, match_row, used_cells, CellCoordinate, CellMapper,
};
use wotlog::sample::LogSample;
use wotlog::tables::NormalizedGrid;

const LOADS: [f64; 5] = [0.5, 0.7, 0.9, 1.1, 1.3];
const RPMS: [i64; 4] = [2000, 2400, 2800, 3200];

fn grid() -> NormalizedGrid {
    NormalizedGrid::new(
        "total timing",
        RPMS.to_vec(),
        LOADS.to_vec(),
        vec![vec![0.0; LOADS.len()]; RPMS.len()],
    )
    .unwrap()
}

// ============================================
// Window Matching Tests
// ============================================

#[test]
fn test_load_windows() {
    assert_eq!(match_column(&LOADS, 0.58), Some(0.5));
    assert_eq!(match_column(&LOADS, 0.65), Some(0.7));
    assert_eq!(match_column(&LOADS, 1.35), Some(1.3));
}

#[test]
fn test_load_boundary_goes_to_lower_bucket() {
    // 0.6 is the upper edge of 0.5's window and outside 0.7's
    assert_eq!(match_column(&LOADS, 0.6), Some(0.5));
}

#[test]
fn test_load_outside_all_windows() {
    assert_eq!(match_column(&LOADS, 0.4), None);
    assert_eq!(match_column(&LOADS, 1.41), None);
}

#[test]
fn test_rpm_windows() {
    assert_eq!(match_row(&RPMS, 2150.0), Some(2000));
    assert_eq!(match_row(&RPMS, 2200.0), Some(2000));
    assert_eq!(match_row(&RPMS, 2201.0), Some(2400));
    assert_eq!(match_row(&RPMS, 1800.0), None);
    assert_eq!(match_row(&RPMS, 3401.0), None);
}

#[test]
fn test_first_match_wins_on_overlap() {
    // Axis values closer together than the tolerance
    let rows = [3000, 3100];
    assert_eq!(match_row(&rows, 3050.0), Some(3000));
}

// ============================================
// Mapper Tests
// ============================================

#[test]
fn test_map_skips_unmatched_pairs() {
    let grid = grid();
    let matches = CellMapper::for_grid(&grid).map([(0.58, 2150.0), (2.0, 2150.0), (0.9, 2800.0)]);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches.columns, vec![0.5, 0.9]);
    assert_eq!(matches.rows, vec![2000, 2800]);
}

#[test]
fn test_requires_both_axes() {
    let grid = grid();
    let mapper = CellMapper::for_grid(&grid);
    assert_eq!(mapper.locate(0.9, 5000.0), None);
    assert_eq!(mapper.locate(3.0, 2800.0), None);
    assert_eq!(
        mapper.locate(0.9, 2800.0),
        Some(CellCoordinate {
            rpm: 2800,
            load: 0.9
        })
    );
}

#[test]
fn test_distinct_keeps_first_seen_order() {
    let grid = grid();
    let run: Vec<LogSample> = [(0.9, 2800.0), (0.5, 2000.0), (0.92, 2790.0)]
        .iter()
        .map(|&(load, rpm)| LogSample::new(rpm, load, 100.0))
        .collect();
    let used = used_cells(&grid, &run);
    assert_eq!(used.len(), 3);
    assert_eq!(
        used.distinct(),
        vec![
            CellCoordinate {
                rpm: 2800,
                load: 0.9
            },
            CellCoordinate {
                rpm: 2000,
                load: 0.5
            },
        ]
    );
}

// ============================================
// Knock Cell Tests
// ============================================

#[test]
fn test_knock_cells_from_either_channel() {
    let grid = grid();
    let mut a = LogSample::new(2000.0, 0.5, 100.0);
    a.fbkc = Some(-1.4);
    a.flkc = Some(0.0);
    let mut b = LogSample::new(2400.0, 0.7, 100.0);
    b.fbkc = Some(0.0);
    b.flkc = Some(0.0);
    let mut c = LogSample::new(3200.0, 1.3, 100.0);
    c.fbkc = Some(0.0);
    c.flkc = Some(-0.35);

    let knock = knock_cells(&grid, &[a, b, c]).unwrap();
    assert_eq!(knock.rows, vec![2000, 3200]);
    assert_eq!(knock.columns, vec![0.5, 1.3]);
}

#[test]
fn test_no_knock_returns_none() {
    let grid = grid();
    let mut sample = LogSample::new(2000.0, 0.5, 100.0);
    sample.fbkc = Some(0.0);
    assert!(knock_cells(&grid, &[sample]).is_none());

    // Channels absent entirely
    assert!(knock_cells(&grid, &[LogSample::new(2000.0, 0.5, 100.0)]).is_none());
}
