//! Common test utilities shared across all test modules
//!
//! Synthetic RomRaider logs, tuning-table sheets and a scratch directory
//! helper. Every fixture is generated in code so tests never depend on files
//! outside the repository.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use plotly::Plot;
use serde_json::Value;
pub use tempfile::TempDir;
use wotlog::normalize::ChannelAlias;

/// Write a file inside `dir` and return its path
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents)
        .unwrap_or_else(|e| panic!("Failed to write '{}': {}", path.display(), e));
    path
}

/// A plot's JSON, for asserting on traces and layout
pub fn plot_json(plot: &Plot) -> Value {
    serde_json::from_str(&plot.to_json()).expect("Plot JSON should parse")
}

/// Border colours of every shape in a plot's layout, in drawing order
pub fn border_colors(plot: &Plot) -> Vec<String> {
    plot_json(plot)["layout"]["shapes"]
        .as_array()
        .map(|shapes| {
            shapes
                .iter()
                .filter_map(|s| s["line"]["color"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Synthetic RomRaider logs
pub mod logs {
    use super::ChannelAlias;

    /// One logged row; `None` channels are written as empty cells
    #[derive(Clone, Copy, Debug)]
    pub struct Row {
        pub time_ms: f64,
        pub rpm: f64,
        pub load: f64,
        pub throttle: f64,
        pub mrp: f64,
        pub wideband: f64,
        pub est_afr: f64,
        pub fbkc: f64,
        pub flkc: f64,
        pub iat_f: f64,
        pub avcs: f64,
    }

    impl Row {
        pub fn new(time_ms: f64, rpm: f64, load: f64, throttle: f64) -> Self {
            Self {
                time_ms,
                rpm,
                load,
                throttle,
                mrp: load * 12.0,
                wideband: 11.4,
                est_afr: 11.1,
                fbkc: 0.0,
                flkc: 0.0,
                iat_f: 95.0,
                avcs: 18.0,
            }
        }

        pub fn knock(mut self, fbkc: f64) -> Self {
            self.fbkc = fbkc;
            self
        }
    }

    /// Every channel the report plots, in logger order
    pub const FULL_CHANNELS: [ChannelAlias; 11] = [
        ChannelAlias::Time,
        ChannelAlias::Rpm,
        ChannelAlias::Load,
        ChannelAlias::Throttle,
        ChannelAlias::Mrp,
        ChannelAlias::Wideband,
        ChannelAlias::EstAfr,
        ChannelAlias::Fbkc,
        ChannelAlias::Flkc,
        ChannelAlias::IatF,
        ChannelAlias::Avcs,
    ];

    fn cell(alias: ChannelAlias, row: &Row) -> f64 {
        match alias {
            ChannelAlias::Time => row.time_ms,
            ChannelAlias::Rpm => row.rpm,
            ChannelAlias::Load => row.load,
            ChannelAlias::Throttle => row.throttle,
            ChannelAlias::Mrp => row.mrp,
            ChannelAlias::Wideband => row.wideband,
            ChannelAlias::EstAfr => row.est_afr,
            ChannelAlias::Fbkc => row.fbkc,
            ChannelAlias::Flkc => row.flkc,
            ChannelAlias::IatF => row.iat_f,
            ChannelAlias::Avcs => row.avcs,
            _ => f64::NAN,
        }
    }

    /// Render rows as a RomRaider CSV with only the given channels
    pub fn romraider_csv(channels: &[ChannelAlias], rows: &[Row]) -> String {
        let mut out = channels
            .iter()
            .map(|c| c.romraider_header())
            .collect::<Vec<_>>()
            .join(",");
        out.push('\n');
        for row in rows {
            let line = channels
                .iter()
                .map(|&c| cell(c, row).to_string())
                .collect::<Vec<_>>()
                .join(",");
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// Idle, then two WOT runs separated by a lift. Only the second run knocks.
    pub fn two_run_rows() -> Vec<Row> {
        vec![
            Row::new(0.0, 800.0, 0.2, 0.0),
            Row::new(100.0, 820.0, 0.2, 0.0),
            Row::new(200.0, 2900.0, 0.88, 100.0),
            Row::new(300.0, 3500.0, 1.05, 100.0),
            Row::new(400.0, 4300.0, 1.25, 100.0),
            Row::new(500.0, 4000.0, 0.4, 20.0),
            Row::new(600.0, 3000.0, 0.9, 100.0),
            Row::new(700.0, 4400.0, 1.3, 100.0).knock(-1.4),
            Row::new(800.0, 5100.0, 1.3, 100.0),
            Row::new(900.0, 2500.0, 0.3, 0.0),
        ]
    }

    pub fn two_run_log() -> String {
        romraider_csv(&FULL_CHANNELS, &two_run_rows())
    }
}

/// Synthetic tuning-table sheets
pub mod sheets {
    use std::path::Path;

    use super::write_file;
    use wotlog::tables::{
        SHEET_AVCS, SHEET_BASE_TIMING, SHEET_BOOST, SHEET_KCA, SHEET_OL_FUELING,
    };

    pub const LOADS: [f64; 5] = [0.5, 0.7, 0.9, 1.1, 1.3];
    pub const RPMS: [f64; 5] = [2000.0, 2800.0, 3600.0, 4400.0, 5200.0];

    /// A sheet with a title line, a load axis row and one row per RPM
    pub fn sheet(loads: &[f64], rpms: &[f64], value: impl Fn(usize, usize) -> f64) -> String {
        let mut out = String::from("[Table3D]\n");
        let axis: Vec<String> = loads.iter().map(|l| l.to_string()).collect();
        out.push_str(&format!(",{}\n", axis.join(",")));
        for (r, rpm) in rpms.iter().enumerate() {
            let cells: Vec<String> = (0..loads.len()).map(|c| value(r, c).to_string()).collect();
            out.push_str(&format!("{},{}\n", rpm, cells.join(",")));
        }
        out
    }

    /// Write the five sheets the pipeline needs
    pub fn write_all(dir: &Path) {
        write_file(
            dir,
            &format!("{}.csv", SHEET_BASE_TIMING),
            &sheet(&LOADS, &RPMS, |r, c| 30.0 - (r + c) as f64 * 2.0),
        );
        write_file(
            dir,
            &format!("{}.csv", SHEET_KCA),
            &sheet(&LOADS, &RPMS, |_, c| if c > 2 { 4.0 } else { 0.0 }),
        );
        write_file(
            dir,
            &format!("{}.csv", SHEET_OL_FUELING),
            &sheet(&LOADS, &RPMS, |r, c| 12.5 - (r + c) as f64 * 0.1),
        );
        write_file(
            dir,
            &format!("{}.csv", SHEET_BOOST),
            &sheet(&[50.0, 75.0, 100.0], &RPMS, |r, c| 8.0 + r as f64 + c as f64 * 2.0),
        );
        write_file(
            dir,
            &format!("{}.csv", SHEET_AVCS),
            &sheet(&LOADS, &RPMS, |r, _| 10.0 + r as f64 * 5.0),
        );
    }
}
