//! wotlog - WOT run analyzer for RomRaider logs
//!
//! Reads a RomRaider CSV log and a set of ECU tuning tables, splits the log
//! into wide-open-throttle runs and renders an interactive HTML report that
//! shows, per run, which table cells the engine operated in, where knock
//! occurred, volumetric efficiency, boost, AFR and load.
//!
//! ## Module Structure
//!
//! - [`parsers`] - RomRaider CSV log parsing
//! - [`normalize`] - Channel header aliases
//! - [`sample`] - Typed per-sample view over a parsed log
//! - [`tables`] - Tuning-table loading and normalization
//! - [`analysis`] - Run segmentation, cell mapping and VE
//! - [`units`] - Unit conversion helpers
//! - [`report`] - Plotly figures and the HTML report
//! - [`settings`] - Read-only configuration
//! - [`pipeline`] - End-to-end batch run

pub mod analysis;
pub mod normalize;
pub mod parsers;
pub mod pipeline;
pub mod report;
pub mod sample;
pub mod settings;
pub mod tables;
pub mod units;
