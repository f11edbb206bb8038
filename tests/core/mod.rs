//! Core module tests for non-parser functionality
//!
//! Tests for:
//! - Channel alias normalization
//! - Tuning-table sheets and grids
//! - WOT run segmentation
//! - Cell mapping
//! - Volumetric efficiency
//! - Unit conversions
//! - Settings loading
//! - Report figures and HTML

pub mod cells_tests;
pub mod normalize_tests;
pub mod runs_tests;
pub mod settings_tests;
