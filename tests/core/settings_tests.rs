//! Tests for read-only settings

use std::path::{Path, PathBuf};

use crate::common::{write_file, TempDir};
use wotlog::report::html::DEFAULT_PLOTLY_CDN;
use wotlog::settings::{Settings, DEFAULT_REPORT_NAME};

// ============================================
// Defaults Tests
// ============================================

#[test]
fn test_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.version, 1);
    assert!(settings.open_report);
    assert!(settings.output_file.is_none());
    assert_eq!(settings.plotly_cdn, DEFAULT_PLOTLY_CDN);
    assert!(settings.tables_dir.ends_with("rom_tables"));
}

#[test]
fn test_missing_file_gives_defaults() {
    let settings = Settings::load_from(Path::new("/nonexistent/wotlog/settings.json"));
    assert!(settings.open_report);
}

// ============================================
// File Loading Tests
// ============================================

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "settings.json",
        r#"{ "tables_dir": "/data/tables", "open_report": false }"#,
    );

    let settings = Settings::load_from(&path);
    assert_eq!(settings.tables_dir, PathBuf::from("/data/tables"));
    assert!(!settings.open_report);
    assert_eq!(settings.plotly_cdn, DEFAULT_PLOTLY_CDN);
    assert_eq!(settings.version, 1);
}

#[test]
fn test_invalid_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "settings.json", "{ not json");
    let settings = Settings::load_from(&path);
    assert!(settings.open_report);
    assert!(settings.output_file.is_none());
}

#[test]
fn test_output_path() {
    let mut settings = Settings::default();
    let log = Path::new("/logs/romraiderlog_20240101.csv");
    assert_eq!(
        settings.report_path(log),
        PathBuf::from("/logs").join(DEFAULT_REPORT_NAME)
    );

    settings.output_file = Some(PathBuf::from("/tmp/out.html"));
    assert_eq!(settings.report_path(log), PathBuf::from("/tmp/out.html"));
}

#[test]
fn test_config_dir_named_for_app() {
    if let Some(dir) = Settings::get_config_dir() {
        assert!(dir.ends_with("wotlog"));
    }
    if let Some(path) = Settings::get_settings_path() {
        assert!(path.ends_with("wotlog/settings.json"));
    }
}
