//! wotlog - WOT run analyzer for RomRaider logs
//!
//! Prompts for a log file, analyses every wide-open-throttle run against the
//! tuning tables and writes an HTML report.

use anyhow::Context;
use std::path::PathBuf;

use wotlog::normalize::ChannelAliases;
use wotlog::pipeline::{self, PipelineError};
use wotlog::settings::Settings;

fn pick_log_file() -> Result<PathBuf, PipelineError> {
    rfd::FileDialog::new()
        .set_title("Select a RomRaider Log CSV File")
        .add_filter("CSV Files", &["csv"])
        .pick_file()
        .ok_or(PipelineError::NoFileSelected)
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let settings = Settings::load();
    tracing::info!("Tuning tables: {}", settings.tables_dir.display());

    let log_path = match pick_log_file() {
        Ok(path) => path,
        Err(PipelineError::NoFileSelected) => {
            println!("No log file selected. Exiting.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let aliases = ChannelAliases::default();
    let output = pipeline::run(&log_path, &settings, &aliases)
        .with_context(|| format!("Failed to analyse {}", log_path.display()))?;

    println!("Saved WOT analysis to {}", output.display());

    if settings.open_report {
        if let Err(e) = open::that(&output) {
            tracing::warn!("Failed to open report: {}", e);
        }
    }

    Ok(())
}
