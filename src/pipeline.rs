//! The per-invocation batch pipeline.
//!
//! Load tables, load the log, segment it into WOT runs, analyse each run
//! independently and assemble the report. Whole-invocation failures return an
//! error before anything is written; per-run failures only drop the affected
//! chart and leave a notice in the report.

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::analysis::cells::{avcs_cells, knock_cells, used_cells, CellMatches};
use crate::analysis::derived::{run_volumetric_efficiency, VeTable};
use crate::analysis::runs::{idle_samples, wot_runs};
use crate::analysis::AnalysisError;
use crate::normalize::ChannelAliases;
use crate::parsers::{LogError, Parseable, RomRaider};
use crate::report::charts::{boost_chart, idle_chart, load_chart};
use crate::report::figure::Palette;
use crate::report::heatmap::{HeatmapBuilder, KNOCK_BORDER, USED_BORDER};
use crate::report::{html, Chart, ChartKind, Report, RunReport};
use crate::sample::{LogSample, LogSchema};
use crate::settings::Settings;
use crate::tables::{TableError, TuningTables};

/// Report heading
pub const REPORT_TITLE: &str = "WRX WOT Run Analysis";

/// Errors that abort the whole invocation
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The user cancelled the log file picker
    #[error("No log file selected")]
    NoFileSelected,

    #[error(transparent)]
    Tables(#[from] TableError),

    #[error(transparent)]
    Log(#[from] LogError),

    /// Failed to write the report
    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read and parse a RomRaider log into typed samples
pub fn load_samples(contents: &str, aliases: &ChannelAliases) -> Result<Vec<LogSample>, LogError> {
    let log = RomRaider.parse(contents)?;
    tracing::info!("Parsed {} rows across {} channels", log.len(), log.channels.len());
    let schema = LogSchema::bind(&log, aliases)?;
    Ok(schema.samples(&log))
}

/// Cell matches and VE for one run, computed before any chart is drawn
pub struct RunAnalysis<'a> {
    /// 1-based run number
    pub number: usize,
    pub run: &'a [LogSample],
    pub used: CellMatches,
    pub knock: Option<CellMatches>,
    pub avcs_used: CellMatches,
    pub ve: Result<VeTable, AnalysisError>,
}

/// Map one run onto the tables and compute its VE
pub fn analyze_run<'a>(
    number: usize,
    run: &'a [LogSample],
    tables: &TuningTables,
) -> RunAnalysis<'a> {
    let used = used_cells(&tables.total_timing, run);
    let knock = knock_cells(&tables.total_timing, run);
    let avcs_used = avcs_cells(&tables.avcs, run);

    tracing::debug!(
        "Run {}: {} samples, {} used cells, {} knock cells",
        number,
        run.len(),
        used.len(),
        knock.as_ref().map_or(0, |k| k.len())
    );

    RunAnalysis {
        number,
        run,
        used,
        knock,
        avcs_used,
        ve: run_volumetric_efficiency(run),
    }
}

/// Draw every chart for one analysed run
pub fn render_run(analysis: RunAnalysis<'_>, tables: &TuningTables) -> RunReport {
    let run = analysis.run;
    let mut report = RunReport::new(analysis.number, run.len());

    if run.iter().all(|s| s.fbkc.is_none() && s.flkc.is_none()) {
        report
            .notices
            .push("Knock highlighting skipped: log has no knock correction channels".to_string());
    }

    let mut timing = HeatmapBuilder::from_grid(&tables.total_timing, ChartKind::Timing.title())
        .palette(Palette::SpectralReversed)
        .borders(analysis.used.distinct(), USED_BORDER, 2.0);
    if let Some(knock) = &analysis.knock {
        timing = timing.borders(knock.distinct(), KNOCK_BORDER, 3.0);
    }
    report.push(ChartKind::Timing, Ok(timing.build().into()));

    let fueling = HeatmapBuilder::from_grid(&tables.ol_fueling, ChartKind::Fueling.title())
        .palette(Palette::Spectral)
        .borders(analysis.used.distinct(), USED_BORDER, 2.0);
    report.push(ChartKind::Fueling, Ok(fueling.build().into()));

    let avcs = HeatmapBuilder::from_grid(&tables.avcs, ChartKind::Avcs.title())
        .palette(Palette::SpectralReversed)
        .borders(analysis.avcs_used.distinct(), USED_BORDER, 2.0);
    report.push(ChartKind::Avcs, Ok(avcs.build().into()));

    let ve: Result<Chart, AnalysisError> = analysis.ve.map(|table| {
        HeatmapBuilder::from_ve(&table, ChartKind::VolumetricEfficiency.title())
            .build()
            .into()
    });
    report.push(ChartKind::VolumetricEfficiency, ve.map_err(Into::into));

    report.push(ChartKind::Boost, boost_chart(run, &tables.boost));
    report.push(ChartKind::Load, load_chart(run));

    report
}

/// Analyse a whole log against the tables
pub fn build_report(source: &str, samples: &[LogSample], tables: &TuningTables) -> Report {
    let runs = wot_runs(samples);
    tracing::info!("Number of runs found: {}", runs.len());

    let mut notices = Vec::new();
    if runs.is_empty() {
        tracing::warn!("No WOT runs found in {}", source);
        notices.push("No WOT runs found in this log".to_string());
    }

    // Runs are independent; collect keeps them in log order
    let analyses: Vec<RunAnalysis> = runs
        .par_iter()
        .enumerate()
        .map(|(i, run)| analyze_run(i + 1, run, tables))
        .collect();
    let run_reports: Vec<RunReport> = analyses
        .into_iter()
        .map(|analysis| render_run(analysis, tables))
        .collect();

    let idle = match idle_chart(&idle_samples(samples)) {
        Ok(plot) => Some(plot),
        Err(e) => {
            tracing::info!("No idle chart: {}", e);
            None
        }
    };

    Report {
        title: REPORT_TITLE.to_string(),
        source: source.to_string(),
        runs: run_reports,
        idle,
        notices,
    }
}

/// Run the full pipeline for one log file and write the report
pub fn run(log_path: &Path, settings: &Settings, aliases: &ChannelAliases) -> Result<PathBuf, PipelineError> {
    let tables = TuningTables::load(&settings.tables_dir)?;

    let contents = std::fs::read_to_string(log_path).map_err(LogError::from)?;
    let samples = load_samples(&contents, aliases)?;

    let source = log_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| log_path.display().to_string());
    let report = build_report(&source, &samples, &tables);

    let output = settings.report_path(log_path);
    let write_error = |source| PipelineError::Write {
        path: output.clone(),
        source,
    };
    let page = html::render(&report, &settings.plotly_cdn).map_err(write_error)?;
    std::fs::write(&output, page).map_err(write_error)?;

    tracing::info!("Saved WOT analysis to {}", output.display());
    Ok(output)
}
