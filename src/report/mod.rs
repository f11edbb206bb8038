//! Report rendering.
//!
//! Turns grids, highlighted cells and run series into Plotly figures and
//! assembles them into one tabbed HTML page.

pub mod charts;
pub mod figure;
pub mod heatmap;
pub mod html;

use plotly::Plot;
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::tables::TableError;

/// Why a single chart could not be drawn
#[derive(Debug, Error)]
pub enum ChartError {
    /// The run lacks a channel the chart plots
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// A table the chart reads is missing data
    #[error(transparent)]
    Table(#[from] TableError),

    /// Nothing to plot
    #[error("No {0} data to plot")]
    NoData(&'static str),
}

/// A drawn chart, with any series it had to leave out
pub struct Chart {
    pub plot: Plot,
    /// Why each missing series was dropped
    pub omitted: Vec<AnalysisError>,
}

impl From<Plot> for Chart {
    fn from(plot: Plot) -> Self {
        Self {
            plot,
            omitted: Vec::new(),
        }
    }
}

/// Which chart a figure is, in the order the run grid lays them out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Timing,
    Fueling,
    Avcs,
    VolumetricEfficiency,
    Boost,
    Load,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Timing,
        ChartKind::Fueling,
        ChartKind::Avcs,
        ChartKind::VolumetricEfficiency,
        ChartKind::Boost,
        ChartKind::Load,
    ];

    /// Short id used in element ids
    pub fn slug(&self) -> &'static str {
        match self {
            ChartKind::Timing => "timing",
            ChartKind::Fueling => "fuel",
            ChartKind::Avcs => "avcs",
            ChartKind::VolumetricEfficiency => "ve",
            ChartKind::Boost => "boost",
            ChartKind::Load => "load",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Timing => "Total Timing Map",
            ChartKind::Fueling => "Open Loop Fueling Map",
            ChartKind::Avcs => "AVCS Map",
            ChartKind::VolumetricEfficiency => "Volumetric Efficiency (VE)",
            ChartKind::Boost => "Boost & AFR vs RPM",
            ChartKind::Load => "Load (g/rev) & AVCS vs RPM",
        }
    }
}

/// Everything drawn for one run
#[derive(Default)]
pub struct RunReport {
    /// 1-based run number
    pub number: usize,
    pub sample_count: usize,
    pub charts: Vec<(ChartKind, Plot)>,
    /// Charts or highlights skipped for this run, with the reason
    pub notices: Vec<String>,
}

impl RunReport {
    pub fn new(number: usize, sample_count: usize) -> Self {
        Self {
            number,
            sample_count,
            ..Default::default()
        }
    }

    pub fn chart(&self, kind: ChartKind) -> Option<&Plot> {
        self.charts.iter().find(|(k, _)| *k == kind).map(|(_, p)| p)
    }

    /// Record a chart, or note why it was skipped or drawn incomplete
    pub fn push(&mut self, kind: ChartKind, chart: Result<Chart, ChartError>) {
        match chart {
            Ok(chart) => {
                for e in &chart.omitted {
                    tracing::warn!(
                        "Run {}: {} drawn without a series: {}",
                        self.number,
                        kind.title(),
                        e
                    );
                    self.notices
                        .push(format!("{}: {}, series left out", kind.title(), e));
                }
                self.charts.push((kind, chart.plot));
            }
            Err(e) => {
                tracing::warn!("Run {}: skipping {}: {}", self.number, kind.title(), e);
                self.notices.push(format!("{} skipped: {}", kind.title(), e));
            }
        }
    }
}

/// The whole report for one invocation
#[derive(Default)]
pub struct Report {
    pub title: String,
    /// Name of the log the report was built from
    pub source: String,
    pub runs: Vec<RunReport>,
    /// Idle AFR scatter, when the log has idle samples and a wideband channel
    pub idle: Option<Plot>,
    /// Report-wide messages such as "no runs found"
    pub notices: Vec<String>,
}
