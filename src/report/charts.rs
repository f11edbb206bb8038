//! Time-series charts for a single run.

use plotly::common::{AxisSide, DashType, Line, Marker, Mode, Position, Title};
use plotly::layout::{Axis, Layout};
use plotly::{Plot, Scatter};

use super::figure::{format_value, vline};
use super::{Chart, ChartError, ChartKind};
use crate::analysis::{find_peak, require_channel, AnalysisError};
use crate::sample::LogSample;
use crate::tables::NormalizedGrid;

/// Load column of the boost table that holds the wastegate target
pub const TARGET_BOOST_LOAD: f64 = 100.0;

const MRP_CHANNEL: &str = "Manifold Relative Pressure (psi)";
const WIDEBAND_CHANNEL: &str = "AEM UEGO Wideband [9600 baud] (AFR Gasoline)";
const EST_AFR_CHANNEL: &str = "Fueling Final Base* (estimated AFR)";
const AVCS_CHANNEL: &str = "Intake VVT Advance Angle Left (degrees)";

/// Collect a series the chart can do without; a missing channel is recorded
/// in `omitted` instead of failing the chart
fn optional_series<F>(
    run: &[LogSample],
    name: &str,
    field: F,
    omitted: &mut Vec<AnalysisError>,
) -> Option<Vec<f64>>
where
    F: Fn(&LogSample) -> Option<f64>,
{
    match require_channel(run, name, field) {
        Ok(series) => Some(series),
        Err(e) => {
            omitted.push(e);
            None
        }
    }
}

fn line(name: &str, x: Vec<f64>, y: Vec<f64>, color: &'static str) -> Box<Scatter<f64, f64>> {
    Scatter::new(x, y)
        .mode(Mode::Lines)
        .name(name)
        .line(Line::new().color(color))
}

fn dashed(name: &str, x: Vec<f64>, y: Vec<f64>, color: &'static str) -> Box<Scatter<f64, f64>> {
    Scatter::new(x, y)
        .mode(Mode::Lines)
        .name(name)
        .line(Line::new().color(color).dash(DashType::Dash))
}

/// A single red marker labeled "<value> <unit>"
fn peak_marker(name: &str, x: f64, y: f64, unit: &str) -> Box<Scatter<f64, f64>> {
    let label = format!("{} {}", format_value(y), unit);
    Scatter::new(vec![x], vec![y])
        .mode(Mode::MarkersText)
        .name(name)
        .text(&label)
        .text_position(Position::TopCenter)
        .marker(Marker::new().color("red").size(10))
}

/// Boost & AFR vs RPM.
///
/// Overlays logged boost, the target boost column of the boost table, the
/// peak boost marker, wideband AFR and the ECU's estimated AFR. Either AFR
/// series is left out when the log lacks its channel.
pub fn boost_chart(run: &[LogSample], boost_table: &NormalizedGrid) -> Result<Chart, ChartError> {
    let boost = require_channel(run, MRP_CHANNEL, |s| s.mrp)?;
    let mut omitted = Vec::new();
    let afr = optional_series(run, WIDEBAND_CHANNEL, |s| s.wideband_afr, &mut omitted);
    let est_afr = optional_series(run, EST_AFR_CHANNEL, |s| s.est_afr, &mut omitted);
    let rpm: Vec<f64> = run.iter().map(|s| s.rpm).collect();

    let target = boost_table.column(TARGET_BOOST_LOAD)?;
    let target_rpm: Vec<f64> = boost_table.row_axis().iter().map(|&r| r as f64).collect();

    let (peak_index, peak_boost) = find_peak(&boost).ok_or(ChartError::NoData("boost"))?;
    let peak_rpm = rpm[peak_index];

    let mut plot = Plot::new();
    plot.add_trace(line("Boost (psi)", rpm.clone(), boost, "green"));
    plot.add_trace(dashed("Target Boost", target_rpm, target, "darkgreen"));
    plot.add_trace(peak_marker("Peak Boost", peak_rpm, peak_boost, "psi"));
    if let Some(afr) = afr {
        plot.add_trace(line("Wideband AFR", rpm.clone(), afr, "blue").y_axis("y2"));
    }
    if let Some(est_afr) = est_afr {
        plot.add_trace(dashed("Estimated AFR", rpm, est_afr, "navy").y_axis("y2"));
    }

    plot.set_layout(
        Layout::new()
            .title(Title::with_text(ChartKind::Boost.title()))
            .x_axis(Axis::new().title(Title::with_text("RPM")))
            .y_axis(
                Axis::new()
                    .title(Title::with_text("Boost (psi)"))
                    .range(vec![0.0, 21.0]),
            )
            .y_axis2(
                Axis::new()
                    .title(Title::with_text("AFR"))
                    .overlaying("y")
                    .side(AxisSide::Right)
                    .range(vec![9.0, 17.0]),
            )
            .shapes(vec![vline(peak_rpm)]),
    );

    Ok(Chart { plot, omitted })
}

/// Load (g/rev) & AVCS vs RPM, with the peak load marked
pub fn load_chart(run: &[LogSample]) -> Result<Chart, ChartError> {
    let mut omitted = Vec::new();
    let avcs = optional_series(run, AVCS_CHANNEL, |s| s.avcs, &mut omitted);
    let rpm: Vec<f64> = run.iter().map(|s| s.rpm).collect();
    let load: Vec<f64> = run.iter().map(|s| s.load).collect();

    let (peak_index, peak_load) = find_peak(&load).ok_or(ChartError::NoData("load"))?;
    let peak_rpm = rpm[peak_index];

    let mut plot = Plot::new();
    plot.add_trace(line("Load vs RPM", rpm.clone(), load, "blue"));
    if let Some(avcs) = avcs {
        plot.add_trace(line("AVCS vs RPM", rpm, avcs, "green").y_axis("y2"));
    }
    plot.add_trace(peak_marker("Peak Load", peak_rpm, peak_load, "g/rev"));

    plot.set_layout(
        Layout::new()
            .title(Title::with_text(ChartKind::Load.title()))
            .x_axis(Axis::new().title(Title::with_text("RPM")))
            .y_axis(Axis::new().title(Title::with_text("Engine Load (g/rev)")))
            .y_axis2(
                Axis::new()
                    .title(Title::with_text("AVCS Angle"))
                    .overlaying("y")
                    .side(AxisSide::Right),
            )
            .shapes(vec![vline(peak_rpm)]),
    );

    Ok(Chart { plot, omitted })
}

/// Wideband AFR against RPM for every idle sample
pub fn idle_chart(idle: &[LogSample]) -> Result<Plot, ChartError> {
    if idle.is_empty() {
        return Err(ChartError::NoData("idle"));
    }
    let afr = require_channel(idle, WIDEBAND_CHANNEL, |s| s.wideband_afr)?;
    let rpm: Vec<f64> = idle.iter().map(|s| s.rpm).collect();

    let mut plot = Plot::new();
    plot.add_trace(Scatter::new(rpm, afr).mode(Mode::Markers).name("Idle AFR"));
    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Idle AFR vs RPM"))
            .x_axis(Axis::new().title(Title::with_text("RPM")))
            .y_axis(Axis::new().title(Title::with_text("AFR"))),
    );
    Ok(plot)
}
