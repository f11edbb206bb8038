//! Annotated table heatmaps.

use plotly::common::Title;
use plotly::layout::{Annotation, Axis, AxisType, Layout, Shape};
use plotly::{HeatMap, Plot};

use super::figure::{cell_border, format_value, Palette};
use crate::analysis::cells::CellCoordinate;
use crate::analysis::derived::VeTable;
use crate::tables::NormalizedGrid;

/// Border colour for cells a run passed through
pub const USED_BORDER: &str = "black";

/// Border colour for cells where knock was logged
pub const KNOCK_BORDER: &str = "red";

const HEATMAP_SIZE: usize = 600;

/// Cell value annotation, rounded to 2 decimals
pub fn format_cell(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    format_value((value * 100.0).round_ties_even() / 100.0)
}

/// Builder for one annotated heatmap.
///
/// Both axes are categorical, so cells sit at integer positions and borders
/// and annotations are placed by position rather than by axis value.
pub struct HeatmapBuilder {
    title: String,
    x_title: String,
    x: Vec<String>,
    y: Vec<String>,
    z: Vec<Vec<f64>>,
    palette: Palette,
    /// Draw the first row at the top of the plot
    top_down: bool,
    shapes: Vec<Shape>,
    /// Axis values backing `x`/`y`, used to place cell borders
    grid_axes: Option<(Vec<i64>, Vec<f64>)>,
}

impl HeatmapBuilder {
    /// Heatmap of a tuning table; RPM increases downwards
    pub fn from_grid(grid: &NormalizedGrid, title: &str) -> Self {
        Self {
            title: title.to_string(),
            x_title: "Load (g/rev)".to_string(),
            x: grid.column_axis().iter().copied().map(format_value).collect(),
            y: grid.row_axis().iter().map(|r| r.to_string()).collect(),
            z: grid.values().to_vec(),
            palette: Palette::Spectral,
            top_down: true,
            shapes: Vec::new(),
            grid_axes: Some((grid.row_axis().to_vec(), grid.column_axis().to_vec())),
        }
    }

    /// Single-column VE heatmap labeled by each sample's RPM
    pub fn from_ve(table: &VeTable, title: &str) -> Self {
        Self {
            title: title.to_string(),
            x_title: "VE (%)".to_string(),
            x: vec!["1".to_string()],
            y: table.rpm.iter().copied().map(format_value).collect(),
            z: table.ve.iter().map(|&v| vec![v]).collect(),
            palette: Palette::SpectralReversed,
            top_down: false,
            shapes: Vec::new(),
            grid_axes: None,
        }
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Plot position of source row `row`
    fn row_position(&self, row: usize) -> usize {
        if self.top_down {
            self.y.len() - 1 - row
        } else {
            row
        }
    }

    /// Outline each given cell; cells not on this grid are ignored
    pub fn borders<I>(mut self, cells: I, color: &'static str, width: f64) -> Self
    where
        I: IntoIterator<Item = CellCoordinate>,
    {
        let Some((rows, columns)) = &self.grid_axes else {
            return self;
        };
        let mut positions = Vec::new();
        for cell in cells {
            let y = rows.iter().position(|&r| r == cell.rpm);
            let x = columns.iter().position(|&c| c == cell.load);
            if let (Some(x), Some(y)) = (x, y) {
                positions.push((x, y));
            }
        }
        for (x, y) in positions {
            let shape = cell_border(x, self.row_position(y), color, width);
            self.shapes.push(shape);
        }
        self
    }

    pub fn build(self) -> Plot {
        let mut annotations = Vec::new();
        for (row, values) in self.z.iter().enumerate() {
            let y = self.row_position(row) as f64;
            for (column, &value) in values.iter().enumerate() {
                if value.is_nan() {
                    continue;
                }
                annotations.push(
                    Annotation::new()
                        .x(column as f64)
                        .y(y)
                        .text(format_cell(value))
                        .show_arrow(false),
                );
            }
        }

        // Categories stack bottom-up, so feed rows in reverse to draw them top-down
        let (y, z) = if self.top_down {
            (
                self.y.iter().rev().cloned().collect(),
                self.z.iter().rev().cloned().collect(),
            )
        } else {
            (self.y, self.z)
        };

        let mut plot = Plot::new();
        plot.add_trace(
            HeatMap::new(self.x, y, z)
                .color_scale(self.palette.color_scale())
                .show_scale(false),
        );

        let mut layout = Layout::new()
            .title(Title::with_text(&self.title))
            .x_axis(
                Axis::new()
                    .title(Title::with_text(&self.x_title))
                    .type_(AxisType::Category),
            )
            .y_axis(
                Axis::new()
                    .title(Title::with_text("RPM"))
                    .type_(AxisType::Category),
            )
            .width(HEATMAP_SIZE)
            .height(HEATMAP_SIZE)
            .annotations(annotations);
        if !self.shapes.is_empty() {
            layout = layout.shapes(self.shapes);
        }
        plot.set_layout(layout);
        plot
    }
}
