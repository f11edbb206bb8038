//! Plotly building blocks shared by the heatmaps and line charts.

use plotly::common::{ColorScale, ColorScaleElement};
use plotly::layout::{Shape, ShapeLine, ShapeType};

/// ColorBrewer "Spectral", low to high
pub const SPECTRAL: [&str; 11] = [
    "#9e0142", "#d53e4f", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#e6f598", "#abdda4",
    "#66c2a5", "#3288bd", "#5e4fa2",
];

/// Colour scales used by the heatmaps
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Palette {
    Spectral,
    SpectralReversed,
}

impl Palette {
    /// Evenly spaced `(position, colour)` stops
    pub fn stops(&self) -> Vec<(f64, &'static str)> {
        let last = (SPECTRAL.len() - 1) as f64;
        let colours: Vec<&'static str> = match self {
            Palette::Spectral => SPECTRAL.to_vec(),
            Palette::SpectralReversed => SPECTRAL.iter().rev().copied().collect(),
        };
        colours
            .into_iter()
            .enumerate()
            .map(|(i, c)| (i as f64 / last, c))
            .collect()
    }

    pub fn color_scale(&self) -> ColorScale {
        ColorScale::Vector(
            self.stops()
                .into_iter()
                .map(|(position, colour)| ColorScaleElement(position, colour.to_string()))
                .collect(),
        )
    }
}

/// Print a float the way the report labels numbers: "0.5", "17.2", "22.0"
pub fn format_value(value: f64) -> String {
    format!("{:?}", value)
}

/// Unfilled rectangle around the cell at category position (x, y)
pub fn cell_border(x: usize, y: usize, color: &'static str, width: f64) -> Shape {
    Shape::new()
        .shape_type(ShapeType::Rect)
        .x0(x as f64 - 0.5)
        .x1(x as f64 + 0.5)
        .y0(y as f64 - 0.5)
        .y1(y as f64 + 0.5)
        .line(ShapeLine::new().color(color).width(width))
}

/// Full-height vertical line at x
pub fn vline(x: f64) -> Shape {
    Shape::new()
        .shape_type(ShapeType::Line)
        .x0(x)
        .x1(x)
        .y_ref("paper")
        .y0(0.0)
        .y1(1.0)
        .line(ShapeLine::new().color("black"))
}
