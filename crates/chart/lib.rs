//! Static PNG charts drawn with plotters.
//!
//! Every chart is a plain value (`LineChart`, `BarChart`, `ScatterChart`)
//! rendered with an explicit [`config::Style`]. Nothing is kept between
//! render calls apart from the registered font.

use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use thiserror::Error;

/// Draws a reference line between two data coordinates and adds its legend entry.
macro_rules! draw_reference {
    ($chart:expr, $line:expr, $from:expr, $to:expr) => {{
        let line: &$crate::ReferenceLine = $line;
        let shape = line.shape();
        let anno = match line.stroke.dash() {
            Some((size, spacing)) => $chart.draw_series(::plotters::series::DashedLineSeries::new(
                vec![$from, $to],
                size,
                spacing,
                shape,
            ))?,
            None => $chart.draw_series(::plotters::series::LineSeries::new(vec![$from, $to], shape))?,
        };
        if let Some(label) = &line.label {
            anno.label(label.as_str())
                .legend(move |(x, y)| ::plotters::element::PathElement::new(vec![(x, y), (x + 20, y)], shape));
        }
    }};
}

mod backend;
pub mod bar;
mod canvas;
pub mod fonts;
pub mod line;
pub mod palette;
pub mod scale;
pub mod scatter;

pub use bar::{Bar, BarChart, BarOrientation};
pub use line::{LineChart, TimeSeries};
pub use plotters::style::RGBColor;
pub use scatter::{Point, PointGroup, ScatterChart, XScale};

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("drawing failed: {0}")]
    Draw(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Draw(e.to_string())
    }
}

/// Figure size in inches; the style's dpi turns it into pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    pub width: f64,
    pub height: f64,
}

impl Figure {
    pub const fn new(width: f64, height: f64) -> Self {
        Figure { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl From<LegendPosition> for SeriesLabelPosition {
    fn from(position: LegendPosition) -> Self {
        match position {
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
            LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
            LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stroke {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl Stroke {
    /// Dash length and gap in pixels, `None` for a continuous line.
    pub fn dash(self) -> Option<(u32, u32)> {
        match self {
            Stroke::Solid => None,
            Stroke::Dashed => Some((8, 5)),
            Stroke::Dotted => Some((2, 4)),
        }
    }
}

/// A fixed threshold drawn across the whole plotting area.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub value: f64,
    pub color: RGBColor,
    pub width: u32,
    pub stroke: Stroke,
    pub label: Option<String>,
}

impl ReferenceLine {
    pub fn at(value: f64) -> Self {
        ReferenceLine {
            value,
            color: BLACK,
            width: 1,
            stroke: Stroke::Solid,
            label: None,
        }
    }

    pub fn color(mut self, color: RGBColor) -> Self {
        self.color = color;
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn dashed(mut self) -> Self {
        self.stroke = Stroke::Dashed;
        self
    }

    pub fn dotted(mut self) -> Self {
        self.stroke = Stroke::Dotted;
        self
    }

    pub fn label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }

    pub(crate) fn shape(&self) -> ShapeStyle {
        self.color.stroke_width(self.width)
    }
}
