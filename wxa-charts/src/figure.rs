//! Renderer-independent chart descriptions.

use chrono::NaiveDate;
use wxa_data::{binning::Bin, correlation::CorrelationMatrix, distribution::Distribution};

/// 8 x 6 inch figure at 100 dpi
pub const STANDARD_SIZE: (u32, u32) = (800, 600);
/// 10 x 6 inch figure, for time axes
pub const WIDE_SIZE: (u32, u32) = (1000, 600);
/// 10 x 8 inch figure, for matrices
pub const LARGE_SIZE: (u32, u32) = (1000, 800);
/// 8 x 8 inch figure, for equal-aspect charts
pub const SQUARE_SIZE: (u32, u32) = (800, 800);

/// Axis titles and grid switch of a cartesian chart
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    pub x_label: String,
    pub y_label: String,
    pub grid: bool,
}

impl Axes {
    /// Labelled axes with the grid on
    pub fn new(x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Axes {
            x_label: x_label.into(),
            y_label: y_label.into(),
            grid: true,
        }
    }

    pub fn without_grid(mut self) -> Self {
        self.grid = false;
        self
    }
}

/// What a figure shows
#[derive(Debug, Clone, PartialEq)]
pub enum FigureKind {
    /// Bar per bin, black bin edges
    Histogram { axes: Axes, bins: Vec<Bin> },
    /// Plain `(x, y)` scatter at a fixed transparency
    Scatter {
        axes: Axes,
        points: Vec<(f64, f64)>,
        alpha: f64,
    },
    /// Line over a date axis; points must already be in date order
    TimeSeries {
        axes: Axes,
        points: Vec<(NaiveDate, f64)>,
        /// Counter-clockwise rotation of the date labels, in degrees
        x_label_rotation: f64,
    },
    /// `(x, y, value)` scatter colored on a diverging scale, with a color bar
    ColorScatter {
        axes: Axes,
        points: Vec<(f64, f64, f64)>,
        alpha: f64,
        color_label: String,
    },
    /// Annotated matrix on a diverging scale fixed to [-1, 1]
    Heatmap {
        matrix: CorrelationMatrix,
        decimals: usize,
    },
    /// Slices in distribution order, labelled with their share
    Pie {
        distribution: Distribution,
        /// Degrees
        start_angle: f64,
        decimals: usize,
    },
}

/// One chart to render
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Short file-name friendly identifier, e.g. `max-temp-histogram`
    pub slug: String,
    pub title: String,
    /// Pixels, width x height
    pub size: (u32, u32),
    pub kind: FigureKind,
}

impl Figure {
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        size: (u32, u32),
        kind: FigureKind,
    ) -> Self {
        Figure {
            slug: slug.into(),
            title: title.into(),
            size,
            kind,
        }
    }

    /// Name of the chart type, for logs
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            FigureKind::Histogram { .. } => "histogram",
            FigureKind::Scatter { .. } => "scatter",
            FigureKind::TimeSeries { .. } => "time series",
            FigureKind::ColorScatter { .. } => "color scatter",
            FigureKind::Heatmap { .. } => "heatmap",
            FigureKind::Pie { .. } => "pie",
        }
    }
}
