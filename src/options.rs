//! Chart and series options.
//!
//! Options form the contract with the external rendering engine. They
//! serialize to the JSON the engine consumes and can be loaded from a JSON
//! configuration; every field has a default, so partial documents are fine.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::format::TickFormatter;
use crate::transform::AxisTransform;

/// Accent color of the ratio bars.
pub const RATIO_COLOR: &str = "#d9230f";
/// Color of the error-bar series.
pub const ERROR_BAR_COLOR: &str = "#333";
/// Color of the mean reference line.
pub const MEAN_MARKING_COLOR: &str = "#811";
/// Color of the zero reference line.
pub const ZERO_MARKING_COLOR: &str = "#999";
/// Bar width used when a ratio series does not set one.
pub const DEFAULT_RATIO_BAR_WIDTH: f64 = 0.7;

/// Top-level options shared by every series of a chart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub xaxis: AxisOptions,
    pub yaxis: AxisOptions,
    pub grid: GridOptions,
}

impl ChartOptions {
    /// Parses options from a JSON document.
    ///
    /// ```
    /// use forhold::ChartOptions;
    ///
    /// let options = ChartOptions::from_json(r#"{ "xaxis": { "min": -2.0 } }"#).unwrap();
    /// assert_eq!(options.xaxis.min, Some(-2.0));
    /// assert!(options.grid.markings.is_empty());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Where an axis takes its tick positions and labels from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickSource {
    /// Generated by a linear scale over the axis range.
    #[default]
    Auto,
    /// Bound to the chart's category tick list.
    Categories,
    /// Explicit `(position, label)` pairs.
    Fixed(Vec<(f64, String)>),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOptions {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub ticks: TickSource,
    pub transform: AxisTransform,
    #[serde(skip)]
    pub tick_formatter: Option<TickFormatter>,
}

impl AxisOptions {
    /// Formats a tick value with the installed formatter, or plainly.
    pub fn format_tick(&self, value: f64) -> String {
        match &self.tick_formatter {
            Some(formatter) => formatter.format(value),
            None => format!("{value}"),
        }
    }
}

/// An inclusive range along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub from: f64,
    pub to: f64,
}

impl Range {
    /// A zero-width range, drawn as a line.
    pub const fn at(value: f64) -> Self {
        Self {
            from: value,
            to: value,
        }
    }
}

/// A reference marking drawn across the plot area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marking {
    pub color: String,
    pub line_width: f64,
    pub xaxis: Range,
}

impl Marking {
    /// A vertical line at `x`.
    pub fn vertical_line(x: f64, color: &str) -> Self {
        Self {
            color: color.to_owned(),
            line_width: 1.0,
            xaxis: Range::at(x),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    pub markings: Vec<Marking>,
}

/// Enables the ratio transform for a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatioOptions {
    pub show: bool,
    pub bar_width: Option<f64>,
}

impl RatioOptions {
    pub fn enabled() -> Self {
        Self {
            show: true,
            bar_width: None,
        }
    }

    pub fn bar_width(&self) -> f64 {
        self.bar_width.unwrap_or(DEFAULT_RATIO_BAR_WIDTH)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarOptions {
    pub show: bool,
    pub horizontal: bool,
    pub align: BarAlign,
    pub fill: f64,
    pub bar_width: f64,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            show: false,
            horizontal: false,
            align: BarAlign::Left,
            fill: 0.0,
            bar_width: 0.8,
        }
    }
}

/// Axis along which error bars extend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorBars {
    X,
    Y,
    Xy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorBarOptions {
    pub show: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointOptions {
    pub show: bool,
    pub radius: f64,
    pub errorbars: Option<ErrorBars>,
    pub xerr: ErrorBarOptions,
    pub line_width: f64,
    pub shadow_size: f64,
}

impl PointOptions {
    /// Whether points carry an x error value after their coordinates.
    pub fn has_x_errors(&self) -> bool {
        self.xerr.show && matches!(self.errorbars, Some(ErrorBars::X | ErrorBars::Xy))
    }
}

impl Default for PointOptions {
    fn default() -> Self {
        Self {
            show: false,
            radius: 3.0,
            errorbars: None,
            xerr: ErrorBarOptions::default(),
            line_width: 2.0,
            shadow_size: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineOptions {
    pub show: bool,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self { show: true }
    }
}
