//! Ratio plots for benchmark comparisons
//!
//! `forhold` turns paired baseline/target measurements into a horizontal bar
//! chart of `log2(baseline / target)`, with optional error bars propagated
//! from the standard deviations of both sides. It computes everything a
//! renderer needs (bar coordinates, axis bounds, tick labels and reference
//! lines) and leaves the drawing to an external engine.
//!
//! # Core Concepts
//!
//! ## Comparison input
//!
//! [`ComparisonInput`] holds parallel arrays: names, baseline means and
//! deviations, target means and deviations. Position defines identity and
//! vertical order. Validation rejects mismatched lengths and non-positive
//! means with a [`ConfigError`] before anything is transformed.
//!
//! ## Pipeline
//!
//! A [`Plot`] runs the plugins of a [`Registry`] in three stages:
//! options, raw data and datapoints. The [`ratio`] plugin hooks into each:
//!
//! - [`ratio::configure_axes`] switches ratio series to centred horizontal
//!   bars and labels the horizontal axis in fold changes (`×2.0`, `×0.50`).
//! - [`ratio::transform_series`] collapses rows to log2 ratios, fixes the
//!   symmetric axis extent and installs mean and zero markings.
//! - [`ratio::reorder_points`] swaps each point to `(ratio, category)`.
//!
//! Each stage takes a [`ChartContext`] by value and returns it, so stages can
//! be tested in isolation.
//!
//! ## Engines
//!
//! An [`Engine`] receives the finished context. [`JsonEngine`] records the
//! configuration object a JSON-driven charting library would consume.
//!
//! # Examples
//!
//! ```rust
//! use forhold::{Axis, ComparisonInput, Registry, Plot, ChartOptions};
//!
//! let input = ComparisonInput::new(["A", "B"], vec![10.0, 10.0], vec![20.0, 5.0]);
//! let series = input.build_series().unwrap();
//!
//! let registry = Registry::with_defaults();
//! let chart = Plot::new(&registry)
//!     .prepare(series, ChartOptions::default())
//!     .unwrap();
//!
//! // Symmetric axis, floor of one.
//! assert_eq!(chart.options.xaxis.min, Some(-1.0));
//! assert_eq!(chart.options.xaxis.max, Some(1.0));
//!
//! // Mean at zero, plus the fixed zero line.
//! assert_eq!(chart.options.grid.markings[0].xaxis.from, 0.0);
//!
//! // Rows keep their input order on the vertical axis.
//! let labels: Vec<_> = chart.axis_ticks(Axis::Y).into_iter().map(|t| t.label).collect();
//! assert_eq!(labels, ["A", "B"]);
//! ```

pub mod compare;
pub mod context;
pub mod error;
pub mod format;
pub mod options;
pub mod plot;
pub mod plugin;
pub mod ratio;
pub mod scale;
pub mod series;
pub mod transform;

pub use compare::{BenchmarkRecord, ComparisonInput, ErrorBarPoint};
pub use context::{Axis, CategoryTick, ChartContext, LabeledTick};
pub use error::{ConfigError, Result, Side};
pub use options::{AxisOptions, ChartOptions, Marking, RatioOptions, TickSource};
pub use plot::{Engine, JsonEngine, Plot};
pub use plugin::{PluginDescriptor, Registry};
pub use scale::{Scale, Tick, TickIter};
pub use series::{Cell, Datapoints, Row, Series};
pub use transform::{AxisTransform, PlotPoint};
