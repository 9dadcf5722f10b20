//! The chart build context threaded through every pipeline stage.

use serde::Serialize;

use crate::options::{AxisOptions, ChartOptions, TickSource};
use crate::scale::Linear;
use crate::series::{PointField, Series};
use crate::transform::PlotPoint;

/// A category label bound to an integer position on the vertical axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTick {
    pub index: usize,
    pub label: String,
}

/// A resolved axis tick: position in data space plus its label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledTick {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    fn field(self) -> PointField {
        match self {
            Axis::X => PointField::X,
            Axis::Y => PointField::Y,
        }
    }
}

/// Everything a chart is built from.
///
/// Stages take the context by value and hand it back, so each stage can be
/// run and inspected on its own. Nothing is cached between renders; a new
/// context is built for every chart.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChartContext {
    pub options: ChartOptions,
    pub series: Vec<Series>,
    /// Vertical axis labels, filled by the ratio transform.
    pub category_ticks: Vec<CategoryTick>,
}

impl ChartContext {
    pub fn new(options: ChartOptions, series: Vec<Series>) -> Self {
        Self {
            options,
            series,
            category_ticks: Vec::new(),
        }
    }

    pub fn has_ratio_series(&self) -> bool {
        self.series.iter().any(Series::is_ratio)
    }

    pub fn axis(&self, axis: Axis) -> &AxisOptions {
        match axis {
            Axis::X => &self.options.xaxis,
            Axis::Y => &self.options.yaxis,
        }
    }

    /// Smallest and largest extracted coordinate along `axis`, over all series.
    pub fn data_range(&self, axis: Axis) -> Option<(f64, f64)> {
        let field = axis.field();
        let mut range: Option<(f64, f64)> = None;

        for series in &self.series {
            let datapoints = &series.datapoints;
            let Some(offset) = datapoints.format.iter().position(|f| *f == field) else {
                continue;
            };
            for point in datapoints.iter() {
                let value = point[offset];
                if !value.is_finite() {
                    continue;
                }
                range = Some(match range {
                    Some((lo, hi)) => (lo.min(value), hi.max(value)),
                    None => (value, value),
                });
            }
        }

        range
    }

    /// Resolves the ticks the renderer should draw on `axis`.
    ///
    /// Positions are in data space; the axis transform is applied at draw time.
    pub fn axis_ticks(&self, axis: Axis) -> Vec<LabeledTick> {
        let options = self.axis(axis);
        match &options.ticks {
            TickSource::Categories => self
                .category_ticks
                .iter()
                .map(|tick| LabeledTick {
                    value: tick.index as f64,
                    label: tick.label.clone(),
                })
                .collect(),
            TickSource::Fixed(ticks) => ticks
                .iter()
                .map(|(value, label)| LabeledTick {
                    value: *value,
                    label: label.clone(),
                })
                .collect(),
            TickSource::Auto => {
                let (min, max) = self.bounds(axis).unwrap_or_else(|| {
                    (options.min.unwrap_or(0.0), options.max.unwrap_or(1.0))
                });
                Linear::new(min, max)
                    .major_ticks()
                    .into_iter()
                    .map(|value| LabeledTick {
                        value,
                        label: options.format_tick(value),
                    })
                    .collect()
            }
        }
    }

    /// Bounds of `axis` in axis coordinates, i.e. after its transform.
    ///
    /// `None` when the axis has neither explicit limits nor any data.
    pub fn axis_range(&self, axis: Axis) -> Option<(f64, f64)> {
        let transform = self.axis(axis).transform;
        self.bounds(axis)
            .map(|(min, max)| transform.apply_range(min, max))
    }

    // Explicit limits win over the data range, one end at a time.
    fn bounds(&self, axis: Axis) -> Option<(f64, f64)> {
        let options = self.axis(axis);
        match (options.min, options.max) {
            (Some(min), Some(max)) => Some((min, max)),
            (min, max) => self
                .data_range(axis)
                .map(|(lo, hi)| (min.unwrap_or(lo), max.unwrap_or(hi))),
        }
    }

    /// Final `(x, y)` coordinates of a series after its axis transforms.
    pub fn projected_points(&self, series: usize) -> Vec<PlotPoint> {
        let Some(series) = self.series.get(series) else {
            return Vec::new();
        };
        let xaxis = self.options.xaxis.transform;
        let yaxis = self.options.yaxis.transform;
        series
            .datapoints
            .iter()
            .filter(|point| point.len() >= 2)
            .map(|point| PlotPoint::new(point[0], point[1]).transformed(xaxis, yaxis))
            .collect()
    }
}
