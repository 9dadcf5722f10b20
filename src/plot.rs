//! Host pipeline and rendering engine boundary.
//!
//! [`Plot`] drives the fixed three-stage extension pipeline: option hooks,
//! then per series raw-data hooks, datapoint extraction and datapoint hooks.
//! The finished [`ChartContext`] goes to an [`Engine`], which owns all
//! drawing.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::context::{Axis, CategoryTick, ChartContext, LabeledTick};
use crate::error::Result;
use crate::options::ChartOptions;
use crate::plugin::Registry;
use crate::series::{Cell, Datapoints, Series};

/// The external renderer.
pub trait Engine {
    /// Draws a prepared chart into `container`.
    fn draw(&mut self, container: &str, chart: &ChartContext) -> Result<()>;
}

/// Runs registered plugins over a chart.
#[derive(Debug, Clone, Copy)]
pub struct Plot<'r> {
    registry: &'r Registry,
}

impl<'r> Plot<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Runs every pipeline stage and returns the chart ready for drawing.
    pub fn prepare(&self, series: Vec<Series>, options: ChartOptions) -> Result<ChartContext> {
        let mut hooks = self.registry.hooks();
        let mut ctx = ChartContext::new(options, series);

        // Option hooks may append hooks of any kind, including more option hooks.
        let mut next = 0;
        while let Some(hook) = hooks.process_options.get(next).copied() {
            ctx = hook(ctx, &mut hooks)?;
            next += 1;
        }

        for index in 0..ctx.series.len() {
            for hook in &hooks.process_raw_data {
                ctx = hook(ctx, index)?;
            }
            ctx.series[index].datapoints = extract_datapoints(&ctx.series[index]);
            for hook in &hooks.process_datapoints {
                ctx = hook(ctx, index)?;
            }
        }

        debug!(
            target: "forhold::plot",
            series = ctx.series.len(),
            categories = ctx.category_ticks.len(),
            "chart prepared"
        );
        Ok(ctx)
    }

    pub fn render<E: Engine>(
        &self,
        engine: &mut E,
        container: &str,
        series: Vec<Series>,
        options: ChartOptions,
    ) -> Result<()> {
        let chart = self.prepare(series, options)?;
        engine.draw(container, &chart)
    }
}

/// Flattens raw rows into numeric datapoints following the series' point format.
///
/// Optional fields missing from a row take their default. Rows lacking a
/// numeric value for a required field are dropped.
pub fn extract_datapoints(series: &Series) -> Datapoints {
    let format = series.point_format();
    let mut points = Vec::with_capacity(series.data.len() * format.len());

    'rows: for (row_index, row) in series.data.iter().enumerate() {
        let start = points.len();
        for (column, field) in format.iter().enumerate() {
            let value = row
                .get(column)
                .and_then(Cell::as_number)
                .unwrap_or(field.default_value());
            if field.required() && !value.is_finite() {
                trace!(target: "forhold::plot", row = row_index, ?field, "row dropped");
                points.truncate(start);
                continue 'rows;
            }
            points.push(value);
        }
    }

    Datapoints { format, points }
}

/// The configuration object handed to a JSON-driven engine.
#[derive(Debug, Serialize)]
pub struct RenderedChart<'a> {
    pub series: &'a [Series],
    pub options: &'a ChartOptions,
    pub category_ticks: &'a [CategoryTick],
    pub xticks: Vec<LabeledTick>,
    pub yticks: Vec<LabeledTick>,
    /// Axis bounds after the axis transform, as the engine lays them out.
    pub xrange: Option<(f64, f64)>,
    pub yrange: Option<(f64, f64)>,
}

impl<'a> RenderedChart<'a> {
    pub fn new(chart: &'a ChartContext) -> Self {
        Self {
            series: &chart.series,
            options: &chart.options,
            category_ticks: &chart.category_ticks,
            xticks: chart.axis_ticks(Axis::X),
            yticks: chart.axis_ticks(Axis::Y),
            xrange: chart.axis_range(Axis::X),
            yrange: chart.axis_range(Axis::Y),
        }
    }
}

/// Engine that records each chart as JSON, keyed by container.
#[derive(Debug, Default)]
pub struct JsonEngine {
    charts: BTreeMap<String, serde_json::Value>,
}

impl JsonEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chart(&self, container: &str) -> Option<&serde_json::Value> {
        self.charts.get(container)
    }

    pub fn containers(&self) -> impl Iterator<Item = &str> {
        self.charts.keys().map(String::as_str)
    }
}

impl Engine for JsonEngine {
    fn draw(&mut self, container: &str, chart: &ChartContext) -> Result<()> {
        let value = serde_json::to_value(RenderedChart::new(chart))?;
        self.charts.insert(container.to_owned(), value);
        Ok(())
    }
}
