//! Baseline/target comparison charts.
//!
//! Callers hand over parallel arrays: benchmark names, baseline means and
//! standard deviations, target means and standard deviations. The builder
//! validates them, emits the ratio series and, when both deviation arrays are
//! complete, a companion error-bar series. Error bars live in their own
//! marker-only series; inside the bar series the deviation would be read as
//! a second bar endpoint.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, Side, check_len, check_mean};
use crate::options::{
    ChartOptions, ERROR_BAR_COLOR, ErrorBarOptions, ErrorBars, LineOptions, PointOptions,
    RATIO_COLOR, RatioOptions,
};
use crate::plot::{Engine, Plot};
use crate::plugin::Registry;
use crate::ratio::{log2_ratio, propagated_error};
use crate::series::{Cell, Row, Series};

/// One benchmark measured on both sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub name: String,
    pub baseline_mean: f64,
    pub baseline_std_dev: Option<f64>,
    pub target_mean: f64,
    pub target_std_dev: Option<f64>,
}

impl BenchmarkRecord {
    pub fn log2_ratio(&self) -> f64 {
        log2_ratio(self.baseline_mean, self.target_mean)
    }

    /// Propagated uncertainty of [`Self::log2_ratio`], if both deviations are known.
    pub fn log2_ratio_error(&self) -> Option<f64> {
        Some(propagated_error(
            self.baseline_mean,
            self.baseline_std_dev?,
            self.target_mean,
            self.target_std_dev?,
        ))
    }

    fn raw_row(&self) -> Row {
        vec![
            Cell::from(self.name.as_str()),
            Cell::Number(self.baseline_mean),
            Cell::Number(self.target_mean),
        ]
    }
}

/// An error bar centred on a ratio bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorBarPoint {
    pub log2_ratio: f64,
    pub category: usize,
    pub error: f64,
}

impl ErrorBarPoint {
    fn row(&self) -> Row {
        vec![
            Cell::Number(self.log2_ratio),
            Cell::from(self.category),
            Cell::Number(self.error),
        ]
    }
}

/// Parallel input arrays; position `i` in each array belongs to benchmark `i`.
///
/// The deviation arrays are either both empty or both as long as `names`.
/// Any other combination drops the error bars without failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonInput {
    pub names: Vec<String>,
    pub base_means: Vec<f64>,
    pub base_std_devs: Vec<f64>,
    pub target_means: Vec<f64>,
    pub target_std_devs: Vec<f64>,
}

impl ComparisonInput {
    pub fn new<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        base_means: Vec<f64>,
        target_means: Vec<f64>,
    ) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            base_means,
            target_means,
            ..Self::default()
        }
    }

    pub fn with_std_devs(mut self, base_std_devs: Vec<f64>, target_std_devs: Vec<f64>) -> Self {
        self.base_std_devs = base_std_devs;
        self.target_std_devs = target_std_devs;
        self
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Checks array lengths and that every mean is positive and finite.
    pub fn validate(&self) -> Result<()> {
        let count = self.len();
        check_len("base_means", count, self.base_means.len())?;
        check_len("target_means", count, self.target_means.len())?;

        for (index, (&base, &target)) in self.base_means.iter().zip(&self.target_means).enumerate()
        {
            check_mean(index, Side::Baseline, base)?;
            check_mean(index, Side::Target, target)?;
        }
        Ok(())
    }

    /// True when both deviation arrays cover every benchmark.
    pub fn has_error_bars(&self) -> bool {
        let count = self.len();
        count > 0 && self.base_std_devs.len() == count && self.target_std_devs.len() == count
    }

    /// Validated records in input order.
    pub fn records(&self) -> Result<Vec<BenchmarkRecord>> {
        self.validate()?;
        let with_errors = self.has_error_bars();

        Ok((0..self.len())
            .map(|i| BenchmarkRecord {
                name: self.names[i].clone(),
                baseline_mean: self.base_means[i],
                baseline_std_dev: with_errors.then(|| self.base_std_devs[i]),
                target_mean: self.target_means[i],
                target_std_dev: with_errors.then(|| self.target_std_devs[i]),
            })
            .collect())
    }

    /// Error-bar points, or `None` when the deviations are incomplete.
    pub fn error_bars(&self) -> Result<Option<Vec<ErrorBarPoint>>> {
        let records = self.records()?;
        Ok(self.error_bars_for(&records))
    }

    /// The ratio series, followed by the error-bar series when available.
    pub fn build_series(&self) -> Result<Vec<Series>> {
        let records = self.records()?;
        let mut series = vec![ratio_series(&records)];
        if let Some(points) = self.error_bars_for(&records) {
            series.push(error_bar_series(&points));
        }

        debug!(
            target: "forhold::compare",
            benchmarks = records.len(),
            error_bars = series.len() > 1,
            "comparison series built"
        );
        Ok(series)
    }

    // `records` must come from `self.records()`.
    fn error_bars_for(&self, records: &[BenchmarkRecord]) -> Option<Vec<ErrorBarPoint>> {
        if !self.has_error_bars() {
            let (base, target) = (self.base_std_devs.len(), self.target_std_devs.len());
            if base != 0 || target != 0 {
                warn!(
                    target: "forhold::compare",
                    benchmarks = self.len(),
                    base_std_devs = base,
                    target_std_devs = target,
                    "std dev arrays do not match benchmarks, error bars disabled"
                );
            }
            return None;
        }

        Some(
            records
                .iter()
                .enumerate()
                .filter_map(|(category, record)| {
                    Some(ErrorBarPoint {
                        log2_ratio: record.log2_ratio(),
                        category,
                        error: record.log2_ratio_error()?,
                    })
                })
                .collect(),
        )
    }
}

/// Raw `[name, baseline, target]` rows with ratio display on.
pub fn ratio_series(records: &[BenchmarkRecord]) -> Series {
    Series::new(records.iter().map(BenchmarkRecord::raw_row).collect())
        .with_ratio(RatioOptions::enabled())
        .with_color(RATIO_COLOR)
}

/// Marker-only series drawing horizontal error bars.
pub fn error_bar_series(points: &[ErrorBarPoint]) -> Series {
    let mut series = Series::new(points.iter().map(ErrorBarPoint::row).collect())
        .with_color(ERROR_BAR_COLOR);
    series.points = PointOptions {
        show: true,
        radius: 0.0,
        errorbars: Some(ErrorBars::X),
        xerr: ErrorBarOptions { show: true },
        line_width: 1.0,
        shadow_size: 0.0,
    };
    series.lines = LineOptions { show: false };
    series
}

/// Validates `input`, builds its series and draws them with `engine`.
///
/// ```
/// use forhold::{ComparisonInput, JsonEngine, compare};
///
/// let input = ComparisonInput::new(["A", "B"], vec![10.0, 10.0], vec![20.0, 5.0]);
/// let mut engine = JsonEngine::new();
/// compare::render(&mut engine, "#chart", &input).unwrap();
///
/// let chart = engine.chart("#chart").unwrap();
/// assert_eq!(chart["options"]["xaxis"]["max"], 1.0);
/// ```
pub fn render<E: Engine>(engine: &mut E, container: &str, input: &ComparisonInput) -> Result<()> {
    let series = input.build_series()?;
    let registry = Registry::with_defaults();
    Plot::new(&registry).render(engine, container, series, ChartOptions::default())
}
