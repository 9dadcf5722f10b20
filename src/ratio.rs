//! The ratio transform.
//!
//! Turns `[label, baseline, target]` rows into horizontal bars whose length
//! is `log2(baseline / target)`. The work happens in three stages, matching
//! the host pipeline:
//!
//! 1. [`configure_axes`]: switch ratio series to centred horizontal bars,
//!    label the horizontal axis in fold changes, negate the vertical axis and
//!    bind its ticks to the category list.
//! 2. [`transform_series`]: collapse rows to `[index, log2 ratio]`, fix the
//!    symmetric horizontal extent, install the mean and zero markings and
//!    move row labels into the category ticks.
//! 3. [`reorder_points`]: swap the leading `(category, ratio)` pair of every
//!    extracted point so the bar routine sees `(ratio, category)`.
//!
//! # Examples
//!
//! ```rust
//! use forhold::{ChartContext, ChartOptions, RatioOptions, Series, ratio};
//!
//! let series = Series::new(vec![
//!     vec!["A".into(), 10.0.into(), 20.0.into()],
//!     vec!["B".into(), 10.0.into(), 5.0.into()],
//! ])
//! .with_ratio(RatioOptions::enabled());
//!
//! let ctx = ChartContext::new(ChartOptions::default(), vec![series]);
//! let ctx = ratio::configure_axes(ctx);
//! let ctx = ratio::transform_series(ctx, 0).unwrap();
//!
//! assert_eq!(ctx.options.xaxis.min, Some(-1.0));
//! assert_eq!(ctx.options.xaxis.max, Some(1.0));
//! assert_eq!(ctx.category_ticks[1].label, "B");
//! ```

use tracing::{debug, trace};

use crate::context::{CategoryTick, ChartContext};
use crate::error::{ConfigError, Result, Side, check_mean};
use crate::format::fold_change_formatter;
use crate::options::{
    BarAlign, BarOptions, MEAN_MARKING_COLOR, Marking, TickSource, ZERO_MARKING_COLOR,
};
use crate::plugin::{HookSet, PluginDescriptor};
use crate::series::{Cell, Row};
use crate::transform::AxisTransform;

/// Registration entry for the host registry.
pub const PLUGIN: PluginDescriptor = PluginDescriptor {
    name: "ratio",
    version: "0.0.1",
    init,
};

/// Smallest half-width of the horizontal axis.
pub const MIN_EXTENT: f64 = 1.0;

fn init(hooks: &mut HookSet) {
    hooks.process_options.push(process_options);
}

fn process_options(ctx: ChartContext, hooks: &mut HookSet) -> Result<ChartContext> {
    if !ctx.has_ratio_series() {
        return Ok(ctx);
    }
    let ctx = configure_axes(ctx);
    hooks.process_raw_data.push(transform_series);
    hooks
        .process_datapoints
        .push(|ctx, index| Ok(reorder_points(ctx, index)));
    Ok(ctx)
}

/// `log2(baseline / target)`.
pub fn log2_ratio(baseline: f64, target: f64) -> f64 {
    (baseline / target).log2()
}

/// Largest absolute value, but never below [`MIN_EXTENT`].
pub fn axis_extent(values: &[f64]) -> f64 {
    values
        .iter()
        .fold(MIN_EXTENT, |extent, value| extent.max(value.abs()))
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean_log2_ratio(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Half-width of the error bar on `log2(baseline / target)`.
///
/// First-order Gaussian propagation for a ratio of independent means:
/// `sqrt((sb / b)^2 + (st / t)^2) / ln 2`.
///
/// ```
/// let err = forhold::ratio::propagated_error(100.0, 10.0, 100.0, 20.0);
/// assert!((err - 0.3226).abs() < 1e-4);
/// ```
pub fn propagated_error(
    baseline_mean: f64,
    baseline_std_dev: f64,
    target_mean: f64,
    target_std_dev: f64,
) -> f64 {
    let rel_baseline = baseline_std_dev / baseline_mean;
    let rel_target = target_std_dev / target_mean;
    rel_baseline.hypot(rel_target) / std::f64::consts::LN_2
}

/// Swaps the first two values of every `stride`-sized point in place.
///
/// Applying it twice with the same stride restores the input. Strides below
/// two leave the buffer untouched, as does a trailing partial point.
pub fn swap_leading_pair(points: &mut [f64], stride: usize) {
    if stride < 2 {
        return;
    }
    for point in points.chunks_exact_mut(stride) {
        point.swap(0, 1);
    }
}

/// Reference lines: the mean log2 ratio (when there is one) and zero.
pub fn reference_markings(ratios: &[f64]) -> Vec<Marking> {
    let mut markings = Vec::with_capacity(2);
    if let Some(mean) = mean_log2_ratio(ratios) {
        markings.push(Marking::vertical_line(mean, MEAN_MARKING_COLOR));
    }
    markings.push(Marking::vertical_line(0.0, ZERO_MARKING_COLOR));
    markings
}

/// Option stage: prepares bars and axes for every ratio series.
///
/// A chart without ratio series is returned unchanged.
pub fn configure_axes(mut ctx: ChartContext) -> ChartContext {
    if !ctx.has_ratio_series() {
        return ctx;
    }

    for series in ctx.series.iter_mut().filter(|s| s.is_ratio()) {
        series.bars = BarOptions {
            show: true,
            horizontal: true,
            align: BarAlign::Center,
            fill: 1.0,
            bar_width: series.ratio.bar_width(),
        };
    }

    let xaxis = &mut ctx.options.xaxis;
    xaxis.tick_formatter = Some(fold_change_formatter(xaxis.tick_formatter.take()));

    let yaxis = &mut ctx.options.yaxis;
    yaxis.transform = AxisTransform::Negate;
    yaxis.ticks = TickSource::Categories;

    ctx.category_ticks.clear();

    debug!(target: "forhold::ratio", series = ctx.series.len(), "axes configured");
    ctx
}

fn row_value(row: &Row, index: usize, column: usize, side: Side) -> Result<f64> {
    let value = row.get(column).and_then(Cell::as_number).unwrap_or(f64::NAN);
    check_mean(index, side, value)
}

/// Raw-data stage: collapses one ratio series to `[index, log2 ratio]` rows.
///
/// Every row is validated before anything is changed, so an error leaves no
/// partial state behind. Series without ratio display pass through.
///
/// With several ratio series on one chart, each appends its labels to
/// `category_ticks` with positions starting again at 0, and each overwrites
/// the horizontal extent and the markings, so the last series processed
/// decides both.
pub fn transform_series(mut ctx: ChartContext, index: usize) -> Result<ChartContext> {
    let Some(series) = ctx.series.get(index) else {
        return Ok(ctx);
    };
    if !series.is_ratio() {
        return Ok(ctx);
    }

    let mut labels = Vec::with_capacity(series.data.len());
    let mut ratios = Vec::with_capacity(series.data.len());
    for (i, row) in series.data.iter().enumerate() {
        if row.len() < 3 {
            return Err(ConfigError::ShapeMismatch {
                field: "ratio row",
                expected: 3,
                actual: row.len(),
            });
        }
        let baseline = row_value(row, i, 1, Side::Baseline)?;
        let target = row_value(row, i, 2, Side::Target)?;
        labels.push(row[0].to_label());
        ratios.push(log2_ratio(baseline, target));
    }

    let extent = axis_extent(&ratios);
    ctx.options.xaxis.min = Some(-extent);
    ctx.options.xaxis.max = Some(extent);

    // Replaces any markings the caller configured.
    ctx.options.grid.markings = reference_markings(&ratios);

    for (position, label) in labels.into_iter().enumerate() {
        ctx.category_ticks.push(CategoryTick {
            index: position,
            label,
        });
    }

    ctx.series[index].data = ratios
        .iter()
        .enumerate()
        .map(|(position, ratio)| vec![Cell::from(position), Cell::Number(*ratio)])
        .collect();

    debug!(
        target: "forhold::ratio",
        series = index,
        rows = ratios.len(),
        extent,
        mean = ?mean_log2_ratio(&ratios),
        "series transformed"
    );
    Ok(ctx)
}

/// Datapoint stage: turns `(category, ratio, ...)` points into `(ratio, category, ...)`.
pub fn reorder_points(mut ctx: ChartContext, index: usize) -> ChartContext {
    let Some(series) = ctx.series.get_mut(index) else {
        return ctx;
    };
    if !series.is_ratio() {
        return ctx;
    }

    let stride = series.datapoints.stride();
    swap_leading_pair(&mut series.datapoints.points, stride);
    trace!(target: "forhold::ratio", series = index, stride, "points reordered");
    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::TickFormatter;
    use crate::options::{ChartOptions, RatioOptions};
    use crate::series::{Datapoints, PointField, Series};

    fn ratio_context(rows: Vec<Row>) -> ChartContext {
        let series = Series::new(rows).with_ratio(RatioOptions::enabled());
        ChartContext::new(ChartOptions::default(), vec![series])
    }

    fn row(label: &str, baseline: f64, target: f64) -> Row {
        vec![label.into(), baseline.into(), target.into()]
    }

    #[test]
    fn test_log2_ratio_matches_log_difference() {
        assert_eq!(log2_ratio(10.0, 20.0), -1.0);
        assert_eq!(log2_ratio(10.0, 5.0), 1.0);
        assert!((log2_ratio(3.0, 7.0) - (3.0f64.log2() - 7.0f64.log2())).abs() < 1e-12);
    }

    #[test]
    fn test_extent_has_a_floor_of_one() {
        assert_eq!(axis_extent(&[]), 1.0);
        assert_eq!(axis_extent(&[0.25, -0.5]), 1.0);
        assert_eq!(axis_extent(&[0.5, -3.0, 2.0]), 3.0);
    }

    #[test]
    fn test_mean_of_empty_is_none() {
        assert_eq!(mean_log2_ratio(&[]), None);
        assert_eq!(mean_log2_ratio(&[-1.0, 1.0, 3.0]), Some(1.0));
    }

    #[test]
    fn test_propagated_error_is_non_negative() {
        assert_eq!(propagated_error(5.0, 0.0, 8.0, 0.0), 0.0);
        assert!(propagated_error(5.0, -1.0, 8.0, -2.0) > 0.0);
    }

    #[test]
    fn test_swap_is_self_inverse() {
        let original = vec![0.0, 1.5, 0.0, 1.0, -2.0, 0.0, 7.0];
        let mut points = original.clone();
        swap_leading_pair(&mut points, 3);
        assert_eq!(&points[..6], &[1.5, 0.0, 0.0, -2.0, 1.0, 0.0]);
        assert_eq!(points[6], 7.0);
        swap_leading_pair(&mut points, 3);
        assert_eq!(points, original);
    }

    #[test]
    fn test_swap_ignores_short_strides() {
        let mut points = vec![1.0, 2.0];
        swap_leading_pair(&mut points, 1);
        assert_eq!(points, vec![1.0, 2.0]);
    }

    #[test]
    fn test_configure_axes_sets_bar_mode_and_axes() {
        let ctx = configure_axes(ratio_context(vec![row("a", 1.0, 2.0)]));
        let bars = ctx.series[0].bars;

        assert!(bars.show && bars.horizontal);
        assert_eq!(bars.align, BarAlign::Center);
        assert_eq!(bars.fill, 1.0);
        assert_eq!(bars.bar_width, 0.7);
        assert_eq!(ctx.options.yaxis.transform, AxisTransform::Negate);
        assert_eq!(ctx.options.yaxis.ticks, TickSource::Categories);
        assert_eq!(ctx.options.xaxis.format_tick(-1.0), "×2.0");
    }

    #[test]
    fn test_configure_axes_honours_custom_bar_width() {
        let series = Series::new(Vec::new()).with_ratio(RatioOptions {
            show: true,
            bar_width: Some(0.6),
        });
        let ctx = configure_axes(ChartContext::new(ChartOptions::default(), vec![series]));
        assert_eq!(ctx.series[0].bars.bar_width, 0.6);
    }

    #[test]
    fn test_configure_axes_wraps_existing_formatter() {
        let mut ctx = ratio_context(Vec::new());
        ctx.options.xaxis.tick_formatter = Some(TickFormatter::new(|v| format!("{v:.1}")));
        let ctx = configure_axes(ctx);
        assert_eq!(ctx.options.xaxis.format_tick(1.0), "×0.5");
    }

    #[test]
    fn test_configure_axes_without_ratio_series_is_noop() {
        let ctx = ChartContext::new(ChartOptions::default(), vec![Series::new(Vec::new())]);
        let ctx = configure_axes(ctx);
        assert!(!ctx.series[0].bars.show);
        assert_eq!(ctx.options.yaxis.transform, AxisTransform::Identity);
        assert!(ctx.options.xaxis.tick_formatter.is_none());
    }

    #[test]
    fn test_transform_series_collapses_rows() {
        let ctx = ratio_context(vec![row("A", 10.0, 20.0), row("B", 10.0, 5.0)]);
        let ctx = transform_series(ctx, 0).unwrap();

        assert_eq!(
            ctx.series[0].data,
            vec![
                vec![Cell::Number(0.0), Cell::Number(-1.0)],
                vec![Cell::Number(1.0), Cell::Number(1.0)],
            ]
        );
        assert_eq!(ctx.options.xaxis.min, Some(-1.0));
        assert_eq!(ctx.options.xaxis.max, Some(1.0));
        assert_eq!(ctx.category_ticks[0].label, "A");
        assert_eq!(ctx.category_ticks[1].index, 1);
    }

    #[test]
    fn test_transform_series_overwrites_markings() {
        let mut ctx = ratio_context(vec![row("A", 4.0, 1.0), row("B", 1.0, 1.0)]);
        ctx.options.grid.markings = vec![Marking::vertical_line(9.0, "#000")];

        let ctx = transform_series(ctx, 0).unwrap();
        let markings = &ctx.options.grid.markings;

        assert_eq!(markings.len(), 2);
        assert_eq!(markings[0].xaxis.from, 1.0);
        assert_eq!(markings[0].color, MEAN_MARKING_COLOR);
        assert_eq!(markings[1].xaxis.from, 0.0);
        assert_eq!(markings[1].color, ZERO_MARKING_COLOR);
        assert_eq!(ctx.options.xaxis.max, Some(2.0));
    }

    #[test]
    fn test_transform_series_with_no_rows_keeps_zero_marking() {
        let ctx = transform_series(ratio_context(Vec::new()), 0).unwrap();
        assert_eq!(ctx.options.grid.markings.len(), 1);
        assert_eq!(ctx.options.grid.markings[0].xaxis.from, 0.0);
        assert_eq!(ctx.options.xaxis.min, Some(-1.0));
    }

    #[test]
    fn test_transform_series_rejects_zero_target_without_side_effects() {
        let ctx = ratio_context(vec![row("A", 1.0, 1.0), row("B", 1.0, 0.0)]);
        let err = transform_series(ctx, 0).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositiveMean {
                index: 1,
                side: Side::Target,
                ..
            }
        ));
    }

    #[test]
    fn test_transform_series_rejects_short_rows_and_labels_in_value_cells() {
        let short = ratio_context(vec![vec!["A".into(), 1.0.into()]]);
        assert!(matches!(
            transform_series(short, 0).unwrap_err(),
            ConfigError::ShapeMismatch { expected: 3, actual: 2, .. }
        ));

        let labelled = ratio_context(vec![vec!["A".into(), "x".into(), 1.0.into()]]);
        assert!(matches!(
            transform_series(labelled, 0).unwrap_err(),
            ConfigError::NonPositiveMean {
                side: Side::Baseline,
                ..
            }
        ));
    }

    #[test]
    fn test_transform_series_skips_plain_series() {
        let series = Series::new(vec![row("A", 1.0, 2.0)]);
        let ctx = ChartContext::new(ChartOptions::default(), vec![series]);
        let ctx = transform_series(ctx, 0).unwrap();
        assert_eq!(ctx.series[0].data[0][0], Cell::from("A"));
        assert!(ctx.category_ticks.is_empty());
    }

    #[test]
    fn test_reorder_points_swaps_only_ratio_series() {
        let datapoints = Datapoints {
            format: vec![PointField::X, PointField::Y, PointField::Bottom],
            points: vec![0.0, -1.0, 0.0, 1.0, 1.0, 0.0],
        };
        let mut ratio = Series::new(Vec::new()).with_ratio(RatioOptions::enabled());
        ratio.datapoints = datapoints.clone();
        let mut plain = Series::new(Vec::new());
        plain.datapoints = datapoints.clone();

        let ctx = ChartContext::new(ChartOptions::default(), vec![ratio, plain]);
        let ctx = reorder_points(reorder_points(ctx, 0), 1);

        assert_eq!(
            ctx.series[0].datapoints.points,
            vec![-1.0, 0.0, 0.0, 1.0, 1.0, 0.0]
        );
        assert_eq!(ctx.series[1].datapoints, datapoints);
    }

    #[test]
    fn test_plugin_only_adds_series_hooks_for_ratio_charts() {
        let mut hooks = HookSet::default();
        let plain = ChartContext::new(ChartOptions::default(), vec![Series::new(Vec::new())]);
        process_options(plain, &mut hooks).unwrap();
        assert!(hooks.process_raw_data.is_empty());

        process_options(ratio_context(Vec::new()), &mut hooks).unwrap();
        assert_eq!(hooks.process_raw_data.len(), 1);
        assert_eq!(hooks.process_datapoints.len(), 1);
    }
}
