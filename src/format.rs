//! Tick label formatting.
//!
//! The horizontal axis of a ratio plot carries log2 values, but readers think
//! in fold changes. A tick at `v` is labelled `×` followed by `2^(-v)` with
//! two significant digits, so `-1` reads `×2.0` and `1` reads `×0.50`.

use std::fmt;
use std::sync::Arc;

/// Multiplication sign used in fold-change labels.
pub const TIMES: char = '×';

/// Significant digits shown in fold-change labels.
pub const FOLD_CHANGE_DIGITS: usize = 2;

/// A shareable tick label formatter.
#[derive(Clone)]
pub struct TickFormatter(Arc<dyn Fn(f64) -> String + Send + Sync>);

impl TickFormatter {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn format(&self, value: f64) -> String {
        (self.0)(value)
    }
}

impl fmt::Debug for TickFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TickFormatter(..)")
    }
}

/// Fold change shown for a log2 tick value.
pub fn fold_change(value: f64) -> f64 {
    (-value).exp2()
}

/// Builds the fold-change formatter, wrapping an optional earlier formatter.
///
/// The earlier formatter, if any, renders the fold-change number and the
/// multiplication sign is prepended to its output.
///
/// ```
/// use forhold::format::fold_change_formatter;
///
/// let fmt = fold_change_formatter(None);
/// assert_eq!(fmt.format(-1.0), "×2.0");
/// assert_eq!(fmt.format(0.0), "×1.0");
/// assert_eq!(fmt.format(1.0), "×0.50");
/// ```
pub fn fold_change_formatter(previous: Option<TickFormatter>) -> TickFormatter {
    TickFormatter::new(move |value| {
        let fold = fold_change(value);
        let number = match &previous {
            Some(inner) => inner.format(fold),
            None => to_precision(fold, FOLD_CHANGE_DIGITS),
        };
        format!("{TIMES}{number}")
    })
}

/// Formats `value` with `digits` significant digits.
///
/// Output follows ECMAScript `Number.prototype.toPrecision`: ties round
/// away from zero, fixed notation is used while the decimal exponent lies in
/// `[-6, digits)`, exponential notation with an explicit exponent sign
/// otherwise. At most 15 digits are honoured.
pub fn to_precision(value: f64, digits: usize) -> String {
    let digits = digits.clamp(1, 15);
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if value == 0.0 {
        return format!("{:.*}", digits - 1, 0.0);
    }

    let (significand, exponent) = round_significant(value.abs(), digits);
    let sign = if value < 0.0 { "-" } else { "" };

    if exponent < -6 || exponent >= digits as i32 {
        let (lead, rest) = significand.split_at(1);
        let point = if rest.is_empty() { "" } else { "." };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{sign}{lead}{point}{rest}e{exp_sign}{}", exponent.abs());
    }

    if exponent >= 0 {
        let (int, frac) = significand.split_at(exponent as usize + 1);
        if frac.is_empty() {
            format!("{sign}{int}")
        } else {
            format!("{sign}{int}.{frac}")
        }
    } else {
        let zeros = "0".repeat((-exponent - 1) as usize);
        format!("{sign}0.{zeros}{significand}")
    }
}

/// Rounds a positive finite `magnitude` to `digits` significant digits.
///
/// Returns the digits (exactly `digits` of them) and the decimal exponent of
/// the leading one.
fn round_significant(magnitude: f64, digits: usize) -> (String, i32) {
    let lower = 10f64.powi(digits as i32 - 1);
    let upper = lower * 10.0;
    // Multiply for non-negative shifts so ties such as 0.125 * 100 stay exact.
    let scaled = |exponent: i32| {
        let shift = digits as i32 - 1 - exponent;
        if shift > 300 {
            // Subnormal range: 10^shift alone would overflow.
            magnitude * 10f64.powi(shift / 2) * 10f64.powi(shift - shift / 2)
        } else if shift >= 0 {
            magnitude * 10f64.powi(shift)
        } else {
            magnitude / 10f64.powi(-shift)
        }
    };

    let mut exponent = magnitude.log10().floor() as i32;
    let mut mantissa = scaled(exponent);
    if mantissa >= upper {
        exponent += 1;
        mantissa = scaled(exponent);
    } else if mantissa < lower {
        exponent -= 1;
        mantissa = scaled(exponent);
    }

    // f64::round breaks ties away from zero.
    let mut rounded = mantissa.round();
    if rounded >= upper {
        rounded /= 10.0;
        exponent += 1;
    }
    (format!("{rounded:.0}"), exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_fixed_notation() {
        assert_eq!(to_precision(2.0, 2), "2.0");
        assert_eq!(to_precision(0.5, 2), "0.50");
        assert_eq!(to_precision(0.25, 2), "0.25");
        assert_eq!(to_precision(16.0, 2), "16");
        assert_eq!(to_precision(1.0 / 3.0, 2), "0.33");
        assert_eq!(to_precision(-4.0, 2), "-4.0");
    }

    #[test]
    fn test_precision_rounding_carries_into_exponent() {
        assert_eq!(to_precision(9.96, 2), "10");
        assert_eq!(to_precision(0.0996, 2), "0.10");
        assert_eq!(to_precision(999.6, 3), "1.00e+3");
    }

    #[test]
    fn test_precision_ties_round_away_from_zero() {
        assert_eq!(to_precision(0.125, 2), "0.13");
        assert_eq!(to_precision(0.0625, 2), "0.063");
        assert_eq!(to_precision(2.5, 1), "3");
        assert_eq!(to_precision(-0.125, 2), "-0.13");
    }

    #[test]
    fn test_fold_change_label_for_three_doublings_down() {
        assert_eq!(fold_change_formatter(None).format(3.0), "×0.13");
    }

    #[test]
    fn test_precision_exponential_notation() {
        assert_eq!(to_precision(128.0, 2), "1.3e+2");
        assert_eq!(to_precision(1024.0, 3), "1.02e+3");
        assert_eq!(to_precision(1.5e-7, 2), "1.5e-7");
    }

    #[test]
    fn test_precision_special_values() {
        assert_eq!(to_precision(0.0, 2), "0.0");
        assert_eq!(to_precision(f64::NAN, 2), "NaN");
        assert_eq!(to_precision(f64::INFINITY, 2), "Infinity");
        assert_eq!(to_precision(5e-324, 2), "4.9e-324");
    }

    #[test]
    fn test_fold_change_labels() {
        let fmt = fold_change_formatter(None);
        assert_eq!(fmt.format(-2.0), "×4.0");
        assert_eq!(fmt.format(-1.0), "×2.0");
        assert_eq!(fmt.format(0.0), "×1.0");
        assert_eq!(fmt.format(1.0), "×0.50");
        assert_eq!(fmt.format(2.0), "×0.25");
    }

    #[test]
    fn test_fold_change_wraps_previous_formatter() {
        let previous = TickFormatter::new(|v| format!("{v:.3}"));
        let fmt = fold_change_formatter(Some(previous));
        assert_eq!(fmt.format(-1.0), "×2.000");
    }
}
