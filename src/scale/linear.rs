use super::{Scale, Tick, TickIter, util};
use num_traits::Float;

/// Linear axis between `min` and `max` with "nice" major and minor ticks.
///
/// The horizontal axis of a ratio plot is a `Linear` over
/// `[-extent, extent]`; its major ticks sit at round log2 values and are
/// later labelled as fold changes.
///
/// # Examples
///
/// ```rust
/// use forhold::scale::Linear;
///
/// let scale = Linear::new(-2.0f64, 2.0);
/// assert_eq!(scale.major_ticks(), vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linear<D: Float> {
    min: D,
    max: D,
}

// Upper bound on generated minor ticks for a single axis.
const MAX_MINOR_TICKS: usize = 100_000;

fn lit<D: Float>(value: f64) -> D {
    D::from(value).unwrap_or_else(D::nan)
}

/// Smallest of 1, 2, 5 or 10 times a power of ten that is at least `raw_step`.
fn nice_step<D: Float>(raw_step: D) -> D {
    let ten = lit::<D>(10.0);
    let target = raw_step.abs();

    let mut decade = D::one();
    while decade * ten < target {
        decade = decade * ten;
    }
    while decade > target * ten {
        decade = decade / ten;
    }

    [1.0, 2.0, 5.0]
        .into_iter()
        .map(|factor| decade * lit(factor))
        .find(|candidate| *candidate >= target)
        .unwrap_or(decade * ten)
}

/// Walks `[min, max]` in minor steps of a tenth of the major step.
///
/// Every tenth minor tick, counted from a major-aligned start, is a major
/// tick. Ends snap onto the domain when within one minor step of it.
fn linear_ticks<D: Float>(min: D, max: D) -> Vec<Tick<D>> {
    if min == max || !(max - min).is_finite() {
        return vec![Tick { value: min, level: 0 }];
    }

    let (lo, hi) = util::sorted_pair(min, max);
    let ten = lit::<D>(10.0);
    let major = nice_step((hi - lo) / ten);
    let minor = major / ten;
    let first = (lo / major).floor() * major;
    if minor == D::zero() {
        return vec![Tick { value: first, level: 0 }];
    }
    let epsilon = util::epsilon_from_step(&major);
    let last = (hi / major).ceil() * major + epsilon;

    let mut ticks: Vec<Tick<D>> = Vec::new();
    for index in 0..MAX_MINOR_TICKS {
        // Index-based to avoid accumulating rounding error.
        let raw = first + minor * lit(index as f64);
        if raw.is_nan() || raw > last {
            break;
        }

        let value = if raw < lo {
            if lo - raw > epsilon {
                continue;
            }
            lo
        } else if raw > hi {
            if raw - hi > epsilon {
                break;
            }
            hi
        } else {
            raw
        };

        if ticks.last().is_some_and(|tick| tick.value == value) {
            continue;
        }
        ticks.push(Tick {
            value,
            level: u8::from(index % 10 != 0),
        });
    }
    ticks
}

impl<D: Float + 'static> Linear<D> {
    /// Creates a linear scale over `[min, max]`, kept exactly as given.
    pub fn new(min: D, max: D) -> Self {
        Self { min, max }
    }

    /// Returns the level-0 tick values only.
    pub fn major_ticks(&self) -> Vec<D> {
        self.tick_iter()
            .filter(|tick| tick.level == 0)
            .map(|tick| tick.value)
            .collect()
    }
}

impl<D: Float + 'static> Scale for Linear<D> {
    type Domain = D;

    fn tick_iter(&self) -> TickIter<D> {
        TickIter::new(linear_ticks(self.min, self.max).into_iter())
    }
}
