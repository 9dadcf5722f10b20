//! Scales generate the tick positions of an axis.
//!
//! The ratio plot only needs a linear scale: log2 ratios are already on a
//! logarithmic footing, so the horizontal axis is laid out linearly between
//! `[-extent, extent]` and its labels are rewritten as fold changes.

pub mod linear;
mod tick_iter;
pub(crate) mod util;

pub use linear::Linear;
pub use tick_iter::TickIter;

use serde::Serialize;

/// A tick mark produced by a scale.
///
/// `level` 0 is a major tick, higher levels are progressively finer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tick<D> {
    pub value: D,
    pub level: u8,
}

/// A source of axis ticks over a domain.
pub trait Scale {
    type Domain;

    fn tick_iter(&self) -> TickIter<Self::Domain>;
}
