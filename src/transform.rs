//! Axis transforms applied between data coordinates and axis coordinates.
//!
//! A ratio plot keeps its categories at `0, 1, 2, ...` in data space, but the
//! host engine lays out a vertical axis bottom-up. Negating the vertical axis
//! puts the first category at the top, so rows read in input order.
//!
//! # Examples
//!
//! ```rust
//! use forhold::{AxisTransform, PlotPoint};
//!
//! let y = AxisTransform::Negate;
//! assert_eq!(y.apply(2.0), -2.0);
//! assert_eq!(y.apply_range(0.0, 4.0), (-4.0, 0.0));
//!
//! let p = PlotPoint::new(0.5, 3.0).transformed(AxisTransform::Identity, y);
//! assert_eq!(p, PlotPoint::new(0.5, -3.0));
//! ```

use serde::{Deserialize, Serialize};

/// A coordinate transform installed on an axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisTransform {
    /// Values are laid out as given.
    #[default]
    Identity,
    /// `v -> -v`.
    Negate,
}

impl AxisTransform {
    /// Maps a data coordinate to an axis coordinate.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            AxisTransform::Identity => value,
            AxisTransform::Negate => -value,
        }
    }

    /// Applies the transform to both ends of a range, keeping `(min, max)` ordering.
    pub fn apply_range(self, min: f64, max: f64) -> (f64, f64) {
        crate::scale::util::sorted_pair(self.apply(min), self.apply(max))
    }
}

/// A point in plot/chart coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint<D = f64> {
    /// X coordinate in domain units.
    pub x: D,
    /// Y coordinate in domain units.
    pub y: D,
}

impl<D> PlotPoint<D> {
    /// Creates a new plot point at the given data coordinates.
    pub const fn new(x: D, y: D) -> Self {
        Self { x, y }
    }
}

impl PlotPoint<f64> {
    /// Returns the point with each coordinate passed through its axis transform.
    pub fn transformed(self, x: AxisTransform, y: AxisTransform) -> Self {
        Self::new(x.apply(self.x), y.apply(self.y))
    }
}
