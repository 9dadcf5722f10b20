//! Configuration errors raised before any ratio transform runs.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which side of a baseline/target pair a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Baseline,
    Target,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Baseline => f.write_str("baseline"),
            Side::Target => f.write_str("target"),
        }
    }
}

/// Error type for chart configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Parallel inputs (or a raw row) do not have the expected length.
    #[error("shape mismatch in {field}: expected {expected}, got {actual}")]
    ShapeMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A mean is zero, negative or not finite, so its log2 ratio is undefined.
    #[error("{side} mean at index {index} must be positive and finite, got {value}")]
    NonPositiveMean { index: usize, side: Side, value: f64 },

    /// Two plugins were registered under the same name.
    #[error("plugin '{name}' is already registered")]
    DuplicatePlugin { name: &'static str },

    /// Options could not be parsed from, or written to, JSON.
    #[error("options JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for chart configuration.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Checks that a mean can be used as one half of a log2 ratio.
pub(crate) fn check_mean(index: usize, side: Side, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositiveMean { index, side, value })
    }
}

/// Checks the length of one parallel array against the reference length.
pub(crate) fn check_len(field: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(ConfigError::ShapeMismatch {
            field,
            expected,
            actual,
        })
    }
}
