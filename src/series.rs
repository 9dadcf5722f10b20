//! Series descriptors and their datapoint buffers.

use serde::{Deserialize, Serialize};

use crate::options::{BarOptions, LineOptions, PointOptions, RatioOptions};

/// One cell of a raw data row: a number or a category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Label(String),
}

impl Cell {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            Cell::Label(_) => None,
        }
    }

    /// Text shown when the cell is used as a category label.
    pub fn to_label(&self) -> String {
        match self {
            Cell::Number(value) => format!("{value}"),
            Cell::Label(label) => label.clone(),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Label(value.to_owned())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Label(value)
    }
}

/// A raw data row as supplied by the caller.
pub type Row = Vec<Cell>;

/// Role of one field in a flattened datapoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointField {
    X,
    Y,
    /// Base of a bar, measured along the value axis.
    Bottom,
    /// Half-width of an x error bar.
    Xerr,
}

impl PointField {
    pub fn required(self) -> bool {
        matches!(self, PointField::X | PointField::Y)
    }

    /// Value used when a row does not supply this field.
    pub fn default_value(self) -> f64 {
        match self {
            PointField::X | PointField::Y => f64::NAN,
            PointField::Bottom | PointField::Xerr => 0.0,
        }
    }
}

/// Flattened numeric coordinates, `format.len()` values per point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Datapoints {
    pub format: Vec<PointField>,
    pub points: Vec<f64>,
}

impl Datapoints {
    /// Number of values per point.
    pub fn stride(&self) -> usize {
        self.format.len()
    }

    pub fn len(&self) -> usize {
        match self.stride() {
            0 => 0,
            stride => self.points.len() / stride,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the points as slices of `stride()` values.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.points.chunks_exact(self.stride().max(1))
    }
}

/// A series handed to the host engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Series {
    pub data: Vec<Row>,
    #[serde(skip_serializing_if = "Datapoints::is_empty")]
    pub datapoints: Datapoints,
    pub color: Option<String>,
    pub ratio: RatioOptions,
    pub bars: BarOptions,
    pub points: PointOptions,
    pub lines: LineOptions,
}

impl Series {
    pub fn new(data: Vec<Row>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_owned());
        self
    }

    pub fn with_ratio(mut self, ratio: RatioOptions) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn is_ratio(&self) -> bool {
        self.ratio.show
    }

    /// Point format the host extracts for this series.
    pub fn point_format(&self) -> Vec<PointField> {
        let mut format = vec![PointField::X, PointField::Y];
        if self.bars.show {
            format.push(PointField::Bottom);
        }
        if self.points.has_x_errors() {
            format.push(PointField::Xerr);
        }
        format
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ErrorBarOptions, ErrorBars};

    #[test]
    fn test_cells_serialize_as_plain_values() {
        let row: Row = vec!["fib".into(), 10.0.into(), 20.0.into()];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"["fib",10.0,20.0]"#);
    }

    #[test]
    fn test_cell_labels() {
        assert_eq!(Cell::from("a").to_label(), "a");
        assert_eq!(Cell::from(3usize).to_label(), "3");
        assert_eq!(Cell::from("a").as_number(), None);
    }

    #[test]
    fn test_point_format_follows_display_options() {
        let mut series = Series::new(Vec::new());
        assert_eq!(series.point_format().len(), 2);

        series.bars.show = true;
        assert_eq!(series.point_format()[2], PointField::Bottom);

        series.bars.show = false;
        series.points.errorbars = Some(ErrorBars::X);
        series.points.xerr = ErrorBarOptions { show: true };
        assert_eq!(series.point_format()[2], PointField::Xerr);
    }

    #[test]
    fn test_datapoints_chunk_by_stride() {
        let datapoints = Datapoints {
            format: vec![PointField::X, PointField::Y, PointField::Bottom],
            points: vec![0.0, 1.0, 0.0, 1.0, -1.0, 0.0],
        };
        assert_eq!(datapoints.len(), 2);
        let chunks: Vec<&[f64]> = datapoints.iter().collect();
        assert_eq!(chunks[1], &[1.0, -1.0, 0.0]);
    }
}
