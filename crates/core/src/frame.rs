//! Labeled two-dimensional grids.
//!
//! A `Frame` is an [time, security] grid of `f64` values with a row label per
//! time step and a column label per security. Every grid a caller supplies
//! (prices, sizes, auxiliary data) enters the system through this type, so
//! label validation happens in one place and before any simulation starts.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::TimestampMs;

/// A two-dimensional value grid with time-row and security-column labels.
///
/// Rows are ordered and meaningful (simulation proceeds row by row); column
/// order is preserved but carries no semantics beyond positional access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    index: Vec<TimestampMs>,
    columns: Vec<String>,
    values: Array2<f64>,
}

impl Frame {
    /// Create a frame, checking that the value grid matches the labels.
    pub fn new(
        index: Vec<TimestampMs>,
        columns: Vec<String>,
        values: Array2<f64>,
    ) -> Result<Self> {
        if values.nrows() != index.len() {
            return Err(Error::shape(format!(
                "{} rows of values for {} index labels",
                values.nrows(),
                index.len()
            )));
        }
        if values.ncols() != columns.len() {
            return Err(Error::shape(format!(
                "{} columns of values for {} column labels",
                values.ncols(),
                columns.len()
            )));
        }
        Ok(Self {
            index,
            columns,
            values,
        })
    }

    /// Create a frame filled with a constant value.
    pub fn filled(index: Vec<TimestampMs>, columns: Vec<String>, fill: f64) -> Self {
        let values = Array2::from_elem((index.len(), columns.len()), fill);
        Self {
            index,
            columns,
            values,
        }
    }

    /// Create a single-column frame from a per-step series.
    pub fn single(
        index: Vec<TimestampMs>,
        name: impl Into<String>,
        values: Array1<f64>,
    ) -> Result<Self> {
        Self::new(index, vec![name.into()], values.insert_axis(Axis(1)))
    }

    /// Row labels (time index).
    pub fn index(&self) -> &[TimestampMs] {
        &self.index
    }

    /// Column labels (securities).
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// View of the full value grid.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Grid shape as (steps, securities).
    pub fn shape(&self) -> (usize, usize) {
        (self.values.nrows(), self.values.ncols())
    }

    /// One time step's values.
    pub fn row(&self, step: usize) -> ArrayView1<'_, f64> {
        self.values.row(step)
    }

    /// Validate this frame against canonical labels and return its raw values.
    ///
    /// Both label sets must match exactly: same values, same order. On
    /// mismatch the frame is rejected and nothing is stored. Label metadata is
    /// dropped on success; downstream access is positional.
    pub fn conform(
        self,
        index: &[TimestampMs],
        columns: &[String],
    ) -> Result<Array2<f64>> {
        if self.index != index {
            return Err(Error::index_mismatch(
                "row labels do not match the canonical time index",
            ));
        }
        if self.columns != columns {
            return Err(Error::column_mismatch(
                "column labels do not match the canonical security set",
            ));
        }
        Ok(self.values)
    }

    /// Consume the frame, dropping labels.
    pub fn into_values(self) -> Array2<f64> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn make_frame() -> Frame {
        Frame::new(
            vec![1000, 2000, 3000],
            vec!["AAA".to_string(), "BBB".to_string()],
            array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_new_checks_shape() {
        let bad_rows = Frame::new(
            vec![1000, 2000],
            vec!["AAA".to_string()],
            array![[1.0], [2.0], [3.0]],
        );
        assert!(matches!(bad_rows, Err(Error::Shape(_))));

        let bad_cols = Frame::new(
            vec![1000],
            vec!["AAA".to_string(), "BBB".to_string()],
            array![[1.0]],
        );
        assert!(matches!(bad_cols, Err(Error::Shape(_))));
    }

    #[test]
    fn test_row_access() {
        let frame = make_frame();
        assert_eq!(frame.shape(), (3, 2));
        assert_eq!(frame.row(1)[0], 3.0);
        assert_eq!(frame.index()[2], 3000);
    }

    #[test]
    fn test_filled() {
        let frame = Frame::filled(vec![1, 2], vec!["AAA".to_string()], 7.5);
        assert_eq!(frame.shape(), (2, 1));
        assert!(frame.values().iter().all(|&v| v == 7.5));
    }

    #[test]
    fn test_single_column() {
        let frame =
            Frame::single(vec![1, 2, 3], "cash", array![10.0, 20.0, 30.0]).unwrap();
        assert_eq!(frame.columns(), ["cash".to_string()]);
        assert_eq!(frame.row(2)[0], 30.0);
    }

    #[test]
    fn test_conform_accepts_matching_labels() {
        let frame = make_frame();
        let values = frame
            .conform(&[1000, 2000, 3000], &["AAA".to_string(), "BBB".to_string()])
            .unwrap();
        assert_eq!(values[[0, 1]], 2.0);
    }

    #[test]
    fn test_conform_rejects_wrong_index() {
        let frame = make_frame();
        let res = frame.conform(&[1000, 2000, 9999], &["AAA".to_string(), "BBB".to_string()]);
        assert!(matches!(res, Err(Error::IndexMismatch(_))));
    }

    #[test]
    fn test_conform_rejects_reordered_columns() {
        let frame = make_frame();
        // Same labels, different order: still a mismatch.
        let res = frame.conform(&[1000, 2000, 3000], &["BBB".to_string(), "AAA".to_string()]);
        assert!(matches!(res, Err(Error::ColumnMismatch(_))));
    }
}
