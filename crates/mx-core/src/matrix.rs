use crate::dims::Dims;
use crate::error::{MatrixError, Result};
use crate::view::MatrixView;

/// An immutable, row-major integer matrix.
///
/// Built once from parsed input (or from a completed result buffer) and
/// read-only afterwards. Always has at least one row and one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    data: Vec<i64>,
    dims: Dims,
}

impl Matrix {
    /// Create a matrix from row-major data.
    ///
    /// # Errors
    /// Returns `EmptyMatrix` if either dimension is zero and `ShapeMismatch`
    /// if `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<i64>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::EmptyMatrix { rows, cols });
        }
        let dims = Dims::new(rows, cols);
        if data.len() != dims.numel() {
            return Err(MatrixError::ShapeMismatch {
                rows,
                cols,
                expected: dims.numel(),
                got: data.len(),
            });
        }
        Ok(Matrix { data, dims })
    }

    /// Create a matrix from a list of rows.
    ///
    /// Every row must have the same length as the first one.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(MatrixError::RaggedRow {
                    row: i,
                    expected: n_cols,
                    got: row.len(),
                });
            }
            data.extend(row);
        }
        Matrix::new(n_rows, n_cols, data)
    }

    /// The `n x n` identity matrix.
    ///
    /// # Panics
    /// Panics if `n == 0`.
    pub fn identity(n: usize) -> Self {
        assert!(n > 0, "identity matrix needs n >= 1");
        let mut data = vec![0; n * n];
        for i in 0..n {
            data[i * n + i] = 1;
        }
        Matrix {
            data,
            dims: Dims::new(n, n),
        }
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Borrow row `r` as a slice.
    ///
    /// # Panics
    /// Panics if `r >= rows`.
    pub fn row(&self, r: usize) -> &[i64] {
        let start = r * self.dims.cols;
        &self.data[start..start + self.dims.cols]
    }

    /// Iterate over the rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[i64]> {
        self.data.chunks_exact(self.dims.cols)
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<i64> {
        self.data
    }
}

impl MatrixView for Matrix {
    fn rows(&self) -> usize {
        self.dims.rows
    }

    fn cols(&self) -> usize {
        self.dims.cols
    }

    fn get(&self, row: usize, col: usize) -> i64 {
        assert!(
            row < self.dims.rows && col < self.dims.cols,
            "index ({}, {}) out of bounds for {} matrix",
            row,
            col,
            self.dims
        );
        self.data[self.dims.offset(row, col)]
    }

    fn dims(&self) -> Dims {
        self.dims
    }
}
