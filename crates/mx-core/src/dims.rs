use std::fmt;

/// Row/column extents of a 2D matrix stored in row-major order.
///
/// The flat index of cell `(row, col)` is `row * cols + col`, so the row
/// stride is always `cols`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dims {
    pub rows: usize,
    pub cols: usize,
}

impl Dims {
    pub fn new(rows: usize, cols: usize) -> Self {
        Dims { rows, cols }
    }

    /// Total number of cells.
    pub fn numel(&self) -> usize {
        self.rows * self.cols
    }

    /// Dimensions of the product `self @ rhs`.
    ///
    /// Does not check that `self.cols == rhs.rows`; callers validate that first.
    pub fn product(&self, rhs: &Dims) -> Dims {
        Dims::new(self.rows, rhs.cols)
    }

    /// Convert a flat row-major index into `(row, col)`.
    ///
    /// # Panics
    /// Panics if `cols == 0`.
    pub fn coords(&self, k: usize) -> (usize, usize) {
        (k / self.cols, k % self.cols)
    }

    /// Convert `(row, col)` into a flat row-major index.
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
