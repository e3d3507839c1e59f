use std::fmt::Debug;

use crate::dims::Dims;

/// Read-only access to a 2D integer matrix.
///
/// Workers only ever read through this trait, so a single view can be
/// shared by reference across every worker thread without locking.
pub trait MatrixView: Send + Sync + Debug {
    /// Number of rows.
    fn rows(&self) -> usize;

    /// Number of columns.
    fn cols(&self) -> usize;

    /// Value at `(row, col)`.
    ///
    /// # Panics
    /// Implementations may panic when the coordinates are out of bounds.
    fn get(&self, row: usize, col: usize) -> i64;

    fn dims(&self) -> Dims {
        Dims::new(self.rows(), self.cols())
    }
}
