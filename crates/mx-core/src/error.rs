use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("dimension mismatch: [{a_rows}x{a_cols}] @ [{b_rows}x{b_cols}] (A columns must equal B rows)")]
    DimensionMismatch {
        a_rows: usize,
        a_cols: usize,
        b_rows: usize,
        b_cols: usize,
    },
    #[error("invalid worker count {got}: must be between 1 and {max} (inclusive)")]
    InvalidWorkerCount { got: usize, max: usize },
    #[error("worker {id} failed: {reason}")]
    WorkerFailed { id: usize, reason: String },
    #[error("timed out after {after:?}; unfinished workers: {unfinished:?}")]
    Timeout {
        after: Duration,
        unfinished: Vec<usize>,
    },
    #[error("shape mismatch: {rows}x{cols} needs {expected} values, got {got}")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        got: usize,
    },
    #[error("ragged row {row}: expected {expected} values, got {got}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("matrix must have at least one row and one column, got {rows}x{cols}")]
    EmptyMatrix { rows: usize, cols: usize },
}

pub type Result<T> = std::result::Result<T, MatrixError>;
