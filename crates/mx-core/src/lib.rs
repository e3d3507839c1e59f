//! `mx-core` - Partitioned parallel integer matrix multiplication.
//!
//! This crate provides:
//! - A read-only `MatrixView` trait and an owned `Matrix` type
//! - A `Partitioner` that splits the flat output index space into one
//!   contiguous range per worker
//! - A `Worker` routine computing inner products for its range
//! - A `Coordinator` that validates inputs, hands each worker an exclusive
//!   slice of the result buffer, joins them, and returns the product
//!
//! ```
//! use mx_core::{multiply, Matrix};
//!
//! let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
//! let b = Matrix::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();
//! let c = multiply(&a, &b, 2).unwrap();
//! assert_eq!(c.as_slice(), &[19, 22, 43, 50]);
//! ```

pub mod buffer;
pub mod coordinator;
pub mod dims;
pub mod error;
pub mod matrix;
pub mod partition;
pub mod view;
pub mod worker;

// Re-export primary types at the crate root for convenience.
pub use buffer::ResultBuffer;
pub use coordinator::{multiply, Coordinator, CoordinatorConfig, MAX_WORKERS};
pub use dims::Dims;
pub use error::{MatrixError, Result};
pub use matrix::Matrix;
pub use partition::{compute_range, partition, WorkRange};
pub use view::MatrixView;
pub use worker::{WorkerConfig, WorkerReport, WorkerStatus};
