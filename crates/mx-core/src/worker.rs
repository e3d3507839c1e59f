use std::sync::atomic::{AtomicBool, Ordering};

use crate::partition::WorkRange;
use crate::view::MatrixView;

/// Per-worker parameters, built by the coordinator before spawning.
#[derive(Debug, Clone, Copy)]
pub struct WorkerConfig<'a> {
    pub id: usize,
    pub total_workers: usize,
    pub a: &'a dyn MatrixView,
    pub b: &'a dyn MatrixView,
}

/// How a worker's run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerStatus {
    /// Every cell in the range was written.
    Completed { cells: usize },
    /// The cancel flag was raised; only the first `completed` cells were written.
    Cancelled { completed: usize },
    /// The worker thread unwound. Carries the panic message.
    Panicked(String),
}

impl WorkerStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, WorkerStatus::Completed { .. })
    }
}

/// Outcome of one worker, as collected by the coordinator at join time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    pub id: usize,
    pub range: WorkRange,
    pub status: WorkerStatus,
}

/// Dot product of row `row` of `a` with column `col` of `b`.
///
/// Uses wrapping arithmetic; overflow is not detected.
pub fn inner_product(a: &dyn MatrixView, b: &dyn MatrixView, row: usize, col: usize) -> i64 {
    (0..a.cols()).fold(0i64, |acc, i| {
        acc.wrapping_add(a.get(row, i).wrapping_mul(b.get(i, col)))
    })
}

/// Compute every output cell in `range` and store it in `out`.
///
/// `out` is the worker's exclusive slice of the result buffer, so flat cell
/// `k` lands in `out[k - range.start]`. Output coordinates use the product's
/// row-major stride `b.cols()`. The cancel flag is polled before each cell.
///
/// # Panics
/// Panics if `out.len() != range.len()` or the range runs past the product's
/// cell count. Both are coordinator bugs, not runtime conditions.
pub fn run(
    config: &WorkerConfig<'_>,
    range: WorkRange,
    out: &mut [i64],
    cancel: &AtomicBool,
) -> WorkerStatus {
    assert_eq!(
        out.len(),
        range.len(),
        "worker {}: slice of {} cells for range {:?}",
        config.id,
        out.len(),
        range
    );
    let out_dims = config.a.dims().product(&config.b.dims());
    assert!(
        range.end <= out_dims.numel(),
        "worker {}: range {:?} exceeds {} output",
        config.id,
        range,
        out_dims
    );

    for (done, (slot, k)) in out.iter_mut().zip(range.indices()).enumerate() {
        if cancel.load(Ordering::Relaxed) {
            return WorkerStatus::Cancelled { completed: done };
        }
        let (row, col) = out_dims.coords(k);
        *slot = inner_product(config.a, config.b, row, col);
    }

    WorkerStatus::Completed { cells: range.len() }
}
