use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::buffer::ResultBuffer;
use crate::dims::Dims;
use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;
use crate::partition::{partition, WorkRange};
use crate::view::MatrixView;
use crate::worker::{self, WorkerConfig, WorkerReport, WorkerStatus};

/// Largest accepted worker count.
pub const MAX_WORKERS: usize = 16;

/// Knobs for a [`Coordinator`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Give up on workers that have not finished after this long.
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl CoordinatorConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Runs one multiplication across a fixed set of worker threads.
///
/// The output index space is partitioned up front, each worker gets an
/// exclusive slice of the result buffer, and the coordinator joins every
/// worker before looking at the buffer again. No locks are taken.
#[derive(Debug, Clone, Default)]
pub struct Coordinator {
    config: CoordinatorConfig,
}

impl Coordinator {
    pub fn new(config: CoordinatorConfig) -> Self {
        Coordinator { config }
    }

    /// Compute `a @ b` using `workers` threads.
    pub fn multiply(&self, a: &Matrix, b: &Matrix, workers: usize) -> Result<Matrix> {
        self.multiply_views(a, b, workers)
    }

    /// Compute `a @ b` for arbitrary views using `workers` threads.
    ///
    /// # Errors
    /// - `DimensionMismatch` if `a.cols() != b.rows()`
    /// - `InvalidWorkerCount` if `workers` is outside `1..=16`
    /// - `WorkerFailed` if any worker panicked
    /// - `Timeout` if the configured timeout elapsed before every worker finished
    ///
    /// Precondition failures are reported before anything is allocated or spawned.
    pub fn multiply_views(
        &self,
        a: &dyn MatrixView,
        b: &dyn MatrixView,
        workers: usize,
    ) -> Result<Matrix> {
        validate(a.dims(), b.dims(), workers)?;

        let out_dims = a.dims().product(&b.dims());
        let ranges = partition(workers, out_dims.numel());
        debug!(
            "partitioned {} cells of {} output across {} workers",
            out_dims.numel(),
            out_dims,
            workers
        );

        let mut buffer = ResultBuffer::zeros(out_dims.numel());
        let started = Instant::now();
        let reports = self.run_workers(a, b, &ranges, &mut buffer);
        for report in &reports {
            debug!(worker = report.id, start = report.range.start, end = report.range.end, status = ?report.status, "worker joined");
        }
        self.check_reports(&reports)?;

        info!(
            "multiplied {} @ {} -> {} with {} workers in {:?}",
            a.dims(),
            b.dims(),
            out_dims,
            workers,
            started.elapsed()
        );
        buffer.into_matrix(out_dims)
    }

    /// Spawn one scoped thread per range and barrier-join all of them.
    fn run_workers(
        &self,
        a: &dyn MatrixView,
        b: &dyn MatrixView,
        ranges: &[WorkRange],
        buffer: &mut ResultBuffer,
    ) -> Vec<WorkerReport> {
        let total_workers = ranges.len();
        let cancel = AtomicBool::new(false);
        let slices = buffer.split_ranges(ranges);
        let (done_tx, done_rx) = mpsc::channel::<usize>();

        thread::scope(|scope| {
            let handles: Vec<_> = slices
                .into_iter()
                .zip(ranges)
                .enumerate()
                .map(|(id, (out, &range))| {
                    let config = WorkerConfig {
                        id,
                        total_workers,
                        a,
                        b,
                    };
                    let cancel = &cancel;
                    let done_tx = done_tx.clone();
                    scope.spawn(move || {
                        let status = worker::run(&config, range, out, cancel);
                        let _ = done_tx.send(id);
                        status
                    })
                })
                .collect();
            drop(done_tx);

            if let Some(timeout) = self.config.timeout {
                wait_with_deadline(&done_rx, total_workers, timeout, &cancel);
            }

            handles
                .into_iter()
                .zip(ranges)
                .enumerate()
                .map(|(id, (handle, &range))| {
                    let status = match handle.join() {
                        Ok(status) => status,
                        Err(payload) => WorkerStatus::Panicked(panic_message(payload.as_ref())),
                    };
                    WorkerReport { id, range, status }
                })
                .collect()
        })
    }

    /// Turn per-worker outcomes into a single verdict.
    fn check_reports(&self, reports: &[WorkerReport]) -> Result<()> {
        if let Some((id, reason)) = reports.iter().find_map(|r| match &r.status {
            WorkerStatus::Panicked(msg) => Some((r.id, msg.clone())),
            _ => None,
        }) {
            return Err(MatrixError::WorkerFailed { id, reason });
        }

        let unfinished: Vec<usize> = reports
            .iter()
            .filter(|r| matches!(r.status, WorkerStatus::Cancelled { .. }))
            .map(|r| r.id)
            .collect();
        if !unfinished.is_empty() {
            return Err(MatrixError::Timeout {
                after: self.config.timeout.unwrap_or_default(),
                unfinished,
            });
        }
        Ok(())
    }
}

/// Check the multiplication preconditions.
pub fn validate(a: Dims, b: Dims, workers: usize) -> Result<()> {
    if a.cols != b.rows {
        return Err(MatrixError::DimensionMismatch {
            a_rows: a.rows,
            a_cols: a.cols,
            b_rows: b.rows,
            b_cols: b.cols,
        });
    }
    if !(1..=MAX_WORKERS).contains(&workers) {
        return Err(MatrixError::InvalidWorkerCount {
            got: workers,
            max: MAX_WORKERS,
        });
    }
    Ok(())
}

/// Compute `a @ b` with `workers` threads and no timeout.
pub fn multiply(a: &Matrix, b: &Matrix, workers: usize) -> Result<Matrix> {
    Coordinator::default().multiply(a, b, workers)
}

/// Wait for `expected` completion messages; raise `cancel` once `timeout` passes.
fn wait_with_deadline(
    done_rx: &Receiver<usize>,
    expected: usize,
    timeout: Duration,
    cancel: &AtomicBool,
) {
    let deadline = Instant::now() + timeout;
    let mut finished = 0;
    while finished < expected {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match done_rx.recv_timeout(remaining) {
            Ok(_) => finished += 1,
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    "{} of {} workers still running after {:?}, cancelling",
                    expected - finished,
                    expected,
                    timeout
                );
                cancel.store(true, Ordering::Relaxed);
                break;
            }
            // every sender is gone: the rest panicked and will show up at join
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}
