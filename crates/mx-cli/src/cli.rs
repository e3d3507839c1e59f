use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use mx_core::{Coordinator, CoordinatorConfig};
use mx_io::{load_matrix, write_matrix};

/// Multiply two integer matrices with a fixed number of worker threads.
#[derive(Parser, Debug)]
#[command(name = "mx", version, about)]
pub struct Args {
    /// Text file holding matrix A
    pub input_a: PathBuf,

    /// Text file holding matrix B
    pub input_b: PathBuf,

    /// Where to write A x B
    pub output: PathBuf,

    /// Number of workers, 1 to 16
    pub workers: usize,

    /// Abort if the workers have not finished after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl Args {
    pub fn coordinator_config(&self) -> CoordinatorConfig {
        CoordinatorConfig {
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Load both inputs, multiply, and write the result.
///
/// Nothing is written when any step fails.
pub fn run(args: &Args) -> Result<()> {
    let a = load_matrix(&args.input_a)
        .with_context(|| format!("invalid input file {}", args.input_a.display()))?;
    let b = load_matrix(&args.input_b)
        .with_context(|| format!("invalid input file {}", args.input_b.display()))?;
    info!("A is {}, B is {}", a.dims(), b.dims());

    let coordinator = Coordinator::new(args.coordinator_config());
    let product = coordinator
        .multiply(&a, &b, args.workers)
        .context("multiplication failed")?;

    write_matrix(&args.output, &product)
        .with_context(|| format!("cannot write {}", args.output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_subscriber;
    use mx_core::MatrixError;
    use std::path::Path;

    fn write_input(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn args(dir: &Path, a: &str, b: &str, workers: usize) -> Args {
        Args {
            input_a: write_input(dir, "a.txt", a),
            input_b: write_input(dir, "b.txt", b),
            output: dir.join("c.txt"),
            workers,
            timeout_secs: None,
        }
    }

    #[test]
    fn test_parse_positional_args() {
        let args = Args::try_parse_from(["mx", "a.txt", "b.txt", "c.txt", "4"]).unwrap();
        assert_eq!(args.input_a, PathBuf::from("a.txt"));
        assert_eq!(args.output, PathBuf::from("c.txt"));
        assert_eq!(args.workers, 4);
        assert_eq!(args.coordinator_config(), CoordinatorConfig::default());
    }

    #[test]
    fn test_parse_timeout() {
        let args =
            Args::try_parse_from(["mx", "a", "b", "c", "2", "--timeout-secs", "5"]).unwrap();
        assert_eq!(args.coordinator_config().timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_parse_missing_args() {
        assert!(Args::try_parse_from(["mx", "a.txt", "b.txt"]).is_err());
        assert!(Args::try_parse_from(["mx", "a", "b", "c", "many"]).is_err());
    }

    #[test]
    fn test_run_writes_product() {
        let _guard = init_test_subscriber();
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path(), "2\n2\n1 2\n3 4\n", "2\n2\n5 6\n7 8\n", 2);
        run(&args).unwrap();
        let out = std::fs::read_to_string(&args.output).unwrap();
        assert_eq!(out, "2\n2\n19 22 \n43 50 \n");
    }

    #[test]
    fn test_run_non_square() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path(), "1\n3\n1 2 3\n", "3\n2\n4 1\n5 1\n6 1\n", 3);
        run(&args).unwrap();
        let out = std::fs::read_to_string(&args.output).unwrap();
        assert_eq!(out, "1\n2\n32 6 \n");
    }

    #[test]
    fn test_run_dimension_mismatch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path(), "1\n3\n1 2 3\n", "2\n2\n1 2\n3 4\n", 2);
        let err = run(&args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MatrixError>(),
            Some(MatrixError::DimensionMismatch { .. })
        ));
        assert!(!args.output.exists());
    }

    #[test]
    fn test_run_invalid_worker_count() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path(), "1\n1\n2\n", "1\n1\n3\n", 17);
        let err = run(&args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MatrixError>(),
            Some(MatrixError::InvalidWorkerCount { got: 17, .. })
        ));
        assert!(!args.output.exists());
    }

    #[test]
    fn test_run_unreadable_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path(), "1\n1\n2\n", "1\n1\n3\n", 1);
        args.input_b = dir.path().join("missing.txt");
        let err = run(&args).unwrap_err();
        assert!(format!("{:#}", err).contains("missing.txt"));
        assert!(!args.output.exists());
    }
}
