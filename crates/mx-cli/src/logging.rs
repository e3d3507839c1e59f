use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// Route `mx` diagnostics to stderr.
///
/// Loading, partitioning and timing messages are shown at `info` unless
/// `RUST_LOG` asks for something else. Stdout only ever carries the
/// `'<output>' created.` line.
pub fn init_subscriber() {
    let fmt_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

/// Show per-worker `debug` output from the coordinator in `cargo test` captures.
///
/// Scoped to the calling test thread through the returned guard.
#[cfg(test)]
pub fn init_test_subscriber() -> tracing::subscriber::DefaultGuard {
    let fmt_layer = fmt::layer().with_target(true).with_test_writer();

    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .set_default()
}
