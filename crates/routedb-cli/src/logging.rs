use tracing_subscriber::prelude::*;

/// Install the fmt subscriber, filtered by `RUST_LOG`
///
/// Defaults to `debug` in debug builds and `info` otherwise. Logs go to stderr so
/// binary records written to stdout stay clean.
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;

    let default_directive = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);
    tracing_subscriber::registry().with(fmt_layer).init();

    tracing::debug!("Logging initialized");
}
