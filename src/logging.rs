use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging from CLI options.
///
/// Log level can be controlled via the `RUST_LOG` environment variable, which
/// takes precedence over `level`.
/// Examples:
/// - `RUST_LOG=ping_overlay=debug` - Per-tick probe results
/// - `RUST_LOG=warn` - Only degraded conditions
///
/// Output goes to stderr so the terminal overlay line on stdout stays intact.
pub fn init_logging_with_config(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);

    // try_init: a second call (e.g. from tests) must not panic
    if json {
        let _ = registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_names(true),
            )
            .try_init();
    } else {
        let _ = registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_names(true)
                    .with_line_number(true)
                    .with_file(true),
            )
            .try_init();
    }
}
