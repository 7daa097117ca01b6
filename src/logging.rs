use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured logging with configurable level and format.
///
/// The `RUST_LOG` environment variable takes precedence over `level`.
/// Examples:
/// - `RUST_LOG=debug` - Debug level and above
/// - `RUST_LOG=link_sim=debug` - Debug level for this crate only
///
/// Output goes to standard error so that `--json` mode keeps standard
/// output a single JSON document.
pub fn init_logging_with_config(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
