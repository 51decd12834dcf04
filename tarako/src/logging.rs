use tracing_subscriber::{fmt, EnvFilter};

/// Initialize diagnostic logging on stderr.
///
/// The filter comes from `RUST_LOG` and defaults to `warn`, so regular runs
/// only show the reporter's status lines.
///
/// ```
/// tarako::init_logging();
/// ```
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
