//! Structured logging setup.

use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for logging.
///
/// `RUST_LOG` wins over `level` when it is set. Repeated calls are no-ops.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .finish(),
    )
    .ok();
}
