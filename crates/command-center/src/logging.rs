//! Logging / tracing initialization.

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber with an env-controlled filter
/// (`RUST_LOG`, defaulting to `info`) and bridges `log` records into it.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    init_with_default_filter("info");
}

/// Like [`init`], with an explicit fallback filter for when `RUST_LOG` is
/// unset.
pub fn init_with_default_filter(default: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default.to_string()));

    // Route `log` macro records (the stores use them) through tracing.
    // Errors mean a logger is already installed, which is fine.
    let _ = tracing_log::LogTracer::init();

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
