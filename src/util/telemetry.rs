//! Telemetry helpers for structured logging and tracing.

/// Initialize tracing for the harness. Applications can install their own
/// subscriber first; this helper installs an env-filtered `fmt` subscriber
/// only if none is set.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
