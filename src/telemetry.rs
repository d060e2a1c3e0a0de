//! Log subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber filtered by `filter`.
///
/// Falls back to `warn` when the directive does not parse. Calling this
/// more than once keeps the first subscriber.
pub fn init(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
