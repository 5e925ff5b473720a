//! Logging setup for projpack.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging for projpack.
///
/// Uses `RUST_LOG` environment variable for filtering.
/// Default level: info
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("projpack=info"));

    install(filter);
}

/// Initialize logging with a custom log level.
pub fn init_with_level(level: &str) {
    let filter = EnvFilter::new(format!("projpack={level}"));

    install(filter);
}

fn install(filter: EnvFilter) {
    // Logs go to stderr so stdout stays clean for `--dry-run` listings.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
