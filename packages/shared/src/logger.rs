//! Logging setup utilities for the juku binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `package_name` - The calling package's name (pass `env!("CARGO_PKG_NAME")`)
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use juku_shared::logger::setup_logger;
///
/// setup_logger("juku-server", "debug");
/// ```
pub fn setup_logger(package_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}={}",
                    package_name.replace("-", "_"),
                    default_log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
