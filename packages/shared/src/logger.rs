//! Logging setup shared by every Marionette binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Every `marionette_*` crate and the binary itself log at `default_log_level`.
/// The filter can be overridden with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "marionette-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use marionette_shared::logger::setup_logger;
///
/// setup_logger("marionette-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    ["marionette_shared", "marionette_server", "marionette_client"]
        .iter()
        .map(|krate| format!("{}={}", krate, default_log_level))
        .chain(std::iter::once(format!(
            "{}={}",
            binary_name.replace('-', "_"),
            default_log_level
        )))
        .collect::<Vec<_>>()
        .join(",")
}
