//! Subscriber setup for the runner

use crate::settings::LoggingSettings;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber; later calls are ignored
///
/// Logs go to stderr so stdout stays machine-readable.
pub fn init(settings: &LoggingSettings, force_json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if settings.json || force_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        tracing::debug!("subscriber already installed: {}", e);
    }
}
