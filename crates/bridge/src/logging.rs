//! Logging initialization and configuration.

use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Builds the subscriber described by `config`.
///
/// Events go to stderr so stdout stays reserved for usage output. Span
/// close events are left out; the bridge runs a single short command.
pub fn build_subscriber(config: &LoggingConfig) -> Box<dyn Subscriber + Send + Sync> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            let json_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .with_target(true);
            Box::new(subscriber.with(json_layer))
        }
        _ => {
            let pretty_layer = fmt::layer()
                .pretty()
                .with_writer(std::io::stderr)
                .with_target(false);
            Box::new(subscriber.with(pretty_layer))
        }
    }
}

/// Installs the configured subscriber as the global default.
pub fn init_logging(config: &LoggingConfig) {
    build_subscriber(config).init();
}
