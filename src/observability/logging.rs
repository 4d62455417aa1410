//! Structured logging.
//!
//! JSON lines in production, human readable output elsewhere. `RUST_LOG`
//! wins over the configured level when set.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Settings;

/// Default filter directives for a log level.
pub fn default_directives(level: &str) -> String {
    format!("streamchaser_api={level},tower_http={level},sqlx=warn", level = level)
}

/// Install the global tracing subscriber.
pub fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&settings.observability.log_level)));

    if settings.app_environment.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(
        environment = %settings.app_environment,
        version = env!("CARGO_PKG_VERSION"),
        "Logging initialized"
    );
}
