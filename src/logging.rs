//! Logging subscriber initialisation.
//!
//! Diagnostics go to stderr so stdout stays clean for scripts, CSV, and JSON.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Overrides the configured level, with full `EnvFilter` syntax.
pub const LOG_ENV: &str = "DEALHUB_LOG";

pub fn init(default_level: &str) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(true)
        .with_writer(std::io::stderr);

    // A second init (as in tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(build_env_filter(default_level))
        .try_init();
}

fn build_env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::try_new(default_level).unwrap_or_else(|_| EnvFilter::new("warn"))
    })
}
