use crate::Environment;
use tracing_error::ErrorLayer;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install color-eyre for readable error reports in the binaries.
///
/// Call early in main(), before any fallible operation. Safe to call more
/// than once (later calls are no-ops).
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize the tracing subscriber.
///
/// - Development: pretty-printed human-readable output with module targets.
/// - Production (`APP_ENV=production`): JSON lines for log aggregation.
///
/// `RUST_LOG` overrides the default `info` filter. An [`ErrorLayer`] is
/// installed in both modes so spans are captured into error reports.
///
/// Safe to call more than once; only the first call installs a subscriber
/// (relevant in tests).
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(ErrorLayer::default());

    let result = if environment.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(false))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already initialized");
    }
}
