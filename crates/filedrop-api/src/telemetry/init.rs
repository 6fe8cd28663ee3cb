//! Tracing subscriber setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "filedrop=debug,tower_http=debug";

/// Install the global subscriber. `log_format` is `json` or anything else for pretty output.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_telemetry(log_format: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json = log_format.eq_ignore_ascii_case("json");
    let json_layer = json.then(|| fmt::layer().json().with_current_span(true));
    let pretty_layer = (!json).then(|| fmt::layer().with_target(true).compact());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()?;

    tracing::info!(log_format, "Telemetry initialized");

    Ok(())
}
