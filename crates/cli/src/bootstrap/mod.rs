use coap_gateway_domain::{CliOverrides, Config};
use tracing_subscriber::EnvFilter;

/// Merge configuration sources: file (or defaults), then the
/// `LOOKUP_SERVER` environment variable, then CLI flags. The
/// environment is consulted exactly once, here; no other component
/// reads ambient process state.
pub fn load_config(path: Option<&str>, mut overrides: CliOverrides) -> anyhow::Result<Config> {
    if overrides.upstream_server.is_none() {
        if let Ok(server) = std::env::var("LOOKUP_SERVER") {
            if !server.is_empty() {
                overrides.upstream_server = Some(server);
            }
        }
    }

    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

/// Install the global tracing subscriber. `RUST_LOG` wins when set;
/// the configured level is the fallback.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
