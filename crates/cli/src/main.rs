use clap::Parser;
use coap_gateway_application::use_cases::HandleLookupUseCase;
use coap_gateway_domain::CliOverrides;
use coap_gateway_infrastructure::coap::GatewayHandler;
use coap_gateway_infrastructure::dns::UpstreamResolver;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "coap-gateway")]
#[command(version)]
#[command(about = "CoAP gateway exposing DNS A-record lookups")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// CoAP listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream DNS resolver (host:port)
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        coap_port: cli.port,
        bind_address: cli.bind.clone(),
        upstream_server: cli.upstream.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting CoAP DNS gateway v{}", env!("CARGO_PKG_VERSION"));

    let upstream_addr = config.upstream_addr()?;
    info!(upstream = %upstream_addr, "Using upstream resolver");

    let resolver = Arc::new(UpstreamResolver::new(
        upstream_addr,
        Duration::from_secs(config.upstream.query_timeout),
    ));
    let lookup = Arc::new(HandleLookupUseCase::new(resolver));
    let handler = GatewayHandler::new(lookup);

    let bind_addr = format!("{}:{}", config.server.bind_address, config.server.coap_port);
    server::start_coap_server(bind_addr, handler).await
}
