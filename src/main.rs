use clap::Parser;

use jinja_hub::cdn;
use jinja_hub::cli::Cli;
use jinja_hub::config::{load_or_default, validation::validate_config, ConfigError};
use jinja_hub::lifecycle::{bootstrap, signals, Shutdown, StartupError};
use jinja_hub::net::{self, BindAddress};
use jinja_hub::observability::{logging, metrics};
use jinja_hub::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Configuration: file (or defaults), then command-line overrides.
    let mut config = load_or_default(cli.config.as_deref()).map_err(StartupError::from)?;
    cli.apply(&mut config);
    validate_config(&config)
        .map_err(ConfigError::Validation)
        .map_err(StartupError::from)?;

    logging::init(&config.observability).map_err(StartupError::from)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "jinja-hub starting");

    let host = bootstrap(&config.sites)?;

    let address: BindAddress = config
        .listener
        .bind_address
        .parse()
        .map_err(StartupError::from)?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = net::bind(&address).await.map_err(StartupError::from)?;
    host.announce(&address);

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config, host);
    if let Some(proxy) = server.cdn() {
        if !server.config().cdn.prewarm.is_empty() {
            cdn::spawn_prewarm(proxy, shutdown.subscribe());
        }
    }
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
