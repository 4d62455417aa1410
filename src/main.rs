use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use streamchaser_api::cache::CacheHandle;
use streamchaser_api::config::load_settings;
use streamchaser_api::db::{self, PgSchema};
use streamchaser_api::http::{AppState, HttpServer};
use streamchaser_api::lifecycle::{self, Shutdown};
use streamchaser_api::observability::{logging, metrics};
use streamchaser_api::search::MeiliClient;

#[derive(Parser)]
#[command(name = "streamchaser-api")]
#[command(about = "Streamchaser backend API server", long_about = None)]
struct Cli {
    /// Optional TOML settings file; environment variables override it.
    #[arg(short, long, env = "STREAMCHASER_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let settings = Arc::new(load_settings(cli.config.as_deref())?);
    logging::init_logging(&settings);

    tracing::info!(
        environment = %settings.app_environment,
        bind_address = %settings.listener.bind_address,
        country_codes = ?settings.supported_country_codes,
        "Configuration loaded"
    );

    if settings.observability.metrics_enabled {
        match settings.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %settings.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Resources
    let search = MeiliClient::new(&settings.search)?;
    let pool = db::connect_lazy(&settings.database)?;
    let cache = Arc::new(CacheHandle::open(&settings.cache)?);
    match tokio::time::timeout(Duration::from_secs(2), cache.ping()).await {
        Ok(Ok(())) => tracing::debug!("Cache reachable"),
        Ok(Err(e)) => tracing::warn!(error = %e, "Cache not reachable yet"),
        Err(_) => tracing::warn!("Cache ping timed out"),
    }

    // Startup sequence; any error here ends the process.
    let report =
        lifecycle::run_startup(settings.as_ref(), &search, &PgSchema::new(pool.clone())).await?;
    tracing::info!(
        indexes_configured = ?report.indexes_configured,
        schema_attempts = report.schema_attempts,
        "Startup complete"
    );

    let listener = TcpListener::bind(&settings.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    let signals = lifecycle::spawn_signal_listener(shutdown.clone());

    let state = AppState {
        settings: settings.clone(),
        db: pool.clone(),
        cache: cache.clone(),
    };
    let served = HttpServer::new(state)?.run(listener, server_shutdown).await;

    signals.abort();
    lifecycle::release_resources(&cache, &pool).await;
    served?;

    tracing::info!("Shutdown complete");
    Ok(())
}
