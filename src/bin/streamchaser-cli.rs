use std::path::PathBuf;

use clap::{Parser, Subcommand};

use streamchaser_api::config::load_settings;
use streamchaser_api::db::{self, PgSchema};
use streamchaser_api::lifecycle::{ensure_schema_with_retry, SCHEMA_RETRY_DELAY};
use streamchaser_api::search::{update_index, IndexSettings, MeiliClient};

#[derive(Parser)]
#[command(name = "streamchaser-cli")]
#[command(about = "Maintenance CLI for the Streamchaser API", long_about = None)]
struct Cli {
    /// Optional TOML settings file; environment variables override it.
    #[arg(short, long, env = "STREAMCHASER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply search index settings now, in any environment
    ConfigureIndex {
        /// Limit to these country codes (default: all supported)
        #[arg(short = 'c', long = "country")]
        countries: Vec<String>,
    },
    /// Print the settings that would be applied to a country's index
    ShowIndexSettings {
        #[arg(short = 'c', long = "country")]
        country: String,
    },
    /// Create missing database tables
    EnsureSchema,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::ConfigureIndex { countries } => {
            let countries = if countries.is_empty() {
                settings.supported_country_codes.clone()
            } else {
                countries
            };
            let client = MeiliClient::new(&settings.search)?;
            let configured = update_index(&client, &countries).await?;
            println!("Configured {} index(es) at {}", configured, client.base_url());
        }
        Commands::ShowIndexSettings { country } => {
            let index_settings = IndexSettings::for_country(&country);
            println!("{}", serde_json::to_string_pretty(&index_settings)?);
        }
        Commands::EnsureSchema => {
            let pool = db::connect_lazy(&settings.database)?;
            let attempts =
                ensure_schema_with_retry(&PgSchema::new(pool.clone()), SCHEMA_RETRY_DELAY).await?;
            pool.close().await;
            println!("Schema ready after {} attempt(s)", attempts);
        }
    }

    Ok(())
}
