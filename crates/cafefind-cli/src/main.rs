mod db;
mod output;
mod search;
mod seed;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::db::DbCommands;

#[derive(Debug, Parser)]
#[command(name = "cafefind")]
#[command(about = "Find coffee shops near a location")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for coffee shops around a point
    Search {
        /// Latitude of the search point
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude of the search point
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
        /// Search radius in meters (500 to 10000)
        #[arg(long)]
        radius: Option<u32>,
        /// Fetch from OpenStreetMap when fewer fresh cached results than this
        #[arg(long)]
        min_results: Option<u32>,
        /// Maximum number of results (1 to 50)
        #[arg(long)]
        max_results: Option<u32>,
        /// Only show venues that are open right now
        #[arg(long)]
        open_now: bool,
        /// Print results as JSON instead of a list
        #[arg(long)]
        json: bool,
    },
    /// Bulk-load every coffee shop in a country from OpenStreetMap
    Seed {
        /// ISO 3166-1 alpha-2 country code (e.g., NZ)
        #[arg(long)]
        country: String,
        /// Confirm the heavy country-wide query
        #[arg(long)]
        force: bool,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = cafefind_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let pool_config = cafefind_db::PoolConfig::from_app_config(&config);
    let pool = cafefind_db::connect_pool(&config.database_url, pool_config).await?;

    match cli.command {
        Commands::Search {
            lat,
            lon,
            radius,
            min_results,
            max_results,
            open_now,
            json,
        } => {
            let args = search::SearchArgs {
                coordinates: lat.zip(lon),
                radius,
                min_results,
                max_results,
                open_now,
                json,
            };
            search::run_search(&pool, &config, &args).await?;
        }
        Commands::Seed { country, force } => {
            seed::run_seed(&pool, &config, &country, force).await?;
        }
        Commands::Db { command } => db::run_db(&pool, command).await?,
    }

    Ok(())
}
