mod extract;

use clap::{Parser, Subcommand};
use prodscout_core::{AppConfig, ConfigError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "prodscout")]
#[command(about = "Pull product details out of marketplace affiliate links")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a product page and print what could be extracted from it
    Extract {
        /// Affiliate or product URL
        url: String,

        /// Print the result as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Wrap the result into a storable product under this category
        /// (label or identifier, e.g. "Home & Decor" or home_decor)
        #[arg(long)]
        category: Option<prodscout_core::ProductCategory>,
    },
    /// Print which marketplace a URL belongs to, without fetching it
    Classify {
        /// Affiliate or product URL
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = prodscout_core::load_app_config_from_env();

    // RUST_LOG wins when set; otherwise fall back to PRODSCOUT_LOG_LEVEL.
    let log_level = config.as_ref().map_or("info", |c| c.log_level.as_str());
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    run(cli.command, config).await
}

/// Dispatches one command. Only `extract` needs a valid configuration.
async fn run(
    command: Commands,
    config: Result<AppConfig, ConfigError>,
) -> anyhow::Result<()> {
    match command {
        Commands::Extract {
            url,
            json,
            category,
        } => extract::run_extract(&config?, &url, json, category).await?,
        Commands::Classify { url } => println!("{}", prodscout_scraper::classify(&url)),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
