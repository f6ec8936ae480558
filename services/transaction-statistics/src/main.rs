//! Transaction statistics service - main entry point.

use anyhow::Result;
use clap::{Arg, Command};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use transaction_statistics::{StatisticsConfig, StatisticsServer};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "transaction_statistics=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line arguments
    let matches = Command::new("transaction-statistics")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sliding-window transaction statistics service")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("statistics.toml"),
        )
        .get_matches();

    // Load configuration
    let default_config = "statistics.toml".to_string();
    let config_path = matches
        .get_one::<String>("config")
        .unwrap_or(&default_config);
    let config = match StatisticsConfig::from_file(config_path) {
        Ok(config) => {
            info!("Loaded configuration from: {}", config_path);
            config
        }
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path, e);
            info!("Using default configuration");
            StatisticsConfig::default()
        }
    };

    info!(
        "Starting transaction statistics service v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Server will bind to: {}", config.server_address());
    info!("Acceptance window: {}s", config.window_secs);
    info!("Eviction cadence: {}ms", config.eviction_interval_ms);

    // Start the server
    let server = StatisticsServer::new(config)?;
    if let Err(e) = server.start().await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
