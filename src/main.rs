//! Itemd CLI - standalone item catalog server

use clap::Parser;
use itemd::{Config, Service};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "itemd")]
#[command(author = "Itemd Team")]
#[command(version)]
#[command(about = "Itemd - minimal in-memory item catalog server", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "~/.itemd/config.toml")]
    config: PathBuf,

    /// Override server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override server host
    #[arg(long)]
    host: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initialize a new config file with defaults
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("itemd={},tower_http=debug", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Handle --init flag
    if args.init {
        let config_path = itemd::config::expand_path(&args.config);
        if config_path.exists() {
            tracing::warn!("Config file already exists: {}", config_path.display());
            return Ok(());
        }
        Config::create_default(&config_path)?;
        tracing::info!("Created default config at: {}", config_path.display());
        return Ok(());
    }

    // Load configuration
    let config_path = itemd::config::expand_path(&args.config);
    let mut config = if config_path.exists() {
        Config::from_file(&config_path)?
    } else {
        tracing::warn!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        Config::default()
    };

    // Apply environment and CLI overrides
    config.apply_env_overrides();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }

    // Create service and start API server (blocks until shutdown)
    let service = Service::new(config);
    service.start_api_server().await?;

    Ok(())
}
