//! Anime Explorer gateway server.

use anyhow::{Context, Result};
use clap::Parser;
use gateway::{server, AnimeGateway};
use shared::{Config, LogConfig};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        config.log_level()?
    };
    shared::logging::init(LogConfig::from_settings(
        "anime-gateway",
        &config.logging,
        log_level,
    ))?;

    info!(config_file = %args.config.display(), "Loaded configuration");

    let gateway = AnimeGateway::from_config(&config.upstream)
        .context("Failed to create gateway")?;
    info!(
        upstream = %gateway.client().base_url(),
        throttle = ?gateway.client().throttle_policy(),
        "Upstream client ready"
    );

    let host: IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid listen host: {}", config.server.host))?;
    let addr = SocketAddr::new(host, config.server.port);

    server::serve(addr, Arc::new(gateway)).await
}
