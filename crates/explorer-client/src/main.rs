//! Terminal front end for the Anime Explorer gateway.

use anyhow::{Context, Result};
use clap::Parser;
use explorer_client::commands::{self, HELP};
use explorer_client::{Command, ExplorerSession, HttpGateway};
use shared::{Config, LogConfig};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Gateway base URL (overrides the config file)
    #[arg(short, long)]
    gateway: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;
    if let Some(url) = args.gateway {
        config.explorer.gateway_url = url;
    }

    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        config.log_level()?
    };
    // Keep the terminal for the UI
    let mut log_config = LogConfig::from_settings("anime-explorer", &config.logging, log_level);
    log_config.console = false;
    log_config.file = true;
    shared::logging::init(log_config)?;

    let gateway = HttpGateway::new(&config.explorer)?;
    info!(gateway = %gateway.base_url(), "Explorer starting");

    let mut session = ExplorerSession::new(gateway);

    println!("Anime Explorer");
    println!("Discover your next favorite anime!\n");
    println!("{}", HELP);

    let mut stdout = std::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let keep_going = commands::execute(&mut session, Command::parse(&line), &mut stdout)
            .await
            .context("Failed to write output")?;
        if !keep_going {
            break;
        }
    }

    info!("Explorer exiting");
    Ok(())
}
