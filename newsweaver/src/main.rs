/*
newsweaver - single-binary main.rs
Starts the Rocket HTTP server exposing the news request parser and router,
or parses a single message from the command line and prints the result.
*/

use anyhow::{Context, Result};
use clap::Parser;
use common::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use newsweaver::parser::{NewsParser, ParserTables};
use newsweaver::routing::Router;
use newsweaver::server::{launch_rocket, AppState};

#[derive(Parser, Debug)]
#[command(name = "newsweaver", about = "News Weaver request router and news intent parser")]
struct Args {
    /// Path to config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Parse MESSAGE, print the analysis as JSON and exit (no HTTP server)
    #[arg(long, value_name = "MESSAGE")]
    parse: Option<String>,

    /// Override log level (info, debug, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI args
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = load_config(args.config).await?;

    let tables = ParserTables::from_config(&config.parser).context("failed to build parser tables")?;
    info!(
        languages = tables.languages().len(),
        topic_rules = tables.topics().rules().len(),
        "parser tables ready"
    );
    let parser = NewsParser::new(Arc::new(tables));

    if let Some(message) = args.parse {
        let analysis = parser.inspect(&message);
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    let state = AppState::new(Router::new(parser));

    info!("Launching Rocket HTTP server");
    if let Err(e) = launch_rocket(state, Some(&config)).await {
        error!(%e, "Rocket server failed");
        return Err(e);
    }

    info!("Shutdown complete");
    Ok(())
}

/// Merge `config.default.toml` with `--config FILE` (or `config.toml` if present).
async fn load_config(explicit: Option<PathBuf>) -> Result<Config> {
    let default_path = PathBuf::from("config.default.toml");

    let override_path = if let Some(p) = explicit {
        if !p.exists() {
            error!(path = ?p, "specified config file not found");
            return Err(anyhow::anyhow!("Config file not found: {}", p.display()));
        }
        Some(p)
    } else {
        let p = PathBuf::from("config.toml");
        if p.exists() { Some(p) } else { None }
    };

    let config = match Config::load_with_defaults(
        if default_path.exists() { Some(&default_path) } else { None },
        override_path.as_deref(),
    )
    .await
    {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(%e, "failed to load configuration");
            return Err(e);
        }
    };
    info!(default = ?default_path, override = ?override_path, "configuration loaded");
    Ok(config)
}
