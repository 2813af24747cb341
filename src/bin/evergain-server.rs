// ABOUTME: Server binary for the EverGain API
// ABOUTME: Loads configuration, initialises logging and the store, then serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

//! # EverGain Server
//!
//! ```bash
//! # Defaults from the environment
//! cargo run --bin evergain-server
//!
//! # Override port and store location
//! cargo run --bin evergain-server -- --port 9000 --database-url sqlite:./data/dev.db
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use evergain_server::{
    config::{LogFormat, ServerConfig},
    constants::service,
    database_plugins::factory::{redact_database_url, Database},
    logging,
    resources::ServerResources,
    server::Server,
};

#[derive(Parser)]
#[command(
    name = "evergain-server",
    version,
    about = "EverGain API server",
    long_about = "Workout session tracking, set logging and AI workout feedback over HTTP"
)]
struct Args {
    /// HTTP port override
    #[arg(long)]
    port: Option<u16>,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Emit JSON logs regardless of `LOG_FORMAT`
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env().context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }
    if args.json_logs {
        config.log_format = LogFormat::Json;
    }

    logging::init(config.log_format)?;
    info!(
        version = service::VERSION,
        port = config.http_port,
        database = %redact_database_url(&config.database_url),
        "Starting {}",
        service::NAME
    );

    let database = Database::connect_or_degraded(&config.database_url).await?;
    let resources = Arc::new(ServerResources::from_config(database, config)?);

    Server::new(resources).run().await?;
    Ok(())
}
