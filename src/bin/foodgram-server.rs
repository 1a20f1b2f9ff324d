// ABOUTME: Server binary for the Foodgram recipe sharing API
// ABOUTME: Loads configuration, opens the database and serves HTTP until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Foodgram API Server Binary
//!
//! Starts the REST API with token authentication, recipe storage and the
//! shopping list export.

use anyhow::Result;
use clap::Parser;
use foodgram::{
    config::ServerConfig, database::Database, logging, resources::ServerResources,
    server::FoodgramServer,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "foodgram-server")]
#[command(about = "Foodgram - recipe sharing API with shopping list export")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Foodgram API");
    info!("{}", config.summary());

    let database = Database::new(&config.database_url).await?;
    info!("Database initialized: {}", config.database_url);

    let config = Arc::new(config);
    let resources = Arc::new(ServerResources::new(database, config.clone()));
    let server = FoodgramServer::new(resources);

    display_available_endpoints(&config);

    if let Err(e) = server.run(config.http_port).await {
        error!("Server error: {e}");
        return Err(e);
    }
    Ok(())
}

/// Log the available API endpoints
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(config: &ServerConfig) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let port = config.http_port;

    info!("=== Available API Endpoints ===");
    info!("   Health:            GET  http://{host}:{port}/health");
    info!("   Login:             POST http://{host}:{port}/api/auth/token/login/");
    info!("   Users:             GET  http://{host}:{port}/api/users/");
    info!("   Tags:              GET  http://{host}:{port}/api/tags/");
    info!("   Ingredients:       GET  http://{host}:{port}/api/ingredients/");
    info!("   Recipes:           GET  http://{host}:{port}/api/recipes/");
    info!("   Shopping list:     GET  http://{host}:{port}/api/recipes/download_shopping_cart/");
    info!("=== End of Endpoint List ===");
}
