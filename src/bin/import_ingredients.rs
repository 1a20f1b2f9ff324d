// ABOUTME: Command-line loader for the ingredient catalog
// ABOUTME: Imports a CSV or JSON ingredient file into the configured database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use clap::Parser;
use foodgram::{config::DatabaseUrl, database::Database, import::import_ingredients, logging};
use foodgram_core::constants::{defaults, env_vars};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "import-ingredients")]
#[command(about = "Load the Foodgram ingredient catalog from a CSV or JSON file")]
pub struct Args {
    /// Ingredient file (`.csv` with name,unit rows or `.json` array)
    #[arg(long)]
    path: PathBuf,

    /// Database URL, defaults to `DATABASE_URL`
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_from_env()?;

    let database_url = args
        .database_url
        .or_else(|| std::env::var(env_vars::DATABASE_URL).ok())
        .unwrap_or_else(|| defaults::DATABASE_URL.to_owned());
    let database = Database::new(&DatabaseUrl::parse_url(&database_url)).await?;

    let report = import_ingredients(&database, &args.path).await?;
    info!(
        "Loaded {} ingredients from {} ({} already present, {} skipped)",
        report.created,
        args.path.display(),
        report.existing,
        report.skipped
    );
    Ok(())
}
