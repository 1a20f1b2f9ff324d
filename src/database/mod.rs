// ABOUTME: SQLite persistence for users, catalog, recipes, favorites, subscriptions and carts
// ABOUTME: Owns the connection pool, schema migrations and the cart snapshot loader seam
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! [`Database`] wraps a `SqlitePool`. Each domain lives in its own file as an
//! `impl Database` block with a `migrate_*` function that creates its tables
//! idempotently. Foreign keys are enforced on every connection.

mod favorites;
mod ingredients;
mod recipes;
mod shopping_cart;
mod subscriptions;
mod tags;
mod tokens;
mod users;

pub use recipes::{IngredientAmount, RecipeDraft, RecipeFilter};
pub use users::NewUser;

use async_trait::async_trait;
use foodgram_core::errors::{AppError, AppResult};
use foodgram_core::models::CartSnapshot;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use crate::config::DatabaseUrl;

/// Loads the read-only view of a user's shopping cart
///
/// Implementations do not check authentication; callers pass an already
/// authenticated user id.
#[async_trait]
pub trait CartSnapshotLoader: Send + Sync {
    /// Recipes in the user's cart, newest recipe id first, each with its
    /// ingredient lines in stored order. An empty cart is an empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails
    async fn load_cart_snapshot(&self, user_id: i64) -> AppResult<CartSnapshot>;
}

/// Database manager for all Foodgram tables
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn new(database_url: &DatabaseUrl) -> AppResult<Self> {
        let pool = match database_url {
            DatabaseUrl::Memory => {
                // Every connection to :memory: is a separate database, so keep exactly one alive
                let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options)
                    .await?
            }
            DatabaseUrl::SQLite { path } => {
                ensure_parent_dir(path).await?;
                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .foreign_keys(true);
                SqlitePoolOptions::new().connect_with(options).await?
            }
        };

        let db = Self { pool };
        db.migrate().await?;
        info!(database = %database_url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run all migrations, parents before children
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_tokens().await?;
        self.migrate_subscriptions().await?;
        self.migrate_tags().await?;
        self.migrate_ingredients().await?;
        self.migrate_recipes().await?;
        self.migrate_favorites().await?;
        self.migrate_shopping_cart().await?;
        Ok(())
    }
}

async fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::storage(format!(
                    "Cannot create database directory {}: {e}",
                    parent.display()
                ))
            })
        }
        _ => Ok(()),
    }
}

/// Convert a stored integer into an unsigned domain value
pub(crate) fn to_u32(value: i64, column: &str) -> AppResult<u32> {
    u32::try_from(value)
        .map_err(|_| AppError::database(format!("Column {column} holds out-of-range value {value}")))
}

/// Convert a `COUNT(*)` result into a total
pub(crate) fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}
