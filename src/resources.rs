// ABOUTME: Centralized resource container for dependency injection into route handlers
// ABOUTME: Shares the database, auth manager, media storage and shopping list service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and handed to every router as `Arc<ServerResources>`.

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::{CartSnapshotLoader, Database};
use crate::services::{MediaStorage, ShoppingListService};

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Persistence
    pub database: Arc<Database>,
    /// Token authentication
    pub auth_manager: Arc<AuthManager>,
    /// Recipe image storage
    pub media: Arc<MediaStorage>,
    /// Shopping list export pipeline
    pub shopping_list: Arc<ShoppingListService>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create resources from an opened database and the server configuration
    #[must_use]
    pub fn new(database: Database, config: Arc<ServerConfig>) -> Self {
        let database = Arc::new(database);
        let loader: Arc<dyn CartSnapshotLoader> = database.clone();
        let shopping_list = ShoppingListService::from_config(loader, &config.shopping_list);
        Self::with_shopping_list(database, config, shopping_list)
    }

    /// Create resources with a custom shopping list service
    #[must_use]
    pub fn with_shopping_list(
        database: Arc<Database>,
        config: Arc<ServerConfig>,
        shopping_list: ShoppingListService,
    ) -> Self {
        Self {
            auth_manager: Arc::new(AuthManager::new(database.clone())),
            media: Arc::new(MediaStorage::new(config.media_root.clone())),
            shopping_list: Arc::new(shopping_list),
            database,
            config,
        }
    }
}
