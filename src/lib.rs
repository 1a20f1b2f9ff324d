// ABOUTME: Main library entry point for the Foodgram recipe sharing API
// ABOUTME: Provides the REST API, persistence and the shopping list export pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Foodgram
//!
//! Backend for a recipe sharing site: users publish recipes, follow
//! authors, keep favorites and collect recipes into a shopping cart. The
//! cart can be downloaded as a PDF shopping list in which ingredients from
//! every recipe are merged and summed.
//!
//! ## Architecture
//!
//! - **Database**: `SQLite` persistence with per-domain migrations
//! - **Shopping list**: aggregation engine, font registry and PDF renderer
//! - **Services**: export pipeline and recipe image storage
//! - **Routes**: axum routers grouped by domain
//! - **Server**: router assembly, middleware and graceful shutdown
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use foodgram::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Foodgram configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Token authentication and password hashing
pub mod auth;

/// Configuration management
pub mod config;

/// `SQLite` persistence
pub mod database;

/// Ingredient catalog import
pub mod import;

/// Production logging configuration
pub mod logging;

/// HTTP middleware (CORS, request tracing)
pub mod middleware;

/// Shared resources handed to route handlers
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and HTTP serving
pub mod server;

/// Application services
pub mod services;

/// Shopping list aggregation and document rendering
pub mod shopping_list;
