// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory database, server resources, seed data and request helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `foodgram`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use foodgram::{
    auth::{generate_token, hash_password},
    config::{DatabaseUrl, ServerConfig},
    database::{Database, IngredientAmount, NewUser, RecipeDraft},
    resources::ServerResources,
    server::build_router,
};
use foodgram_core::models::{Ingredient, Tag, User};
use serde_json::Value;
use std::sync::{Arc, Once};
use tempfile::TempDir;
use tower::ServiceExt;

static INIT_LOGGER: Once = Once::new();

/// Password used for every seeded user
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Database::new(&DatabaseUrl::Memory).await?;
    Ok(Arc::new(database))
}

/// Server resources and router over an in-memory database and a temporary media root
pub struct TestApp {
    pub resources: Arc<ServerResources>,
    pub router: Router,
    pub media: TempDir,
}

impl TestApp {
    pub fn database(&self) -> &Database {
        &self.resources.database
    }
}

/// Build the full application over fresh state
pub async fn create_test_app() -> Result<TestApp> {
    init_test_logging();
    let media = TempDir::new()?;
    let config = ServerConfig {
        database_url: DatabaseUrl::Memory,
        media_root: media.path().to_path_buf(),
        ..ServerConfig::default()
    };
    let database = Database::new(&config.database_url).await?;
    let resources = Arc::new(ServerResources::new(database, Arc::new(config)));
    let router = build_router(&resources);
    Ok(TestApp {
        resources,
        router,
        media,
    })
}

/// Create a user with [`TEST_PASSWORD`] and an API token
pub async fn create_test_user(database: &Database, username: &str) -> Result<(User, String)> {
    let user = database
        .create_user(
            &NewUser {
                email: format!("{username}@example.com"),
                username: username.to_owned(),
                first_name: "Test".to_owned(),
                last_name: username.to_owned(),
            },
            &hash_password(TEST_PASSWORD)?,
        )
        .await?;
    let token = database.get_or_create_token(user.id, &generate_token()).await?;
    Ok((user, token))
}

/// Seed the standard breakfast / lunch tags
pub async fn create_test_tags(database: &Database) -> Result<(Tag, Tag)> {
    let breakfast = database.create_tag("Завтрак", "#E26C2D", "breakfast").await?;
    let lunch = database.create_tag("Обед", "#49B64E", "lunch").await?;
    Ok((breakfast, lunch))
}

/// Seed one ingredient
pub async fn create_test_ingredient(
    database: &Database,
    name: &str,
    measurement_unit: &str,
) -> Result<Ingredient> {
    let (ingredient, _) = database.get_or_create_ingredient(name, measurement_unit).await?;
    Ok(ingredient)
}

/// Create a recipe with the given tags and `(ingredient id, amount)` pairs
pub async fn create_test_recipe(
    database: &Database,
    author_id: i64,
    name: &str,
    tags: &[i64],
    ingredients: &[(i64, u32)],
) -> Result<i64> {
    let draft = RecipeDraft {
        name: name.to_owned(),
        image: Some("/media/recipes/images/test.png".to_owned()),
        text: format!("How to cook {name}"),
        cooking_time: 10,
        tags: tags.to_vec(),
        ingredients: ingredients
            .iter()
            .map(|&(id, amount)| IngredientAmount { id, amount })
            .collect(),
    };
    Ok(database.create_recipe(author_id, &draft).await?)
}

/// Response parts captured by [`send`]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Send one request through the router
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<TestResponse> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Token {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await?.to_vec();
    Ok(TestResponse {
        status,
        headers,
        body,
    })
}
