// ABOUTME: Route module organization for Foodgram HTTP endpoints
// ABOUTME: Groups route definitions by domain and holds shared query and response helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Foodgram API
//!
//! Each domain module contains route definitions and thin handler functions
//! that delegate to the database and service layers. Paths keep their
//! trailing slash.

/// Token login and logout
pub mod auth;
/// Health check
pub mod health;
/// Ingredient catalog
pub mod ingredients;
/// Recipes, favorites, cart membership and shopping list download
pub mod recipes;
/// Tag catalog
pub mod tags;
/// Registration, profiles, passwords and subscriptions
pub mod users;

pub use auth::AuthRoutes;
pub use health::HealthRoutes;
pub use ingredients::IngredientRoutes;
pub use recipes::RecipeRoutes;
pub use tags::TagRoutes;
pub use users::UserRoutes;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use foodgram_core::pagination::PageRequest;
use serde::Deserialize;

/// `page` / `limit` query parameters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationQuery {
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
}

impl PaginationQuery {
    /// Resolve against the configured default page size
    #[must_use]
    pub fn page_request(&self, default_limit: u32) -> PageRequest {
        PageRequest::from_query(self.page, self.limit, default_limit)
    }
}

/// Empty 204 response
pub(crate) fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
