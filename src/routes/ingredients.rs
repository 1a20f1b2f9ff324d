// ABOUTME: Ingredient catalog route handlers
// ABOUTME: Anonymous listing with case-insensitive name prefix search, and lookup by id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use foodgram_core::errors::AppError;
use serde::Deserialize;
use std::sync::Arc;

use crate::resources::ServerResources;

/// Ingredient list query
#[derive(Debug, Default, Deserialize)]
pub struct IngredientQuery {
    /// Name prefix, matched ignoring case
    pub name: Option<String>,
}

/// Ingredient routes implementation
pub struct IngredientRoutes;

impl IngredientRoutes {
    /// Create ingredient routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/ingredients/", get(Self::handle_list))
            .route("/api/ingredients/:id/", get(Self::handle_get))
            .with_state(resources)
    }

    /// Handle GET /api/ingredients/?name=prefix - unpaginated
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<IngredientQuery>,
    ) -> Result<Response, AppError> {
        let ingredients = resources
            .database
            .list_ingredients(query.name.as_deref())
            .await?;
        Ok(Json(ingredients).into_response())
    }

    /// Handle GET /api/ingredients/:id/
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let ingredient = resources
            .database
            .get_ingredient(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Ingredient {id}")))?;
        Ok(Json(ingredient).into_response())
    }
}
