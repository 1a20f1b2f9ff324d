// ABOUTME: Tag catalog route handlers
// ABOUTME: Anonymous read-only listing and lookup of recipe tags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use foodgram_core::errors::AppError;
use std::sync::Arc;

use crate::resources::ServerResources;

/// Tag routes implementation
pub struct TagRoutes;

impl TagRoutes {
    /// Create tag routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/tags/", get(Self::handle_list))
            .route("/api/tags/:id/", get(Self::handle_get))
            .with_state(resources)
    }

    /// Handle GET /api/tags/ - unpaginated
    async fn handle_list(State(resources): State<Arc<ServerResources>>) -> Result<Response, AppError> {
        let tags = resources.database.list_tags().await?;
        Ok(Json(tags).into_response())
    }

    /// Handle GET /api/tags/:id/
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let tag = resources
            .database
            .get_tag(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tag {id}")))?;
        Ok(Json(tag).into_response())
    }
}
