// ABOUTME: Recipe route handlers for the catalog, favorites, cart membership and list download
// ABOUTME: Reads are public, writes require a token and edits are limited to the author
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::Query;
use foodgram_core::constants::limits;
use foodgram_core::errors::AppError;
use foodgram_core::models::{RecipeSummary, User};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;

use super::{no_content, PaginationQuery};
use crate::database::{IngredientAmount, RecipeDraft, RecipeFilter};
use crate::resources::ServerResources;

/// Recipe list query; `tags` may repeat
#[derive(Debug, Default, Deserialize)]
pub struct RecipeListQuery {
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
    /// Author id
    pub author: Option<i64>,
    /// Tag slugs, matched with OR
    #[serde(default)]
    pub tags: Vec<String>,
    /// `1`/`true` keeps only the viewer's favorites
    pub is_favorited: Option<String>,
    /// `1`/`true` keeps only recipes in the viewer's cart
    pub is_in_shopping_cart: Option<String>,
}

impl RecipeListQuery {
    fn filter(&self) -> RecipeFilter {
        RecipeFilter {
            author: self.author,
            tags: self
                .tags
                .iter()
                .filter(|slug| !slug.is_empty())
                .cloned()
                .collect(),
            is_favorited: flag(self.is_favorited.as_deref()),
            is_in_shopping_cart: flag(self.is_in_shopping_cart.as_deref()),
        }
    }
}

fn flag(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("1" | "true" | "True"))
}

/// One ingredient entry of a recipe payload
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IngredientAmountRequest {
    /// Catalog ingredient id
    pub id: i64,
    /// Amount in the ingredient's unit
    pub amount: i64,
}

/// Recipe create/update payload
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecipeRequest {
    /// Ingredients with amounts
    pub ingredients: Option<Vec<IngredientAmountRequest>>,
    /// Tag ids
    pub tags: Option<Vec<i64>>,
    /// Base64 data URI
    pub image: Option<String>,
    /// Title
    pub name: Option<String>,
    /// Description / instructions
    pub text: Option<String>,
    /// Cooking time in minutes
    pub cooking_time: Option<i64>,
}

/// Recipe routes implementation
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/recipes/",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/recipes/download_shopping_cart/",
                get(Self::handle_download_shopping_cart),
            )
            .route(
                "/api/recipes/:id/",
                get(Self::handle_get)
                    .patch(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route(
                "/api/recipes/:id/favorite/",
                post(Self::handle_add_favorite).delete(Self::handle_remove_favorite),
            )
            .route(
                "/api/recipes/:id/shopping_cart/",
                post(Self::handle_add_to_cart).delete(Self::handle_remove_from_cart),
            )
            .with_state(resources)
    }

    /// Handle GET /api/recipes/
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<RecipeListQuery>,
    ) -> Result<Response, AppError> {
        let viewer = resources.auth_manager.authenticate_optional(&headers).await?;
        let request = PaginationQuery {
            page: query.page,
            limit: query.limit,
        }
        .page_request(resources.config.page_size);
        let page = resources
            .database
            .list_recipes(&query.filter(), viewer.map(|user| user.id), request)
            .await?;
        Ok(Json(page).into_response())
    }

    /// Handle POST /api/recipes/
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<RecipeRequest>,
    ) -> Result<Response, AppError> {
        let user = resources.auth_manager.authenticate(&headers).await?;
        let mut draft = validate_recipe(body)?;
        let data_uri = draft
            .image
            .take()
            .ok_or_else(|| AppError::missing_field("image"))?;
        draft.image = Some(resources.media.save_data_uri(&data_uri).await?);

        let recipe_id = resources.database.create_recipe(user.id, &draft).await?;
        tracing::info!(user.id = user.id, recipe.id = recipe_id, "Recipe created");
        let recipe = resources
            .database
            .get_recipe(recipe_id, Some(user.id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))?;
        Ok((StatusCode::CREATED, Json(recipe)).into_response())
    }

    /// Handle GET /api/recipes/:id/
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let viewer = resources.auth_manager.authenticate_optional(&headers).await?;
        let recipe = resources
            .database
            .get_recipe(id, viewer.map(|user| user.id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;
        Ok(Json(recipe).into_response())
    }

    /// Handle PATCH /api/recipes/:id/
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(body): Json<RecipeRequest>,
    ) -> Result<Response, AppError> {
        let user = resources.auth_manager.authenticate(&headers).await?;
        require_author(&resources, &user, id).await?;

        let mut draft = validate_recipe(body)?;
        if let Some(data_uri) = draft.image.take() {
            draft.image = Some(resources.media.save_data_uri(&data_uri).await?);
        }
        resources.database.update_recipe(id, &draft).await?;

        let recipe = resources
            .database
            .get_recipe(id, Some(user.id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;
        Ok(Json(recipe).into_response())
    }

    /// Handle DELETE /api/recipes/:id/
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user = resources.auth_manager.authenticate(&headers).await?;
        require_author(&resources, &user, id).await?;
        resources.database.delete_recipe(id).await?;
        tracing::info!(user.id = user.id, recipe.id = id, "Recipe deleted");
        Ok(no_content())
    }

    /// Handle POST /api/recipes/:id/favorite/
    async fn handle_add_favorite(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user = resources.auth_manager.authenticate(&headers).await?;
        let summary = recipe_summary(&resources, id).await?;
        resources.database.add_favorite(user.id, id).await?;
        Ok((StatusCode::CREATED, Json(summary)).into_response())
    }

    /// Handle DELETE /api/recipes/:id/favorite/
    async fn handle_remove_favorite(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user = resources.auth_manager.authenticate(&headers).await?;
        recipe_summary(&resources, id).await?;
        resources.database.remove_favorite(user.id, id).await?;
        Ok(no_content())
    }

    /// Handle POST /api/recipes/:id/shopping_cart/
    async fn handle_add_to_cart(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user = resources.auth_manager.authenticate(&headers).await?;
        let summary = recipe_summary(&resources, id).await?;
        resources.database.add_to_shopping_cart(user.id, id).await?;
        Ok((StatusCode::CREATED, Json(summary)).into_response())
    }

    /// Handle DELETE /api/recipes/:id/shopping_cart/
    async fn handle_remove_from_cart(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user = resources.auth_manager.authenticate(&headers).await?;
        recipe_summary(&resources, id).await?;
        resources.database.remove_from_shopping_cart(user.id, id).await?;
        Ok(no_content())
    }

    /// Handle GET /api/recipes/download_shopping_cart/
    async fn handle_download_shopping_cart(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = resources.auth_manager.authenticate(&headers).await?;
        let document = resources.shopping_list.export(user.id).await?;

        let disposition = HeaderValue::from_str(&format!(
            "attachment; filename=\"{}\"",
            document.filename
        ))
        .map_err(|e| AppError::internal(format!("Invalid Content-Disposition header: {e}")))?;
        Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, HeaderValue::from_static(document.content_type)),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            document.bytes,
        )
            .into_response())
    }
}

async fn recipe_summary(resources: &ServerResources, id: i64) -> Result<RecipeSummary, AppError> {
    resources
        .database
        .get_recipe_summary(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))
}

async fn require_author(resources: &ServerResources, user: &User, id: i64) -> Result<(), AppError> {
    let author = resources
        .database
        .get_recipe_author(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;
    if author != user.id {
        return Err(AppError::permission_denied(
            "Only the author can change this recipe",
        ));
    }
    Ok(())
}

/// Validate a recipe payload; the image stays an unsaved data URI
fn validate_recipe(body: RecipeRequest) -> Result<RecipeDraft, AppError> {
    let ingredients = body
        .ingredients
        .ok_or_else(|| AppError::missing_field("ingredients"))?;
    let tags = body.tags.ok_or_else(|| AppError::missing_field("tags"))?;
    let name = body
        .name
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::missing_field("name"))?;
    let text = body
        .text
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| AppError::missing_field("text"))?;
    let cooking_time = body
        .cooking_time
        .ok_or_else(|| AppError::missing_field("cooking_time"))?;

    if name.chars().count() > limits::NAME_MAX_LEN {
        return Err(AppError::invalid_input(format!(
            "Recipe name must be at most {} characters",
            limits::NAME_MAX_LEN
        ))
        .with_details(serde_json::json!({ "field": "name" })));
    }
    let cooking_time = u32::try_from(cooking_time)
        .ok()
        .filter(|minutes| *minutes >= 1)
        .ok_or_else(|| AppError::out_of_range("cooking_time", "Cooking time must be at least 1 minute"))?;

    if tags.is_empty() {
        return Err(AppError::invalid_input("At least one tag is required")
            .with_details(serde_json::json!({ "field": "tags" })));
    }
    let mut seen_tags = HashSet::new();
    if !tags.iter().all(|id| seen_tags.insert(*id)) {
        return Err(AppError::invalid_input("Tags must not repeat")
            .with_details(serde_json::json!({ "field": "tags" })));
    }

    if ingredients.is_empty() {
        return Err(AppError::invalid_input("At least one ingredient is required")
            .with_details(serde_json::json!({ "field": "ingredients" })));
    }
    let mut seen_ingredients = HashSet::new();
    let mut amounts = Vec::with_capacity(ingredients.len());
    for ingredient in ingredients {
        if !seen_ingredients.insert(ingredient.id) {
            return Err(AppError::invalid_input("Ingredients must not repeat")
                .with_details(serde_json::json!({ "field": "ingredients" })));
        }
        let amount = u32::try_from(ingredient.amount)
            .ok()
            .filter(|amount| *amount >= 1)
            .ok_or_else(|| AppError::out_of_range("amount", "Ingredient amount must be at least 1"))?;
        amounts.push(IngredientAmount {
            id: ingredient.id,
            amount,
        });
    }

    Ok(RecipeDraft {
        name,
        image: body.image.filter(|image| !image.is_empty()),
        text,
        cooking_time,
        tags,
        ingredients: amounts,
    })
}
