// ABOUTME: User route handlers for registration, profiles, passwords and subscriptions
// ABOUTME: Every endpoint except registration requires token authentication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use foodgram_core::constants::limits;
use foodgram_core::errors::AppError;
use foodgram_core::pagination::Page;
use regex::Regex;
use serde::Deserialize;
use std::sync::{Arc, OnceLock};

use super::{no_content, PaginationQuery};
use crate::auth::{hash_password, verify_password};
use crate::database::NewUser;
use crate::resources::ServerResources;

/// Registration payload
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    /// Login e-mail
    pub email: String,
    /// Public handle
    pub username: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Plain-text password
    pub password: String,
}

/// Password change payload
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SetPasswordRequest {
    /// Replacement password
    pub new_password: String,
    /// Password currently in use
    pub current_password: String,
}

/// Subscription list query
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionsQuery {
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
    /// Maximum number of recipes shown per author
    pub recipes_limit: Option<String>,
}

impl SubscriptionsQuery {
    /// Positive integer limit; anything else shows every recipe
    fn recipes_limit(&self) -> Option<u32> {
        self.recipes_limit
            .as_deref()
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|limit| *limit > 0)
    }
}

/// Subscribe endpoint query
#[derive(Debug, Default, Deserialize)]
pub struct SubscribeQuery {
    /// Maximum number of recipes shown in the response
    pub recipes_limit: Option<String>,
}

/// User routes implementation
pub struct UserRoutes;

impl UserRoutes {
    /// Create user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users/",
                get(Self::handle_list).post(Self::handle_register),
            )
            .route("/api/users/me/", get(Self::handle_me))
            .route("/api/users/set_password/", post(Self::handle_set_password))
            .route("/api/users/subscriptions/", get(Self::handle_subscriptions))
            .route("/api/users/:id/", get(Self::handle_get))
            .route(
                "/api/users/:id/subscribe/",
                post(Self::handle_subscribe).delete(Self::handle_unsubscribe),
            )
            .with_state(resources)
    }

    /// Handle POST /api/users/ - register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        validate_registration(&body)?;
        let password_hash = hash_password(&body.password)?;
        let user = resources
            .database
            .create_user(
                &NewUser {
                    email: body.email.trim().to_owned(),
                    username: body.username.trim().to_owned(),
                    first_name: body.first_name.trim().to_owned(),
                    last_name: body.last_name.trim().to_owned(),
                },
                &password_hash,
            )
            .await?;
        tracing::info!(user.id = user.id, "User registered");
        Ok((StatusCode::CREATED, Json(user)).into_response())
    }

    /// Handle GET /api/users/
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<PaginationQuery>,
    ) -> Result<Response, AppError> {
        let viewer = resources.auth_manager.authenticate(&headers).await?;
        let page = resources
            .database
            .list_users(query.page_request(resources.config.page_size))
            .await?;

        let mut profiles = Vec::with_capacity(page.results.len());
        for user in &page.results {
            profiles.push(
                resources
                    .database
                    .user_profile(user.clone(), Some(viewer.id))
                    .await?,
            );
        }
        let page = Page {
            count: page.count,
            next: page.next,
            previous: page.previous,
            results: profiles,
        };
        Ok(Json(page).into_response())
    }

    /// Handle GET /api/users/me/
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = resources.auth_manager.authenticate(&headers).await?;
        let profile = resources.database.user_profile(user, None).await?;
        Ok(Json(profile).into_response())
    }

    /// Handle GET /api/users/:id/
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let viewer = resources.auth_manager.authenticate(&headers).await?;
        let user = resources
            .database
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id}")))?;
        let profile = resources.database.user_profile(user, Some(viewer.id)).await?;
        Ok(Json(profile).into_response())
    }

    /// Handle POST /api/users/set_password/
    async fn handle_set_password(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<SetPasswordRequest>,
    ) -> Result<Response, AppError> {
        let user = resources.auth_manager.authenticate(&headers).await?;
        if body.current_password.is_empty() {
            return Err(AppError::missing_field("current_password"));
        }
        if body.new_password.is_empty() {
            return Err(AppError::missing_field("new_password"));
        }

        let stored = resources
            .database
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;
        if !verify_password(&body.current_password, &stored) {
            return Err(AppError::invalid_input("Current password is incorrect")
                .with_details(serde_json::json!({ "field": "current_password" })));
        }

        resources
            .database
            .set_password_hash(user.id, &hash_password(&body.new_password)?)
            .await?;
        Ok(no_content())
    }

    /// Handle GET /api/users/subscriptions/
    async fn handle_subscriptions(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<SubscriptionsQuery>,
    ) -> Result<Response, AppError> {
        let user = resources.auth_manager.authenticate(&headers).await?;
        let request = PaginationQuery {
            page: query.page,
            limit: query.limit,
        }
        .page_request(resources.config.page_size);
        let page = resources
            .database
            .list_subscriptions(user.id, request, query.recipes_limit())
            .await?;
        Ok(Json(page).into_response())
    }

    /// Handle POST /api/users/:id/subscribe/
    async fn handle_subscribe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(author_id): Path<i64>,
        Query(query): Query<SubscribeQuery>,
    ) -> Result<Response, AppError> {
        let user = resources.auth_manager.authenticate(&headers).await?;
        if resources.database.get_user(author_id).await?.is_none() {
            return Err(AppError::not_found(format!("User {author_id}")));
        }

        resources.database.subscribe(user.id, author_id).await?;
        let recipes_limit = SubscriptionsQuery {
            recipes_limit: query.recipes_limit,
            ..SubscriptionsQuery::default()
        }
        .recipes_limit();
        let entry = resources
            .database
            .subscription_entry(author_id, recipes_limit)
            .await?;
        Ok((StatusCode::CREATED, Json(entry)).into_response())
    }

    /// Handle DELETE /api/users/:id/subscribe/
    async fn handle_unsubscribe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(author_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let user = resources.auth_manager.authenticate(&headers).await?;
        if resources.database.get_user(author_id).await?.is_none() {
            return Err(AppError::not_found(format!("User {author_id}")));
        }

        resources.database.unsubscribe(user.id, author_id).await?;
        Ok(no_content())
    }
}

fn username_regex() -> Option<&'static Regex> {
    static USERNAME_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[\w.@+-]+$").ok())
        .as_ref()
}

fn require(field: &str, value: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::missing_field(field));
    }
    if value.trim().chars().count() > max_len {
        return Err(AppError::invalid_input(format!(
            "Field '{field}' must be at most {max_len} characters"
        ))
        .with_details(serde_json::json!({ "field": field })));
    }
    Ok(())
}

/// Check registration fields before hashing the password
fn validate_registration(body: &RegisterRequest) -> Result<(), AppError> {
    require("email", &body.email, limits::EMAIL_MAX_LEN)?;
    require("username", &body.username, limits::USER_NAME_MAX_LEN)?;
    require("first_name", &body.first_name, limits::USER_NAME_MAX_LEN)?;
    require("last_name", &body.last_name, limits::USER_NAME_MAX_LEN)?;
    if body.password.is_empty() {
        return Err(AppError::missing_field("password"));
    }

    let email = body.email.trim();
    let well_formed_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !well_formed_email {
        return Err(AppError::invalid_input("Enter a valid email address")
            .with_details(serde_json::json!({ "field": "email" })));
    }

    let username_ok = username_regex().is_some_and(|re| re.is_match(body.username.trim()));
    if !username_ok {
        return Err(AppError::invalid_input(
            "Username may contain only letters, digits and @/./+/-/_",
        )
        .with_details(serde_json::json!({ "field": "username" })));
    }
    Ok(())
}
