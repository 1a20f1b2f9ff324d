// ABOUTME: Token authentication route handlers
// ABOUTME: Exchanges e-mail and password for an API token and revokes it on logout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use foodgram_core::errors::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::no_content;
use crate::resources::ServerResources;

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Account e-mail
    #[serde(default)]
    pub email: String,
    /// Account password
    #[serde(default)]
    pub password: String,
}

/// Login response with token
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Token to send as `Authorization: Token <auth_token>`
    pub auth_token: String,
}

/// Authentication routes implementation
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create token login and logout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/token/login/", post(Self::handle_login))
            .route("/api/auth/token/logout/", post(Self::handle_logout))
            .with_state(resources)
    }

    /// Handle POST /api/auth/token/login/
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        if body.email.trim().is_empty() {
            return Err(AppError::missing_field("email"));
        }
        if body.password.is_empty() {
            return Err(AppError::missing_field("password"));
        }

        let auth_token = resources
            .auth_manager
            .login(body.email.trim(), &body.password)
            .await?;
        Ok((StatusCode::OK, Json(LoginResponse { auth_token })).into_response())
    }

    /// Handle POST /api/auth/token/logout/
    async fn handle_logout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = resources.auth_manager.authenticate(&headers).await?;
        resources.auth_manager.logout(user.id).await?;
        Ok(no_content())
    }
}
