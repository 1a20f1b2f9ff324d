// ABOUTME: Token authentication and password hashing for the Foodgram API
// ABOUTME: Argon2id password hashes, random hex tokens and Authorization header resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authentication
//!
//! Clients log in with e-mail and password and receive a token, sent back as
//! `Authorization: Token <key>`. Each user has at most one token; logging in
//! again returns the same one until logout deletes it.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use foodgram_core::constants::limits;
use foodgram_core::errors::{AppError, AppResult};
use foodgram_core::models::User;
use http::{header::AUTHORIZATION, HeaderMap};
use rand::Rng;
use std::sync::Arc;
use tracing::debug;

use crate::database::Database;
use crate::logging::AppLogger;

/// Authorization scheme prefix
pub const TOKEN_SCHEME: &str = "Token ";

/// Hash a password for storage using Argon2id with a random salt
///
/// # Errors
///
/// Returns an error if Argon2 password hashing fails
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Argon2 password hashing failed: {e}")))
}

/// Check a password against a stored hash; malformed hashes never match
#[must_use]
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(password_hash) else {
        tracing::error!("Failed to parse stored password hash");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Generate a 40 hex character API token
#[must_use]
pub fn generate_token() -> String {
    let mut bytes = [0u8; limits::AUTH_TOKEN_BYTES];
    rand::thread_rng().fill(&mut bytes);
    hex::encode(bytes)
}

/// Extract the key from a `Token <key>` header value
///
/// # Errors
///
/// Returns `AUTH_INVALID` for another scheme or an empty key
pub fn extract_token(auth_header: &str) -> AppResult<&str> {
    let token = auth_header
        .strip_prefix(TOKEN_SCHEME)
        .ok_or_else(|| AppError::auth_invalid("Invalid authorization header format - must be 'Token <key>'"))?
        .trim();
    if token.is_empty() {
        return Err(AppError::auth_invalid("Empty authentication token"));
    }
    Ok(token)
}

/// Resolves credentials and tokens against the user store
#[derive(Clone)]
pub struct AuthManager {
    database: Arc<Database>,
}

impl AuthManager {
    /// Create an auth manager over the database
    #[must_use]
    pub const fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Exchange e-mail and password for the user's token
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for wrong credentials, as the login form reports them
    pub async fn login(&self, email: &str, password: &str) -> AppResult<String> {
        let invalid = || AppError::invalid_input("Unable to log in with provided credentials");

        let user = self.database.get_user_by_email(email).await?.ok_or_else(invalid)?;
        let password_hash = self
            .database
            .get_password_hash(user.id)
            .await?
            .ok_or_else(invalid)?;
        if !verify_password(password, &password_hash) {
            AppLogger::log_auth_event(user.id, "login", false);
            return Err(invalid());
        }

        let token = self
            .database
            .get_or_create_token(user.id, &generate_token())
            .await?;
        AppLogger::log_auth_event(user.id, "login", true);
        Ok(token)
    }

    /// Delete the user's token
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn logout(&self, user_id: i64) -> AppResult<()> {
        self.database.delete_token(user_id).await?;
        AppLogger::log_auth_event(user_id, "logout", true);
        Ok(())
    }

    /// Resolve the request's user, failing without valid credentials
    ///
    /// # Errors
    ///
    /// Returns `AUTH_REQUIRED` without an Authorization header and
    /// `AUTH_INVALID` for a malformed header or unknown token
    pub async fn authenticate(&self, headers: &HeaderMap) -> AppResult<User> {
        self.authenticate_optional(headers)
            .await?
            .ok_or_else(AppError::auth_required)
    }

    /// Resolve the request's user if credentials were sent
    ///
    /// # Errors
    ///
    /// Returns `AUTH_INVALID` for a malformed header or unknown token
    pub async fn authenticate_optional(&self, headers: &HeaderMap) -> AppResult<Option<User>> {
        let Some(header) = headers.get(AUTHORIZATION) else {
            return Ok(None);
        };
        let header = header
            .to_str()
            .map_err(|_| AppError::auth_invalid("Authorization header is not valid UTF-8"))?;
        let token = extract_token(header)?;

        match self.database.get_user_by_token(token).await? {
            Some(user) => Ok(Some(user)),
            None => {
                debug!("Authentication failed: unknown token");
                Err(AppError::auth_invalid("Invalid token"))
            }
        }
    }
}
