// ABOUTME: User account and public profile models
// ABOUTME: Profiles add the viewer-dependent subscription flag; subscriptions add recipe previews
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::RecipeSummary;

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Login e-mail, unique
    pub email: String,
    /// Public handle, unique
    pub username: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

/// A user as seen by another (possibly anonymous) user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account fields
    #[serde(flatten)]
    pub user: User,
    /// Whether the viewer is subscribed to this user
    pub is_subscribed: bool,
}

impl UserProfile {
    /// Wrap a user with the viewer's subscription state
    #[must_use]
    pub const fn new(user: User, is_subscribed: bool) -> Self {
        Self {
            user,
            is_subscribed,
        }
    }
}

/// An author the viewer follows, with a preview of their recipes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Author profile, always subscribed from the viewer's side
    #[serde(flatten)]
    pub author: UserProfile,
    /// Newest recipes first, possibly truncated by `recipes_limit`
    pub recipes: Vec<RecipeSummary>,
    /// Total number of recipes by the author
    pub recipes_count: u64,
}
