// ABOUTME: Domain models shared between persistence, services and routes
// ABOUTME: Re-exports user, catalog, recipe and shopping cart types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Shopping cart snapshot and ingredient lines
pub mod cart;
/// Tags and ingredients catalog
pub mod catalog;
/// Recipes and their ingredient associations
pub mod recipe;
/// Users and public profiles
pub mod user;

pub use cart::{CartEntry, CartSnapshot, IngredientLine};
pub use catalog::{Ingredient, Tag};
pub use recipe::{Recipe, RecipeIngredient, RecipeSummary};
pub use user::{Subscription, User, UserProfile};
