// ABOUTME: Recipe models in their full and summary representations
// ABOUTME: Includes the recipe-ingredient association with its amount
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::{Tag, UserProfile};

/// An ingredient attached to a recipe, as serialized to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Catalog ingredient identifier
    pub id: i64,
    /// Ingredient name
    pub name: String,
    /// Measurement unit
    pub measurement_unit: String,
    /// Amount in `measurement_unit`, at least 1
    pub amount: u32,
}

/// A recipe with everything the catalog page shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier
    pub id: i64,
    /// Author profile
    pub author: UserProfile,
    /// Tags in tag id order
    pub tags: Vec<Tag>,
    /// Ingredients in stored order
    pub ingredients: Vec<RecipeIngredient>,
    /// Title
    pub name: String,
    /// Image URL
    pub image: String,
    /// Description / instructions
    pub text: String,
    /// Cooking time in minutes, at least 1
    pub cooking_time: u32,
    /// Whether the viewer has favorited this recipe
    pub is_favorited: bool,
    /// Whether this recipe is in the viewer's shopping cart
    pub is_in_shopping_cart: bool,
}

/// Short recipe form used by favorites, the cart and subscriptions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    /// Unique identifier
    pub id: i64,
    /// Title
    pub name: String,
    /// Image URL
    pub image: String,
    /// Cooking time in minutes
    pub cooking_time: u32,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            cooking_time: recipe.cooking_time,
        }
    }
}
