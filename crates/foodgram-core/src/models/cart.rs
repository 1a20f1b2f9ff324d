// ABOUTME: Shopping cart snapshot and ingredient line value types
// ABOUTME: Request-scoped input of the shopping list aggregation engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::RecipeSummary;
use crate::errors::{AppError, AppResult};

/// One (name, unit, amount) triple attached to a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    /// Ingredient name, compared byte-for-byte
    pub name: String,
    /// Measurement unit, compared byte-for-byte
    pub measurement_unit: String,
    /// Positive amount
    pub amount: u32,
}

impl IngredientLine {
    /// Create a line, rejecting a zero amount
    ///
    /// # Errors
    ///
    /// Returns `VALUE_OUT_OF_RANGE` when `amount` is 0
    pub fn new(
        name: impl Into<String>,
        measurement_unit: impl Into<String>,
        amount: u32,
    ) -> AppResult<Self> {
        if amount == 0 {
            return Err(AppError::out_of_range(
                "amount",
                "Ingredient amount must be at least 1",
            ));
        }
        Ok(Self {
            name: name.into(),
            measurement_unit: measurement_unit.into(),
            amount,
        })
    }
}

/// A recipe in the cart together with its ingredient lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Display fields of the recipe
    pub recipe: RecipeSummary,
    /// Ingredient lines in stored order
    pub lines: Vec<IngredientLine>,
}

/// Read-only view of a user's cart, ordered by descending recipe id
///
/// Built fresh for every export and discarded afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Entries in snapshot order
    pub entries: Vec<CartEntry>,
}

impl CartSnapshot {
    /// Wrap entries that are already in snapshot order
    #[must_use]
    pub const fn new(entries: Vec<CartEntry>) -> Self {
        Self { entries }
    }

    /// Whether the cart holds no recipes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recipes in the cart
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// All lines, recipes first then lines, in snapshot order
    pub fn lines(&self) -> impl Iterator<Item = &IngredientLine> {
        self.entries.iter().flat_map(|entry| entry.lines.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_zero_amount_rejected() {
        let err = IngredientLine::new("salt", "g", 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_lines_follow_snapshot_order() {
        let summary = |id| RecipeSummary {
            id,
            name: format!("recipe {id}"),
            image: String::new(),
            cooking_time: 1,
        };
        let snapshot = CartSnapshot::new(vec![
            CartEntry {
                recipe: summary(2),
                lines: vec![IngredientLine::new("b", "g", 1).unwrap()],
            },
            CartEntry {
                recipe: summary(1),
                lines: vec![IngredientLine::new("a", "g", 1).unwrap()],
            },
        ]);
        let names: Vec<_> = snapshot.lines().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }
}
