// ABOUTME: Tag and ingredient catalog models
// ABOUTME: Both are read-only through the API and seeded by administrators or the import tool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// A recipe tag such as "breakfast"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier
    pub id: i64,
    /// Display name, unique
    pub name: String,
    /// HEX color, `#RRGGBB`
    pub color: String,
    /// URL slug used in recipe filters, unique
    pub slug: String,
}

/// A catalog ingredient with its measurement unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique identifier
    pub id: i64,
    /// Ingredient name as stored (case-sensitive)
    pub name: String,
    /// Measurement unit, e.g. "g"
    pub measurement_unit: String,
}
