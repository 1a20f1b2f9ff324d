// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Shopping list export and recipe image storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Business logic that route handlers delegate to, kept free of HTTP types.

/// Recipe image storage for data-URI uploads
pub mod media;

/// Shopping list export: cart snapshot, aggregation and PDF rendering
pub mod shopping_list;

pub use media::MediaStorage;
pub use shopping_list::{ShoppingListDocument, ShoppingListService};
