// ABOUTME: Shopping list export pipeline: aggregation engine, font registry and PDF renderer
// ABOUTME: Turns a cart snapshot into merged ingredient lines and a downloadable document
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Shopping List
//!
//! The export pipeline is cart snapshot → [`aggregate`] → [`DocumentRenderer`].
//! Aggregation is pure; rendering only touches the process-wide font table.

/// Merging of ingredient lines across recipes
pub mod aggregation;
/// Process-wide font table
pub mod fonts;
/// PDF layout and drawing
pub mod render;

pub use aggregation::{
    aggregate, format_entry, shopping_list_lines, AggregatedEntry, AggregationKey,
};
pub use fonts::{global_font_registry, FontRegistry, FontSource, RegisteredFont};
pub use render::{layout, DocumentRenderer, PageGeometry, PageLayout, PlacedText, RenderConfig};
