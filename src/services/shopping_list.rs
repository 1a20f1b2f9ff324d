// ABOUTME: Shopping list export service chaining cart loading, aggregation and rendering
// ABOUTME: Single-shot pipeline returning a PDF attachment or the first error unchanged
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use foodgram_core::constants::document;
use foodgram_core::errors::AppResult;
use std::sync::Arc;

use crate::config::ShoppingListConfig;
use crate::database::CartSnapshotLoader;
use crate::logging::AppLogger;
use crate::shopping_list::{shopping_list_lines, AggregationKey, DocumentRenderer};

/// A rendered shopping list ready to be sent as an attachment
#[derive(Debug, Clone)]
pub struct ShoppingListDocument {
    /// Suggested attachment filename
    pub filename: &'static str,
    /// MIME type of `bytes`
    pub content_type: &'static str,
    /// Document contents
    pub bytes: Vec<u8>,
    /// Number of aggregated lines printed
    pub entries: usize,
}

/// Exports a user's cart as a shopping list document
#[derive(Clone)]
pub struct ShoppingListService {
    loader: Arc<dyn CartSnapshotLoader>,
    renderer: DocumentRenderer,
    key: AggregationKey,
}

impl ShoppingListService {
    /// Create a service from its collaborators
    #[must_use]
    pub fn new(
        loader: Arc<dyn CartSnapshotLoader>,
        renderer: DocumentRenderer,
        key: AggregationKey,
    ) -> Self {
        Self {
            loader,
            renderer,
            key,
        }
    }

    /// Create a service using the process-wide font registry
    #[must_use]
    pub fn from_config(loader: Arc<dyn CartSnapshotLoader>, config: &ShoppingListConfig) -> Self {
        Self::new(
            loader,
            DocumentRenderer::new(config.render_config()),
            config.aggregation_key,
        )
    }

    /// Load, aggregate and render the user's shopping list
    ///
    /// An empty cart produces a heading-only document.
    ///
    /// # Errors
    ///
    /// Returns the loader's error unchanged, or `FONT_RESOURCE_UNAVAILABLE`
    /// when the configured font cannot be loaded or lacks a glyph the list uses
    pub async fn export(&self, user_id: i64) -> AppResult<ShoppingListDocument> {
        let snapshot = self.loader.load_cart_snapshot(user_id).await?;
        let lines = shopping_list_lines(&snapshot, self.key);
        let bytes = self.renderer.render(&lines)?;

        AppLogger::log_shopping_list_export(user_id, snapshot.len(), lines.len(), bytes.len());
        Ok(ShoppingListDocument {
            filename: document::SHOPPING_LIST_FILENAME,
            content_type: document::PDF_CONTENT_TYPE,
            bytes,
            entries: lines.len(),
        })
    }
}
