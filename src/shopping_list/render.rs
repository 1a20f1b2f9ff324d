// ABOUTME: Shopping list document renderer producing PDF bytes with printpdf
// ABOUTME: Pure page layout plus a one-shot drawing pass using the registered font
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Document Renderer
//!
//! Rendering happens in two steps. [`layout`] places the heading and every
//! line on pages in PDF points, measured from the bottom-left corner.
//! [`DocumentRenderer::render`] registers the configured font and draws that
//! layout. Either the whole document is produced or an error is returned:
//! text containing a character the font has no glyph for is refused before
//! anything is drawn.
//!
//! Without pagination every line goes on the first page, even when it falls
//! below the bottom edge.

use foodgram_core::constants::document;
use foodgram_core::errors::{AppError, AppResult};
use printpdf::{IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};
use std::sync::Arc;
use tracing::debug;

use super::fonts::{global_font_registry, FontRegistry, FontSource, RegisteredFont};

const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Page size and text positions, in points unless noted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page width in millimetres
    pub width_mm: f32,
    /// Page height in millimetres
    pub height_mm: f32,
    /// Heading x offset
    pub heading_x: f32,
    /// Heading y offset, also the top of continuation pages
    pub top_y: f32,
    /// Body line x offset
    pub line_x: f32,
    /// Distance between consecutive lines
    pub line_step: f32,
    /// Lowest y a line may use when paginating
    pub bottom_margin: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width_mm: document::A4_WIDTH_MM,
            height_mm: document::A4_HEIGHT_MM,
            heading_x: document::HEADING_X_PT,
            top_y: document::TOP_Y_PT,
            line_x: document::LINE_X_PT,
            line_step: document::LINE_STEP_PT,
            bottom_margin: document::BOTTOM_MARGIN_PT,
        }
    }
}

/// Renderer settings
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Font to register and draw with
    pub font: FontSource,
    /// Point size for heading and body
    pub font_size: f32,
    /// Heading text
    pub heading: String,
    /// Page geometry
    pub page: PageGeometry,
    /// Start a new page at the bottom margin
    pub paginate: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font: FontSource::Bundled,
            font_size: document::DEFAULT_FONT_SIZE,
            heading: document::DEFAULT_HEADING.to_owned(),
            page: PageGeometry::default(),
            paginate: false,
        }
    }
}

/// A piece of text at a fixed position
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    /// Text to draw
    pub text: String,
    /// Horizontal offset in points
    pub x: f32,
    /// Vertical offset in points from the bottom edge
    pub y: f32,
}

/// Everything drawn on one page, in drawing order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    /// Heading and lines
    pub items: Vec<PlacedText>,
}

/// Place the heading and lines on pages
///
/// Always returns at least one page holding the heading.
#[must_use]
pub fn layout(lines: &[String], config: &RenderConfig) -> Vec<PageLayout> {
    let geometry = &config.page;
    let mut pages = vec![PageLayout {
        items: vec![PlacedText {
            text: config.heading.clone(),
            x: geometry.heading_x,
            y: geometry.top_y,
        }],
    }];
    let mut y = geometry.top_y;

    for line in lines {
        y -= geometry.line_step;
        if config.paginate && y < geometry.bottom_margin {
            pages.push(PageLayout::default());
            y = geometry.top_y;
        }
        if let Some(page) = pages.last_mut() {
            page.items.push(PlacedText {
                text: line.clone(),
                x: geometry.line_x,
                y,
            });
        }
    }

    pages
}

/// Renders shopping lists into PDF documents
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    config: RenderConfig,
    registry: Arc<FontRegistry>,
}

impl DocumentRenderer {
    /// Create a renderer using the process-wide font registry
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self::with_registry(config, global_font_registry())
    }

    /// Create a renderer with its own font registry
    #[must_use]
    pub const fn with_registry(config: RenderConfig, registry: Arc<FontRegistry>) -> Self {
        Self { config, registry }
    }

    /// Renderer settings
    #[must_use]
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Font registry used by this renderer
    #[must_use]
    pub const fn registry(&self) -> &Arc<FontRegistry> {
        &self.registry
    }

    /// Render the heading and lines into PDF bytes
    ///
    /// # Errors
    ///
    /// Returns `FONT_RESOURCE_UNAVAILABLE` if the font cannot be registered or
    /// embedded or lacks a glyph used by the text, and `INTERNAL_ERROR` if the
    /// document cannot be serialized
    pub fn render(&self, lines: &[String]) -> AppResult<Vec<u8>> {
        let font = self.registry.register(&self.config.font)?;
        font.ensure_covers(
            std::iter::once(self.config.heading.as_str()).chain(lines.iter().map(String::as_str)),
        )?;
        let pages = layout(lines, &self.config);
        let geometry = &self.config.page;

        let (doc, first_page, first_layer) = PdfDocument::new(
            self.config.heading.as_str(),
            Mm(geometry.width_mm),
            Mm(geometry.height_mm),
            layer_name(1),
        );
        let font_ref = embed_font(&doc, &font)?;

        let mut first = Some((first_page, first_layer));
        for (index, page) in pages.iter().enumerate() {
            let (page_index, layer_index) = first.take().unwrap_or_else(|| {
                doc.add_page(
                    Mm(geometry.width_mm),
                    Mm(geometry.height_mm),
                    layer_name(index + 1),
                )
            });
            let layer = doc.get_page(page_index).get_layer(layer_index);
            for item in &page.items {
                layer.use_text(
                    item.text.as_str(),
                    self.config.font_size,
                    points_to_mm(item.x),
                    points_to_mm(item.y),
                    &font_ref,
                );
            }
        }

        let bytes = doc
            .save_to_bytes()
            .map_err(|e| AppError::internal(format!("Failed to serialize PDF document: {e}")))?;
        debug!(
            font = %font.id,
            pages = pages.len(),
            lines = lines.len(),
            bytes = bytes.len(),
            "Shopping list document rendered"
        );
        Ok(bytes)
    }
}

fn embed_font(doc: &PdfDocumentReference, font: &RegisteredFont) -> AppResult<IndirectFontRef> {
    doc.add_external_font(font.data.as_ref())
        .map_err(|e| AppError::font_unavailable(&font.id, e.to_string()))
}

/// Layer name for a 1-based page number
fn layer_name(page: usize) -> String {
    format!("Page {page}")
}

fn points_to_mm(points: f32) -> Mm {
    Mm(points / POINTS_PER_MM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_to_mm() {
        let mm = points_to_mm(72.0);
        assert!((mm.0 - 25.4).abs() < 1e-3);
    }

    #[test]
    fn test_layer_names_follow_page_numbers() {
        assert_eq!(layer_name(1), "Page 1");
        assert_eq!(layer_name(12), "Page 12");
    }

    #[test]
    fn test_heading_only_layout() {
        let pages = layout(&[], &RenderConfig::default());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].items.len(), 1);
        assert!((pages[0].items[0].y - document::TOP_Y_PT).abs() < f32::EPSILON);
    }
}
