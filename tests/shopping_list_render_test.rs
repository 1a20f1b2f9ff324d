// ABOUTME: Integration tests for the shopping list document renderer and font registry
// ABOUTME: Covers drawn text, idempotent registration, font failures and pagination
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use foodgram::shopping_list::{
    global_font_registry, layout, DocumentRenderer, FontRegistry, FontSource, RenderConfig,
};
use foodgram_core::constants::document;
use foodgram_core::errors::ErrorCode;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn lines(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("item {i} (g) - {i}")).collect()
}

fn asset_font() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/fonts/DejaVuSans.ttf")
}

/// Install a real TrueType file under `name` in `dir`
fn install_font(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::copy(asset_font(), &path).unwrap();
    path
}

/// The text showing operator printpdf writes for `text` with an embedded font
fn text_operator(font: &[u8], text: &str) -> String {
    let face = ttf_parser::Face::parse(font, 0).unwrap();
    let glyphs: String = text
        .chars()
        .map(|ch| format!("{:04X}", face.glyph_index(ch).unwrap().0))
        .collect();
    format!("<{glyphs}> Tj")
}

fn pdf_contains(pdf: &[u8], needle: &str) -> bool {
    pdf.windows(needle.len()).any(|window| window == needle.as_bytes())
}

fn isolated_renderer(config: RenderConfig) -> DocumentRenderer {
    DocumentRenderer::with_registry(config, Arc::new(FontRegistry::new()))
}

#[test]
fn test_empty_list_renders_heading_only_document() {
    let renderer = isolated_renderer(RenderConfig::default());
    let bytes = renderer.render(&[]).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    let pages = layout(&[], renderer.config());
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].items.len(), 1);
    assert_eq!(pages[0].items[0].text, document::DEFAULT_HEADING);
}

#[test]
fn test_second_render_reuses_registered_font() {
    let renderer = isolated_renderer(RenderConfig::default());
    let first = renderer.render(&lines(3)).unwrap();
    let second = renderer.render(&lines(3)).unwrap();

    assert!(first.starts_with(b"%PDF"));
    assert!(second.starts_with(b"%PDF"));
    assert_eq!(renderer.registry().len(), 1);
    assert!(renderer.registry().contains(&FontSource::Bundled));
}

#[test]
fn test_cyrillic_heading_and_lines_are_drawn() {
    let shopping = vec![
        "мука (г) - 300".to_owned(),
        "яйца (шт) - 2".to_owned(),
        "соль (по вкусу) - 1".to_owned(),
    ];
    let renderer = isolated_renderer(RenderConfig::default());
    let bytes = renderer.render(&shopping).unwrap();

    let font = std::fs::read(asset_font()).unwrap();
    assert!(pdf_contains(
        &bytes,
        &text_operator(&font, document::DEFAULT_HEADING)
    ));
    for line in &shopping {
        assert!(pdf_contains(&bytes, &text_operator(&font, line)), "{line} not drawn");
    }
}

#[test]
fn test_file_font_renders_twice_with_drawn_text() {
    let dir = TempDir::new().unwrap();
    let path = install_font(dir.path(), "Arial.ttf");
    let config = RenderConfig {
        font: FontSource::File(path.clone()),
        heading: "Список покупок:".to_owned(),
        ..RenderConfig::default()
    };
    let renderer = isolated_renderer(config);
    let shopping = vec!["молоко (мл) - 250".to_owned()];

    let first = renderer.render(&shopping).unwrap();
    let second = renderer.render(&shopping).unwrap();

    let font = std::fs::read(&path).unwrap();
    for bytes in [&first, &second] {
        assert!(bytes.starts_with(b"%PDF"));
        assert!(pdf_contains(bytes, &text_operator(&font, "Список покупок:")));
        assert!(pdf_contains(bytes, &text_operator(&font, "молоко (мл) - 250")));
    }
    assert_eq!(renderer.registry().len(), 1);
    assert_eq!(
        renderer.registry().get(&FontSource::File(path)).unwrap().id,
        "Arial"
    );
}

#[test]
fn test_text_outside_font_coverage_is_refused() {
    let renderer = isolated_renderer(RenderConfig::default());
    let err = renderer
        .render(&["рис (г) - 100".to_owned(), "豆腐 (г) - 200".to_owned()])
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::FontResourceUnavailable);
    assert!(err.message.contains("U+8C46"));
}

#[test]
fn test_global_registry_survives_repeated_renders() {
    let first = DocumentRenderer::new(RenderConfig::default());
    let second = DocumentRenderer::new(RenderConfig::default());

    first.render(&lines(1)).unwrap();
    second.render(&lines(1)).unwrap();
    assert!(Arc::ptr_eq(first.registry(), &global_font_registry()));
    assert!(global_font_registry().contains(&FontSource::Bundled));
}

#[test]
fn test_missing_font_file_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let source = FontSource::File(dir.path().join("Missing.ttf"));
    let config = RenderConfig {
        font: source.clone(),
        ..RenderConfig::default()
    };
    let renderer = isolated_renderer(config);

    let err = renderer.render(&lines(2)).unwrap_err();
    assert_eq!(err.code, ErrorCode::FontResourceUnavailable);
    assert_eq!(err.code.http_status(), 500);
    assert!(!renderer.registry().contains(&source));
}

#[test]
fn test_empty_font_file_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Empty.ttf");
    std::fs::write(&path, b"").unwrap();

    let registry = FontRegistry::new();
    let err = registry.register(&FontSource::File(path)).unwrap_err();
    assert_eq!(err.code, ErrorCode::FontResourceUnavailable);
    assert!(registry.is_empty());
}

#[test]
fn test_unparseable_font_file_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Arial.ttf");
    std::fs::write(&path, b"not really a font").unwrap();
    let config = RenderConfig {
        font: FontSource::File(path),
        ..RenderConfig::default()
    };
    let renderer = isolated_renderer(config);

    let err = renderer.render(&lines(2)).unwrap_err();
    assert_eq!(err.code, ErrorCode::FontResourceUnavailable);
    assert!(err.message.contains("Arial"));
    assert!(renderer.registry().is_empty());
}

#[test]
fn test_font_registration_is_check_then_insert() {
    let dir = TempDir::new().unwrap();
    let path = install_font(dir.path(), "Arial.ttf");

    let registry = FontRegistry::new();
    let first = registry.register(&FontSource::File(path.clone())).unwrap();
    assert_eq!(first.id, "Arial");

    // A registered id is served from the table without touching the file
    std::fs::remove_file(&path).unwrap();
    let second = registry.register(&FontSource::File(path)).unwrap();
    assert_eq!(second.id, "Arial");
    assert!(Arc::ptr_eq(&first.data, &second.data));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_fonts_sharing_a_name_are_registered_separately() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("a")).unwrap();
    std::fs::create_dir(dir.path().join("b")).unwrap();
    let first_arial = FontSource::File(install_font(&dir.path().join("a"), "Arial.ttf"));
    let second_arial = FontSource::File(install_font(&dir.path().join("b"), "Arial.ttf"));
    let named_like_bundled = FontSource::File(install_font(dir.path(), "DejaVuSans.ttf"));

    let registry = FontRegistry::new();
    registry.register(&FontSource::Bundled).unwrap();
    let file_font = registry.register(&named_like_bundled).unwrap();
    assert_eq!(file_font.source, named_like_bundled);

    let a = registry.register(&first_arial).unwrap();
    let b = registry.register(&second_arial).unwrap();
    assert_eq!(a.source, first_arial);
    assert_eq!(b.source, second_arial);
    assert_eq!(registry.len(), 4);
}

#[test]
fn test_unpaginated_layout_keeps_single_page() {
    let config = RenderConfig::default();
    let pages = layout(&lines(60), &config);

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].items.len(), 61);

    let first_line = &pages[0].items[1];
    assert!((first_line.x - document::LINE_X_PT).abs() < f32::EPSILON);
    assert!((first_line.y - (document::TOP_Y_PT - document::LINE_STEP_PT)).abs() < f32::EPSILON);

    // Lines keep stepping down past the bottom edge
    let last = pages[0].items.last().unwrap();
    assert!(last.y < 0.0);
}

#[test]
fn test_paginated_layout_breaks_at_bottom_margin() {
    let config = RenderConfig {
        paginate: true,
        ..RenderConfig::default()
    };
    let pages = layout(&lines(60), &config);

    // 800 - 20k >= 40 holds for k = 1..=38
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].items.len(), 1 + 38);
    assert_eq!(pages[1].items.len(), 22);

    let continuation = &pages[1].items[0];
    assert_eq!(continuation.text, "item 38 (g) - 38");
    assert!((continuation.y - document::TOP_Y_PT).abs() < f32::EPSILON);
    assert!(pages
        .iter()
        .flat_map(|page| page.items.iter())
        .all(|item| item.y >= document::BOTTOM_MARGIN_PT));
}

#[test]
fn test_paginated_render_produces_pdf() {
    let config = RenderConfig {
        paginate: true,
        ..RenderConfig::default()
    };
    let bytes = isolated_renderer(config).render(&lines(100)).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
