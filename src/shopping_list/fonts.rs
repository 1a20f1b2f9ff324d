// ABOUTME: Process-wide font table for shopping list documents
// ABOUTME: Idempotent check-then-insert registration of TrueType files and the bundled font
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Font Registry
//!
//! Fonts are loaded once and kept until process shutdown. Registering a font
//! whose source is already present returns the stored entry without touching
//! the filesystem again.
//!
//! Entries are keyed by source: the bundled font has one key, and a file font
//! is keyed by its absolute path, so `a/Arial.ttf` and `b/Arial.ttf` are
//! distinct fonts. The display identifier of a file font is its file stem
//! (`fonts/Arial.ttf` is `Arial`).
//!
//! Every font is parsed as TrueType on registration. Unparseable data is
//! rejected and never enters the table.

use dashmap::DashMap;
use foodgram_core::constants::document;
use foodgram_core::errors::{AppError, AppResult};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// DejaVu Sans, covers Latin and Cyrillic
static BUNDLED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Where the document font comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// A TrueType file on disk
    File(PathBuf),
    /// The Unicode font compiled into the binary
    Bundled,
}

impl FontSource {
    /// Human readable font name used in logs and errors
    #[must_use]
    pub fn font_id(&self) -> String {
        match self {
            Self::File(path) => font_id_for_path(path),
            Self::Bundled => document::BUNDLED_FONT_NAME.to_owned(),
        }
    }

    /// Key the font is registered under
    #[must_use]
    pub fn registry_key(&self) -> String {
        match self {
            Self::File(path) => format!("file:{}", absolute_path(path).display()),
            Self::Bundled => format!("bundled:{}", document::BUNDLED_FONT_NAME),
        }
    }
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Bundled => write!(f, "bundled {}", document::BUNDLED_FONT_NAME),
        }
    }
}

/// A font held by the registry
#[derive(Debug, Clone)]
pub struct RegisteredFont {
    /// Display name
    pub id: String,
    /// Where the font was loaded from
    pub source: FontSource,
    /// TrueType bytes
    pub data: Arc<[u8]>,
}

impl RegisteredFont {
    /// Characters of `texts` the font has no glyph for, in order of first appearance
    ///
    /// # Errors
    ///
    /// Returns `FONT_RESOURCE_UNAVAILABLE` if the font data cannot be parsed
    pub fn missing_glyphs<'a>(
        &self,
        texts: impl IntoIterator<Item = &'a str>,
    ) -> AppResult<Vec<char>> {
        let face = parse_face(&self.id, &self.data)?;
        let mut missing: Vec<char> = Vec::new();
        for ch in texts.into_iter().flat_map(str::chars) {
            if face.glyph_index(ch).is_none() && !missing.contains(&ch) {
                missing.push(ch);
            }
        }
        Ok(missing)
    }

    /// Fail unless every character of every text has a glyph
    ///
    /// # Errors
    ///
    /// Returns `FONT_RESOURCE_UNAVAILABLE` naming the uncovered characters
    pub fn ensure_covers<'a>(&self, texts: impl IntoIterator<Item = &'a str>) -> AppResult<()> {
        let missing = self.missing_glyphs(texts)?;
        if missing.is_empty() {
            return Ok(());
        }

        let listed: Vec<String> = missing
            .iter()
            .map(|ch| format!("U+{:04X}", u32::from(*ch)))
            .collect();
        Err(AppError::font_unavailable(
            &self.id,
            format!("no glyph for {}", listed.join(", ")),
        ))
    }
}

/// Mapping from font source to loaded font
#[derive(Debug, Default)]
pub struct FontRegistry {
    fonts: DashMap<String, RegisteredFont>,
}

impl FontRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a font, or return the already registered one
    ///
    /// # Errors
    ///
    /// Returns `FONT_RESOURCE_UNAVAILABLE` if a file font cannot be read, or
    /// if the font data is not a parseable TrueType font
    pub fn register(&self, source: &FontSource) -> AppResult<RegisteredFont> {
        let key = source.registry_key();
        let id = source.font_id();
        if let Some(existing) = self.fonts.get(&key) {
            debug!(font = %id, key = %key, already_registered = true, "Font registration skipped");
            return Ok(existing.clone());
        }

        let data = match source {
            FontSource::File(path) => load_font_file(&id, path)?,
            FontSource::Bundled => Arc::from(BUNDLED_FONT),
        };
        parse_face(&id, &data)?;

        // A concurrent registration of the same source may have won the race; keep its entry.
        let font = self
            .fonts
            .entry(key.clone())
            .or_insert_with(|| RegisteredFont {
                id: id.clone(),
                source: source.clone(),
                data,
            })
            .clone();
        info!(font = %id, key = %key, already_registered = false, "Font registered");
        Ok(font)
    }

    /// Look up a registered font
    #[must_use]
    pub fn get(&self, source: &FontSource) -> Option<RegisteredFont> {
        self.fonts
            .get(&source.registry_key())
            .map(|font| font.clone())
    }

    /// Whether a font source is registered
    #[must_use]
    pub fn contains(&self, source: &FontSource) -> bool {
        self.fonts.contains_key(&source.registry_key())
    }

    /// Number of registered fonts
    #[must_use]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Whether no font is registered yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

static FONT_REGISTRY: OnceLock<Arc<FontRegistry>> = OnceLock::new();

/// Get the process-wide font registry, created on first use
///
/// Tests that need isolation should build a local `FontRegistry::new()` instead.
#[must_use]
pub fn global_font_registry() -> Arc<FontRegistry> {
    FONT_REGISTRY
        .get_or_init(|| Arc::new(FontRegistry::new()))
        .clone()
}

fn font_id_for_path(path: &Path) -> String {
    path.file_stem().map_or_else(
        || path.display().to_string(),
        |stem| stem.to_string_lossy().into_owned(),
    )
}

fn absolute_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
}

fn parse_face<'a>(id: &str, data: &'a [u8]) -> AppResult<ttf_parser::Face<'a>> {
    ttf_parser::Face::parse(data, 0)
        .map_err(|e| AppError::font_unavailable(id, format!("not a TrueType font: {e}")))
}

fn load_font_file(id: &str, path: &Path) -> AppResult<Arc<[u8]>> {
    let bytes = std::fs::read(path).map_err(|e| {
        AppError::font_unavailable(id, format!("cannot read {}: {e}", path.display()))
    })?;
    if bytes.is_empty() {
        return Err(AppError::font_unavailable(
            id,
            format!("{} is empty", path.display()),
        ));
    }
    Ok(Arc::from(bytes))
}
