// ABOUTME: Recipe image storage for base64 data-URI uploads
// ABOUTME: Decodes `data:image/<ext>;base64,...` payloads into files under the media root
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use base64::{engine::general_purpose::STANDARD, Engine};
use foodgram_core::constants::defaults;
use foodgram_core::errors::{AppError, AppResult};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Subdirectory of the media root holding recipe images
pub const RECIPE_IMAGES_DIR: &str = "recipes/images";

const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpeg", "jpg", "gif", "webp"];

/// Stores uploaded images and maps them to public URLs
#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    /// Create storage rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory files are written to
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decode a data URI and write it as a new recipe image, returning its URL
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for a malformed URI, unsupported image type or
    /// bad base64, and `STORAGE_ERROR` if the file cannot be written
    pub async fn save_data_uri(&self, data_uri: &str) -> AppResult<String> {
        let (extension, bytes) = decode_data_uri(data_uri)?;
        let relative = format!("{RECIPE_IMAGES_DIR}/{}.{extension}", Uuid::new_v4());
        let path = self.root.join(&relative);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::storage(format!("Cannot create {}: {e}", parent.display())))?;
        }
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| AppError::storage(format!("Cannot write {}: {e}", path.display())))?;

        debug!(path = %path.display(), bytes = bytes.len(), "Recipe image stored");
        Ok(format!("{}/{relative}", defaults::MEDIA_URL))
    }
}

/// Split a `data:image/<ext>;base64,<payload>` URI into extension and bytes
///
/// # Errors
///
/// Returns `INVALID_INPUT` when the URI is malformed or not a supported image
pub fn decode_data_uri(data_uri: &str) -> AppResult<(String, Vec<u8>)> {
    let invalid = || {
        AppError::invalid_input("Image must be a base64 data URI (data:image/<type>;base64,...)")
            .with_details(serde_json::json!({ "field": "image" }))
    };

    let rest = data_uri.strip_prefix("data:image/").ok_or_else(invalid)?;
    let (extension, payload) = rest.split_once(";base64,").ok_or_else(invalid)?;
    let extension = extension.to_ascii_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::invalid_input(format!("Unsupported image type '{extension}'"))
            .with_details(serde_json::json!({ "field": "image" })));
    }

    let bytes = STANDARD.decode(payload.trim()).map_err(|_| invalid())?;
    if bytes.is_empty() {
        return Err(invalid());
    }
    Ok((extension, bytes))
}
