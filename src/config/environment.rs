// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, database URL, media paths and shopping list document options from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use anyhow::{Context, Result};
use foodgram_core::constants::{defaults, document, env_vars, limits, ports};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::info;

use crate::shopping_list::{AggregationKey, FontSource, PageGeometry, RenderConfig};

/// Type-safe database configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path of the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string; anything without the `sqlite:` scheme is a file path
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        let path_str = path_str.strip_prefix("//").unwrap_or(path_str);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(defaults::DATABASE_URL)
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Shopping list document settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListConfig {
    /// Directory searched for `font_file`
    pub fonts_dir: Option<PathBuf>,
    /// TrueType font file; `None` selects the bundled font
    pub font_file: Option<PathBuf>,
    /// Point size for heading and body
    pub font_size: f32,
    /// Heading text
    pub heading: String,
    /// Start a new page when lines reach the bottom margin
    pub paginate: bool,
    /// How ingredient lines are merged
    pub aggregation_key: AggregationKey,
}

impl Default for ShoppingListConfig {
    fn default() -> Self {
        Self {
            fonts_dir: None,
            font_file: None,
            font_size: document::DEFAULT_FONT_SIZE,
            heading: document::DEFAULT_HEADING.to_owned(),
            paginate: false,
            aggregation_key: AggregationKey::default(),
        }
    }
}

impl ShoppingListConfig {
    /// Resolve the configured font file against the fonts directory
    #[must_use]
    pub fn font_source(&self) -> FontSource {
        match (&self.font_file, &self.fonts_dir) {
            (Some(file), Some(dir)) if file.is_relative() => FontSource::File(dir.join(file)),
            (Some(file), _) => FontSource::File(file.clone()),
            (None, _) => FontSource::Bundled,
        }
    }

    /// Build the renderer configuration
    #[must_use]
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            font: self.font_source(),
            font_size: self.font_size,
            heading: self.heading.clone(),
            page: PageGeometry::default(),
            paginate: self.paginate,
        }
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Database location
    pub database_url: DatabaseUrl,
    /// Allowed CORS origins, `*` for any
    pub cors_allowed_origins: String,
    /// Directory where uploaded images are stored
    pub media_root: PathBuf,
    /// Default page size of paginated lists
    pub page_size: u32,
    /// Shopping list document settings
    pub shopping_list: ShoppingListConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: ports::DEFAULT_HTTP_PORT,
            database_url: DatabaseUrl::default(),
            cors_allowed_origins: "*".to_owned(),
            media_root: PathBuf::from(defaults::MEDIA_ROOT),
            page_size: limits::DEFAULT_PAGE_SIZE,
            shopping_list: ShoppingListConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let http_port = env_var_or(env_vars::HTTP_PORT, &ports::DEFAULT_HTTP_PORT.to_string())
            .parse()
            .context("Invalid HTTP_PORT value")?;
        let page_size: u32 = env_var_or(
            env_vars::PAGE_SIZE,
            &limits::DEFAULT_PAGE_SIZE.to_string(),
        )
        .parse()
        .context("Invalid PAGE_SIZE value")?;
        if page_size == 0 {
            anyhow::bail!("PAGE_SIZE must be at least 1");
        }

        let font_size: f32 = env_var_or(
            env_vars::PDF_FONTS_FONTSIZE,
            &document::DEFAULT_FONT_SIZE.to_string(),
        )
        .parse()
        .context("Invalid PDF_FONTS_FONTSIZE value")?;
        if font_size <= 0.0 || !font_size.is_finite() {
            anyhow::bail!("PDF_FONTS_FONTSIZE must be a positive number");
        }

        let aggregation_key = AggregationKey::parse(&env_var_or(env_vars::SHOPPING_LIST_KEY, "name"))
            .context("Invalid SHOPPING_LIST_KEY value (expected 'name' or 'name_and_unit')")?;

        Ok(Self {
            http_port,
            database_url: DatabaseUrl::parse_url(&env_var_or(
                env_vars::DATABASE_URL,
                defaults::DATABASE_URL,
            )),
            cors_allowed_origins: env_var_or(env_vars::CORS_ALLOWED_ORIGINS, "*"),
            media_root: PathBuf::from(env_var_or(env_vars::MEDIA_ROOT, defaults::MEDIA_ROOT)),
            page_size,
            shopping_list: ShoppingListConfig {
                fonts_dir: env::var(env_vars::PDF_FONTS_DIR).ok().map(PathBuf::from),
                font_file: env::var(env_vars::PDF_FONTS_FILE)
                    .ok()
                    .filter(|f| !f.trim().is_empty())
                    .map(PathBuf::from),
                font_size,
                heading: env_var_or(env_vars::PDF_HEADING, document::DEFAULT_HEADING),
                paginate: env_var_or(env_vars::PDF_PAGINATE, "false")
                    .parse()
                    .context("Invalid PDF_PAGINATE value")?,
                aggregation_key,
            },
        })
    }

    /// One-line summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Foodgram configuration: port={} database={} media_root={} page_size={} font={} font_size={} paginate={} shopping_list_key={}",
            self.http_port,
            self.database_url,
            self.media_root.display(),
            self.page_size,
            self.shopping_list.font_source(),
            self.shopping_list.font_size,
            self.shopping_list.paginate,
            self.shopping_list.aggregation_key.as_str(),
        )
    }
}

/// Read an environment variable with a default
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_parsing() {
        assert_eq!(DatabaseUrl::parse_url("sqlite::memory:"), DatabaseUrl::Memory);
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/foodgram.db").to_connection_string(),
            "sqlite:./data/foodgram.db"
        );
        assert_eq!(
            DatabaseUrl::parse_url("/var/lib/foodgram.db"),
            DatabaseUrl::SQLite {
                path: PathBuf::from("/var/lib/foodgram.db")
            }
        );
    }

    #[test]
    fn test_font_source_resolution() {
        let mut config = ShoppingListConfig::default();
        assert_eq!(config.font_source(), FontSource::Bundled);

        config.font_file = Some(PathBuf::from("Arial.ttf"));
        config.fonts_dir = Some(PathBuf::from("/fonts"));
        assert_eq!(
            config.font_source(),
            FontSource::File(PathBuf::from("/fonts/Arial.ttf"))
        );

        config.font_file = Some(PathBuf::from("/abs/Arial.ttf"));
        assert_eq!(
            config.font_source(),
            FontSource::File(PathBuf::from("/abs/Arial.ttf"))
        );
    }
}
