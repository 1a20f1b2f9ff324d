// ABOUTME: Application constants organized by domain
// ABOUTME: Field limits, defaults, environment variable names and document layout values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Pure data constants grouped by domain. Runtime-tunable values have their
//! defaults here and are overridden through [`env_vars`].

/// Service identity used in logs
pub mod service_names {
    /// Service name for structured logging
    pub const FOODGRAM_SERVER: &str = "foodgram-server";
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8000;
}

/// Field length limits matching the relational schema
pub mod limits {
    /// Max length of recipe, tag and ingredient names
    pub const NAME_MAX_LEN: usize = 200;
    /// Max length of a username and first/last names
    pub const USER_NAME_MAX_LEN: usize = 150;
    /// Max length of an e-mail address
    pub const EMAIL_MAX_LEN: usize = 254;
    /// Minimum recipe cooking time in minutes
    pub const MIN_COOKING_TIME: u32 = 1;
    /// Minimum ingredient amount
    pub const MIN_AMOUNT: u32 = 1;
    /// Default page size for paginated lists
    pub const DEFAULT_PAGE_SIZE: u32 = 6;
    /// Upper bound on the `limit` query parameter
    pub const MAX_PAGE_SIZE: u32 = 100;
    /// Length in bytes of an API token before hex encoding
    pub const AUTH_TOKEN_BYTES: usize = 20;
}

/// Shopping list document defaults
pub mod document {
    /// Attachment filename offered to the client
    pub const SHOPPING_LIST_FILENAME: &str = "shopping_cart.pdf";
    /// MIME type of the rendered document
    pub const PDF_CONTENT_TYPE: &str = "application/pdf";
    /// Default heading drawn at the top of the first page
    pub const DEFAULT_HEADING: &str = "Список покупок:";
    /// Default point size for heading and body
    pub const DEFAULT_FONT_SIZE: f32 = 12.0;
    /// Name of the bundled Unicode font used when no font file is configured
    pub const BUNDLED_FONT_NAME: &str = "DejaVuSans";
    /// A4 width in millimetres
    pub const A4_WIDTH_MM: f32 = 210.0;
    /// A4 height in millimetres
    pub const A4_HEIGHT_MM: f32 = 297.0;
    /// Heading x offset in points
    pub const HEADING_X_PT: f32 = 200.0;
    /// Heading y offset in points, measured from the bottom edge
    pub const TOP_Y_PT: f32 = 800.0;
    /// Body line x offset in points
    pub const LINE_X_PT: f32 = 100.0;
    /// Vertical distance between consecutive lines in points
    pub const LINE_STEP_PT: f32 = 20.0;
    /// Lowest y a line may be drawn at when pagination is enabled
    pub const BOTTOM_MARGIN_PT: f32 = 40.0;
}

/// Environment variable names
pub mod env_vars {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Database connection URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Comma-separated CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Directory for uploaded media
    pub const MEDIA_ROOT: &str = "MEDIA_ROOT";
    /// Default page size
    pub const PAGE_SIZE: &str = "PAGE_SIZE";
    /// Directory searched for the PDF font file
    pub const PDF_FONTS_DIR: &str = "PDF_FONTS_DIR";
    /// TrueType font file used by the shopping list document
    pub const PDF_FONTS_FILE: &str = "PDF_FONTS_FILE";
    /// Point size used by the shopping list document
    pub const PDF_FONTS_FONTSIZE: &str = "PDF_FONTS_FONTSIZE";
    /// Heading text of the shopping list document
    pub const PDF_HEADING: &str = "PDF_HEADING";
    /// Enables page breaks in the shopping list document
    pub const PDF_PAGINATE: &str = "PDF_PAGINATE";
    /// Shopping list aggregation key (`name` or `name_and_unit`)
    pub const SHOPPING_LIST_KEY: &str = "SHOPPING_LIST_KEY";
}

/// Default values for configuration
pub mod defaults {
    /// Default database URL
    pub const DATABASE_URL: &str = "sqlite:./data/foodgram.db";
    /// Default media directory
    pub const MEDIA_ROOT: &str = "./media";
    /// URL prefix media files are served under
    pub const MEDIA_URL: &str = "/media";
}
