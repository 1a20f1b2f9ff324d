// ABOUTME: Tag catalog database operations
// ABOUTME: Tags are read-only through the API; creation exists for seeding and tests

use super::Database;
use foodgram_core::errors::{AppError, AppResult};
use foodgram_core::models::Tag;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

impl Database {
    /// Create the tags table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_tags(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS tags (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL,
                color TEXT UNIQUE NOT NULL,
                slug TEXT UNIQUE NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a tag
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` if the name, color or slug is taken
    pub async fn create_tag(&self, name: &str, color: &str, slug: &str) -> AppResult<Tag> {
        let taken: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tags WHERE name = $1 OR color = $2 OR slug = $3",
        )
        .bind(name)
        .bind(color)
        .bind(slug)
        .fetch_one(&self.pool)
        .await?;
        if taken > 0 {
            return Err(AppError::already_exists(format!("Tag '{slug}' already exists")));
        }

        let id = sqlx::query("INSERT INTO tags (name, color, slug) VALUES ($1, $2, $3)")
            .bind(name)
            .bind(color)
            .bind(slug)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        Ok(Tag {
            id,
            name: name.to_owned(),
            color: color.to_owned(),
            slug: slug.to_owned(),
        })
    }

    /// List every tag in id order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_tags(&self) -> AppResult<Vec<Tag>> {
        let rows = sqlx::query("SELECT id, name, color, slug FROM tags ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_tag).collect()
    }

    /// Get a tag by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_tag(&self, tag_id: i64) -> AppResult<Option<Tag>> {
        let row = sqlx::query("SELECT id, name, color, slug FROM tags WHERE id = $1")
            .bind(tag_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_tag).transpose()
    }
}

pub(super) fn row_to_tag(row: &SqliteRow) -> AppResult<Tag> {
    Ok(Tag {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        color: row.try_get("color")?,
        slug: row.try_get("slug")?,
    })
}
