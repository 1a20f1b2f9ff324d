// ABOUTME: Favorite recipe database operations
// ABOUTME: Add, remove and membership checks on the user-recipe favorites relation

use super::Database;
use foodgram_core::errors::{AppError, AppResult};

impl Database {
    /// Create the favorites table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_favorites(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS favorites (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                UNIQUE(user_id, recipe_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Add a recipe to the user's favorites
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` if it is already a favorite
    pub async fn add_favorite(&self, user_id: i64, recipe_id: i64) -> AppResult<()> {
        let inserted = sqlx::query("INSERT OR IGNORE INTO favorites (user_id, recipe_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(recipe_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if inserted == 0 {
            return Err(AppError::already_exists("Recipe is already in favorites"));
        }
        Ok(())
    }

    /// Remove a recipe from the user's favorites
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` if it was not a favorite
    pub async fn remove_favorite(&self, user_id: i64, recipe_id: i64) -> AppResult<()> {
        let deleted = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id)
            .bind(recipe_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(AppError::invalid_input("Recipe is not in favorites"));
        }
        Ok(())
    }

    /// Whether the recipe is one of the user's favorites
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn is_favorited(&self, user_id: i64, recipe_id: i64) -> AppResult<bool> {
        let exists: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM favorites WHERE user_id = $1 AND recipe_id = $2)",
        )
        .bind(user_id)
        .bind(recipe_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists != 0)
    }
}
