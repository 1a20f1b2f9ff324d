// ABOUTME: Shopping cart database operations and the cart snapshot loader
// ABOUTME: Cart membership plus the read-only recipe and ingredient view used for exports

use super::{CartSnapshotLoader, Database};
use async_trait::async_trait;
use foodgram_core::errors::{AppError, AppResult};
use foodgram_core::models::{CartEntry, CartSnapshot, RecipeSummary};
use sqlx::Row;

impl Database {
    /// Create the shopping cart table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_shopping_cart(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS shopping_cart (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                UNIQUE(user_id, recipe_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_shopping_cart_user ON shopping_cart(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Add a recipe to the user's cart
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` if it is already in the cart
    pub async fn add_to_shopping_cart(&self, user_id: i64, recipe_id: i64) -> AppResult<()> {
        let inserted = sqlx::query(
            "INSERT OR IGNORE INTO shopping_cart (user_id, recipe_id) VALUES ($1, $2)",
        )
        .bind(user_id)
        .bind(recipe_id)
        .execute(&self.pool)
        .await?
        .rows_affected();
        if inserted == 0 {
            return Err(AppError::already_exists("Recipe is already in shopping cart"));
        }
        Ok(())
    }

    /// Remove a recipe from the user's cart
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` if it was not in the cart
    pub async fn remove_from_shopping_cart(&self, user_id: i64, recipe_id: i64) -> AppResult<()> {
        let deleted = sqlx::query("DELETE FROM shopping_cart WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id)
            .bind(recipe_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(AppError::invalid_input("Recipe is not in shopping cart"));
        }
        Ok(())
    }

    /// Whether the recipe is in the user's cart
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn is_in_shopping_cart(&self, user_id: i64, recipe_id: i64) -> AppResult<bool> {
        let exists: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM shopping_cart WHERE user_id = $1 AND recipe_id = $2)",
        )
        .bind(user_id)
        .bind(recipe_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists != 0)
    }
}

#[async_trait]
impl CartSnapshotLoader for Database {
    async fn load_cart_snapshot(&self, user_id: i64) -> AppResult<CartSnapshot> {
        let rows = sqlx::query(
            r"
            SELECT r.id, r.name, r.image, r.cooking_time
            FROM shopping_cart c
            JOIN recipes r ON r.id = c.recipe_id
            WHERE c.user_id = $1
            ORDER BY r.id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            let recipe = RecipeSummary {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                image: row.try_get("image")?,
                cooking_time: super::to_u32(row.try_get("cooking_time")?, "cooking_time")?,
            };
            let lines = self.recipe_ingredient_lines(recipe.id).await?;
            entries.push(CartEntry { recipe, lines });
        }

        Ok(CartSnapshot::new(entries))
    }
}
