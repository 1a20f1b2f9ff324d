// ABOUTME: Ingredient catalog database operations
// ABOUTME: Prefix search for the recipe form and idempotent get-or-create for imports

use super::Database;
use foodgram_core::errors::AppResult;
use foodgram_core::models::Ingredient;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

impl Database {
    /// Create the ingredients table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_ingredients(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                measurement_unit TEXT NOT NULL,
                UNIQUE(name, measurement_unit)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_ingredients_name ON ingredients(name)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List ingredients in name order, optionally only those whose name
    /// starts with `prefix` ignoring case
    ///
    /// The prefix match is done here rather than with `LIKE`, which only
    /// folds ASCII case in `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_ingredients(&self, prefix: Option<&str>) -> AppResult<Vec<Ingredient>> {
        let rows = sqlx::query("SELECT id, name, measurement_unit FROM ingredients ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        let ingredients = rows
            .iter()
            .map(row_to_ingredient)
            .collect::<AppResult<Vec<_>>>()?;

        let Some(prefix) = prefix.map(str::to_lowercase).filter(|p| !p.is_empty()) else {
            return Ok(ingredients);
        };
        Ok(ingredients
            .into_iter()
            .filter(|ingredient| ingredient.name.to_lowercase().starts_with(&prefix))
            .collect())
    }

    /// Get an ingredient by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_ingredient(&self, ingredient_id: i64) -> AppResult<Option<Ingredient>> {
        let row = sqlx::query("SELECT id, name, measurement_unit FROM ingredients WHERE id = $1")
            .bind(ingredient_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_ingredient).transpose()
    }

    /// Return the ingredient with this name and unit, creating it if absent;
    /// the flag is `true` when a row was inserted
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_or_create_ingredient(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> AppResult<(Ingredient, bool)> {
        let inserted = sqlx::query(
            "INSERT OR IGNORE INTO ingredients (name, measurement_unit) VALUES ($1, $2)",
        )
        .bind(name)
        .bind(measurement_unit)
        .execute(&self.pool)
        .await?
        .rows_affected()
            > 0;

        let row = sqlx::query(
            "SELECT id, name, measurement_unit FROM ingredients WHERE name = $1 AND measurement_unit = $2",
        )
        .bind(name)
        .bind(measurement_unit)
        .fetch_one(&self.pool)
        .await?;

        Ok((row_to_ingredient(&row)?, inserted))
    }

    /// Number of catalog ingredients
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_ingredients(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ingredients")
            .fetch_one(&self.pool)
            .await?;
        Ok(super::to_count(count))
    }
}

fn row_to_ingredient(row: &SqliteRow) -> AppResult<Ingredient> {
    Ok(Ingredient {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        measurement_unit: row.try_get("measurement_unit")?,
    })
}
