// ABOUTME: Recipe database operations with tag links and ingredient amounts
// ABOUTME: Transactional create/update, filtered paginated listing and viewer-aware hydration

use super::tags::row_to_tag;
use super::{to_count, to_u32, Database};
use foodgram_core::errors::{AppError, AppResult};
use foodgram_core::models::{IngredientLine, Recipe, RecipeIngredient, RecipeSummary, Tag};
use foodgram_core::pagination::{Page, PageRequest};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection};
use std::collections::HashSet;

/// An ingredient reference with its amount, as submitted by clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    /// Catalog ingredient id
    pub id: i64,
    /// Amount, at least 1
    pub amount: u32,
}

/// Validated recipe content for create and update
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    /// Title
    pub name: String,
    /// Image URL; `None` keeps the current image on update
    pub image: Option<String>,
    /// Description / instructions
    pub text: String,
    /// Cooking time in minutes
    pub cooking_time: u32,
    /// Tag ids
    pub tags: Vec<i64>,
    /// Ingredient ids and amounts, in display order
    pub ingredients: Vec<IngredientAmount>,
}

/// Recipe list filters
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Only recipes by this author
    pub author: Option<i64>,
    /// Recipes carrying any of these tag slugs
    pub tags: Vec<String>,
    /// Only the viewer's favorites (ignored for anonymous viewers)
    pub is_favorited: bool,
    /// Only recipes in the viewer's cart (ignored for anonymous viewers)
    pub is_in_shopping_cart: bool,
}

const RECIPE_COLUMNS: &str = "r.id, r.author_id, r.name, r.image, r.text, r.cooking_time";

impl Database {
    /// Create recipe, tag link and ingredient amount tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_recipes(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                image TEXT NOT NULL,
                text TEXT NOT NULL,
                cooking_time INTEGER NOT NULL CHECK (cooking_time >= 1),
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                ingredient_id INTEGER NOT NULL REFERENCES ingredients(id) ON DELETE RESTRICT,
                amount INTEGER NOT NULL CHECK (amount >= 1),
                UNIQUE(recipe_id, ingredient_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_tags (
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
                PRIMARY KEY (recipe_id, tag_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_author ON recipes(author_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_recipe ON recipe_ingredients(recipe_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a recipe with its tags and ingredients in one transaction
    ///
    /// # Errors
    ///
    /// Returns `MISSING_REQUIRED_FIELD` without an image and `INVALID_INPUT`
    /// when a referenced tag or ingredient does not exist
    pub async fn create_recipe(&self, author_id: i64, draft: &RecipeDraft) -> AppResult<i64> {
        let image = draft
            .image
            .as_deref()
            .ok_or_else(|| AppError::missing_field("image"))?;
        self.check_references(draft).await?;

        let mut tx = self.pool.begin().await?;
        let recipe_id = sqlx::query(
            r"
            INSERT INTO recipes (author_id, name, image, text, cooking_time)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(author_id)
        .bind(&draft.name)
        .bind(image)
        .bind(&draft.text)
        .bind(i64::from(draft.cooking_time))
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        insert_links(&mut tx, recipe_id, draft).await?;
        tx.commit().await?;
        Ok(recipe_id)
    }

    /// Replace a recipe's fields, tags and ingredients in one transaction
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown recipe and `INVALID_INPUT`
    /// when a referenced tag or ingredient does not exist
    pub async fn update_recipe(&self, recipe_id: i64, draft: &RecipeDraft) -> AppResult<()> {
        self.check_references(draft).await?;

        let mut tx = self.pool.begin().await?;
        let updated = sqlx::query(
            r"
            UPDATE recipes
            SET name = $1, image = COALESCE($2, image), text = $3, cooking_time = $4
            WHERE id = $5
            ",
        )
        .bind(&draft.name)
        .bind(draft.image.as_deref())
        .bind(&draft.text)
        .bind(i64::from(draft.cooking_time))
        .bind(recipe_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if updated == 0 {
            return Err(AppError::not_found("Recipe"));
        }

        sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;
        insert_links(&mut tx, recipe_id, draft).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Delete a recipe; links, favorites and cart rows cascade
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown recipe
    pub async fn delete_recipe(&self, recipe_id: i64) -> AppResult<()> {
        let deleted = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(AppError::not_found("Recipe"));
        }
        Ok(())
    }

    /// Author of a recipe, `None` if the recipe does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_recipe_author(&self, recipe_id: i64) -> AppResult<Option<i64>> {
        let author = sqlx::query_scalar("SELECT author_id FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(author)
    }

    /// Full recipe as seen by `viewer`
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn get_recipe(&self, recipe_id: i64, viewer: Option<i64>) -> AppResult<Option<Recipe>> {
        let row = sqlx::query(&format!("SELECT {RECIPE_COLUMNS} FROM recipes r WHERE r.id = $1"))
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(self.hydrate_recipe(&row, viewer).await?)),
            None => Ok(None),
        }
    }

    /// Short form of a recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_recipe_summary(&self, recipe_id: i64) -> AppResult<Option<RecipeSummary>> {
        let row = sqlx::query("SELECT id, name, image, cooking_time FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_summary).transpose()
    }

    /// List recipes newest first, filtered and paginated
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn list_recipes(
        &self,
        filter: &RecipeFilter,
        viewer: Option<i64>,
        request: PageRequest,
    ) -> AppResult<Page<Recipe>> {
        let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM recipes r WHERE 1 = 1");
        push_filters(&mut count_query, filter, viewer);
        let count: i64 = count_query.build_query_scalar().fetch_one(&self.pool).await?;

        let mut list_query =
            QueryBuilder::<Sqlite>::new(format!("SELECT {RECIPE_COLUMNS} FROM recipes r WHERE 1 = 1"));
        push_filters(&mut list_query, filter, viewer);
        list_query
            .push(" ORDER BY r.id DESC LIMIT ")
            .push_bind(request.sql_limit())
            .push(" OFFSET ")
            .push_bind(request.offset());
        let rows = list_query.build().fetch_all(&self.pool).await?;

        let mut recipes = Vec::with_capacity(rows.len());
        for row in &rows {
            recipes.push(self.hydrate_recipe(row, viewer).await?);
        }
        Ok(Page::new(recipes, to_count(count), request))
    }

    /// An author's recipes newest first, at most `limit` of them
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_author_recipe_summaries(
        &self,
        author_id: i64,
        limit: Option<u32>,
    ) -> AppResult<Vec<RecipeSummary>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, image, cooking_time FROM recipes
            WHERE author_id = $1
            ORDER BY id DESC
            LIMIT $2
            ",
        )
        .bind(author_id)
        .bind(limit.map_or(-1, i64::from))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_summary).collect()
    }

    /// Number of recipes by an author
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_author_recipes(&self, author_id: i64) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(to_count(count))
    }

    /// Ingredient lines of a recipe in stored order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored amount is invalid
    pub(super) async fn recipe_ingredient_lines(&self, recipe_id: i64) -> AppResult<Vec<IngredientLine>> {
        self.recipe_ingredients(recipe_id)
            .await?
            .into_iter()
            .map(|ingredient| {
                IngredientLine::new(ingredient.name, ingredient.measurement_unit, ingredient.amount)
            })
            .collect()
    }

    async fn recipe_ingredients(&self, recipe_id: i64) -> AppResult<Vec<RecipeIngredient>> {
        let rows = sqlx::query(
            r"
            SELECT i.id, i.name, i.measurement_unit, ri.amount
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = $1
            ORDER BY ri.id
            ",
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(RecipeIngredient {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    measurement_unit: row.try_get("measurement_unit")?,
                    amount: to_u32(row.try_get("amount")?, "amount")?,
                })
            })
            .collect()
    }

    async fn recipe_tags(&self, recipe_id: i64) -> AppResult<Vec<Tag>> {
        let rows = sqlx::query(
            r"
            SELECT t.id, t.name, t.color, t.slug
            FROM recipe_tags rt
            JOIN tags t ON t.id = rt.tag_id
            WHERE rt.recipe_id = $1
            ORDER BY t.id
            ",
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_tag).collect()
    }

    async fn hydrate_recipe(&self, row: &SqliteRow, viewer: Option<i64>) -> AppResult<Recipe> {
        let id: i64 = row.try_get("id")?;
        let author_id: i64 = row.try_get("author_id")?;
        let author = self
            .get_user(author_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe author"))?;

        let (is_favorited, is_in_shopping_cart) = match viewer {
            Some(user_id) => (
                self.is_favorited(user_id, id).await?,
                self.is_in_shopping_cart(user_id, id).await?,
            ),
            None => (false, false),
        };

        Ok(Recipe {
            id,
            author: self.user_profile(author, viewer).await?,
            tags: self.recipe_tags(id).await?,
            ingredients: self.recipe_ingredients(id).await?,
            name: row.try_get("name")?,
            image: row.try_get("image")?,
            text: row.try_get("text")?,
            cooking_time: to_u32(row.try_get("cooking_time")?, "cooking_time")?,
            is_favorited,
            is_in_shopping_cart,
        })
    }

    async fn check_references(&self, draft: &RecipeDraft) -> AppResult<()> {
        let tag_ids: HashSet<i64> = draft.tags.iter().copied().collect();
        for tag_id in tag_ids {
            if self.get_tag(tag_id).await?.is_none() {
                return Err(AppError::invalid_input(format!("Tag {tag_id} does not exist"))
                    .with_details(serde_json::json!({ "field": "tags", "id": tag_id })));
            }
        }
        for ingredient in &draft.ingredients {
            if self.get_ingredient(ingredient.id).await?.is_none() {
                return Err(AppError::invalid_input(format!(
                    "Ingredient {} does not exist",
                    ingredient.id
                ))
                .with_details(serde_json::json!({ "field": "ingredients", "id": ingredient.id })));
            }
        }
        Ok(())
    }
}

async fn insert_links(conn: &mut SqliteConnection, recipe_id: i64, draft: &RecipeDraft) -> AppResult<()> {
    for tag_id in &draft.tags {
        sqlx::query("INSERT OR IGNORE INTO recipe_tags (recipe_id, tag_id) VALUES ($1, $2)")
            .bind(recipe_id)
            .bind(*tag_id)
            .execute(&mut *conn)
            .await?;
    }
    for ingredient in &draft.ingredients {
        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES ($1, $2, $3)",
        )
        .bind(recipe_id)
        .bind(ingredient.id)
        .bind(i64::from(ingredient.amount))
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, filter: &RecipeFilter, viewer: Option<i64>) {
    if let Some(author) = filter.author {
        query.push(" AND r.author_id = ").push_bind(author);
    }

    if !filter.tags.is_empty() {
        query.push(
            " AND r.id IN (SELECT rt.recipe_id FROM recipe_tags rt JOIN tags t ON t.id = rt.tag_id WHERE t.slug IN (",
        );
        let mut slugs = query.separated(", ");
        for slug in &filter.tags {
            slugs.push_bind(slug.clone());
        }
        slugs.push_unseparated("))");
    }

    if let Some(user_id) = viewer {
        if filter.is_favorited {
            query
                .push(" AND r.id IN (SELECT recipe_id FROM favorites WHERE user_id = ")
                .push_bind(user_id)
                .push(")");
        }
        if filter.is_in_shopping_cart {
            query
                .push(" AND r.id IN (SELECT recipe_id FROM shopping_cart WHERE user_id = ")
                .push_bind(user_id)
                .push(")");
        }
    }
}

fn row_to_summary(row: &SqliteRow) -> AppResult<RecipeSummary> {
    Ok(RecipeSummary {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        image: row.try_get("image")?,
        cooking_time: to_u32(row.try_get("cooking_time")?, "cooking_time")?,
    })
}
