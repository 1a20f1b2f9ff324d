// ABOUTME: Author subscription database operations
// ABOUTME: Follow and unfollow authors and list followed authors with recipe previews

use super::users::row_to_user;
use super::{to_count, Database};
use foodgram_core::errors::{AppError, AppResult};
use foodgram_core::models::{Subscription, UserProfile};
use foodgram_core::pagination::{Page, PageRequest};

impl Database {
    /// Create the subscriptions table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_subscriptions(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS subscriptions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                UNIQUE(user_id, author_id),
                CHECK (user_id != author_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Follow an author
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for a self-subscription and
    /// `RESOURCE_ALREADY_EXISTS` if already subscribed
    pub async fn subscribe(&self, user_id: i64, author_id: i64) -> AppResult<()> {
        if user_id == author_id {
            return Err(AppError::invalid_input("You cannot subscribe to yourself"));
        }
        let inserted = sqlx::query(
            "INSERT OR IGNORE INTO subscriptions (user_id, author_id) VALUES ($1, $2)",
        )
        .bind(user_id)
        .bind(author_id)
        .execute(&self.pool)
        .await?
        .rows_affected();
        if inserted == 0 {
            return Err(AppError::already_exists("Subscription already exists"));
        }
        Ok(())
    }

    /// Unfollow an author
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for a self-subscription or a missing subscription
    pub async fn unsubscribe(&self, user_id: i64, author_id: i64) -> AppResult<()> {
        if user_id == author_id {
            return Err(AppError::invalid_input("You cannot unsubscribe from yourself"));
        }
        let deleted = sqlx::query("DELETE FROM subscriptions WHERE user_id = $1 AND author_id = $2")
            .bind(user_id)
            .bind(author_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(AppError::invalid_input("Subscription does not exist"));
        }
        Ok(())
    }

    /// Whether `user_id` follows `author_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn is_subscribed(&self, user_id: i64, author_id: i64) -> AppResult<bool> {
        let exists: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM subscriptions WHERE user_id = $1 AND author_id = $2)",
        )
        .bind(user_id)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists != 0)
    }

    /// An author as a subscription entry with up to `recipes_limit` recipes
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the author does not exist
    pub async fn subscription_entry(
        &self,
        author_id: i64,
        recipes_limit: Option<u32>,
    ) -> AppResult<Subscription> {
        let author = self
            .get_user(author_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;
        Ok(Subscription {
            author: UserProfile::new(author, true),
            recipes: self
                .list_author_recipe_summaries(author_id, recipes_limit)
                .await?,
            recipes_count: self.count_author_recipes(author_id).await?,
        })
    }

    /// Authors the user follows, in subscription order
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn list_subscriptions(
        &self,
        user_id: i64,
        request: PageRequest,
        recipes_limit: Option<u32>,
    ) -> AppResult<Page<Subscription>> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        let rows = sqlx::query(
            r"
            SELECT u.id, u.email, u.username, u.first_name, u.last_name
            FROM subscriptions s
            JOIN users u ON u.id = s.author_id
            WHERE s.user_id = $1
            ORDER BY s.id
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user_id)
        .bind(request.sql_limit())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            let author = row_to_user(row)?;
            let author_id = author.id;
            entries.push(Subscription {
                author: UserProfile::new(author, true),
                recipes: self
                    .list_author_recipe_summaries(author_id, recipes_limit)
                    .await?,
                recipes_count: self.count_author_recipes(author_id).await?,
            });
        }
        Ok(Page::new(entries, to_count(count), request))
    }
}
