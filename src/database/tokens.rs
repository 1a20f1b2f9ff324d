// ABOUTME: API token database operations
// ABOUTME: One token per user, resolved to the owning user on every authenticated request

use super::users::row_to_user;
use super::Database;
use foodgram_core::errors::AppResult;
use foodgram_core::models::User;

impl Database {
    /// Create the auth tokens table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_tokens(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS auth_tokens (
                key TEXT PRIMARY KEY,
                user_id INTEGER UNIQUE NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Store `candidate` as the user's token unless one already exists, and
    /// return whichever token the user now has
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_or_create_token(&self, user_id: i64, candidate: &str) -> AppResult<String> {
        sqlx::query("INSERT OR IGNORE INTO auth_tokens (key, user_id) VALUES ($1, $2)")
            .bind(candidate)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        let key = sqlx::query_scalar("SELECT key FROM auth_tokens WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(key)
    }

    /// Resolve a token to its user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_by_token(&self, key: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT u.id, u.email, u.username, u.first_name, u.last_name
            FROM auth_tokens t
            JOIN users u ON u.id = t.user_id
            WHERE t.key = $1
            ",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_user).transpose()
    }

    /// Delete the user's token; returns whether one existed
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn delete_token(&self, user_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
