// ABOUTME: User management database operations
// ABOUTME: Handles registration, lookups, password hashes and paginated user lists

use super::{to_count, Database};
use foodgram_core::errors::{AppError, AppResult};
use foodgram_core::models::{User, UserProfile};
use foodgram_core::pagination::{Page, PageRequest};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// Fields of a user being registered
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login e-mail
    pub email: String,
    /// Public handle
    pub username: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

impl Database {
    /// Create the users table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT UNIQUE NOT NULL,
                username TEXT UNIQUE NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Register a user
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` if the e-mail or username is taken
    pub async fn create_user(&self, user: &NewUser, password_hash: &str) -> AppResult<User> {
        if self.get_user_by_email(&user.email).await?.is_some() {
            return Err(AppError::already_exists(
                "A user with that email already exists",
            ));
        }
        if self.get_user_by_username(&user.username).await?.is_some() {
            return Err(AppError::already_exists(
                "A user with that username already exists",
            ));
        }

        let id = sqlx::query(
            r"
            INSERT INTO users (email, username, first_name, last_name, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(password_hash)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(User {
            id,
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        })
    }

    /// Get a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user(&self, user_id: i64) -> AppResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, username, first_name, last_name FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_user).transpose()
    }

    /// Get a user by e-mail
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, username, first_name, last_name FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_user).transpose()
    }

    /// Get a user by username
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, username, first_name, last_name FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_user).transpose()
    }

    /// Get a user's stored password hash
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_password_hash(&self, user_id: i64) -> AppResult<Option<String>> {
        let hash = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(hash)
    }

    /// Replace a user's password hash
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the user does not exist
    pub async fn set_password_hash(&self, user_id: i64, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User"));
        }
        Ok(())
    }

    /// List users in id order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_users(&self, request: PageRequest) -> AppResult<Page<User>> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        let rows = sqlx::query(
            r"
            SELECT id, email, username, first_name, last_name FROM users
            ORDER BY id
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(request.sql_limit())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        let users = rows.iter().map(row_to_user).collect::<AppResult<Vec<_>>>()?;
        Ok(Page::new(users, to_count(count), request))
    }

    /// Wrap a user with the viewer's subscription flag
    ///
    /// Anonymous viewers and users looking at themselves are never subscribed.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn user_profile(&self, user: User, viewer: Option<i64>) -> AppResult<UserProfile> {
        let is_subscribed = match viewer {
            Some(viewer_id) if viewer_id != user.id => {
                self.is_subscribed(viewer_id, user.id).await?
            }
            _ => false,
        };
        Ok(UserProfile::new(user, is_subscribed))
    }
}

pub(super) fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        username: row.try_get("username")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
    })
}
