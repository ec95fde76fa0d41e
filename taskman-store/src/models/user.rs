/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     user_id INTEGER PRIMARY KEY AUTOINCREMENT,
///     username TEXT NOT NULL UNIQUE,
///     email TEXT NOT NULL,
///     password_hash TEXT NOT NULL,
///     created_at TEXT NOT NULL
/// );
/// ```
///
/// Username matching is exact and case-sensitive.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::sqlite::SqliteConnection;

/// User model representing an account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID, assigned by SQLite
    #[sqlx(rename = "user_id")]
    pub id: i64,

    /// Login name, unique across all users
    pub username: String,

    /// Contact email
    pub email: String,

    /// Argon2id password hash in PHC format
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a user row
///
/// Carries the hash, not the password.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    /// Inserts a new user
    ///
    /// # Errors
    ///
    /// Returns a database error with a unique violation if the username is
    /// already taken
    pub async fn create(conn: &mut SqliteConnection, data: CreateUser) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING user_id, username, email, password_hash, created_at
            "#,
        )
        .bind(data.username)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await
    }

    /// Checks whether any user has this username
    pub async fn exists(conn: &mut SqliteConnection, username: &str) -> Result<bool, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&mut *conn)
            .await?;

        Ok(count > 0)
    }

    /// Finds a user by username
    pub async fn find_by_username(
        conn: &mut SqliteConnection,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, email, password_hash, created_at
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Fetches only the stored hash for a username
    pub async fn password_hash_for(
        conn: &mut SqliteConnection,
        username: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT password_hash FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Deletes a user by username
    ///
    /// The user's tasks go with it through `ON DELETE CASCADE`.
    ///
    /// # Returns
    ///
    /// Number of user rows removed (0 if the username was unknown)
    pub async fn delete_by_username(
        conn: &mut SqliteConnection,
        username: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE username = ?")
            .bind(username)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Counts all users
    pub async fn count(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}
