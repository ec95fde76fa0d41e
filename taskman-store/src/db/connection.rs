/// SQLite connection management
///
/// The store never keeps a connection between calls. Each operation opens one
/// connection with [`connect`], runs its statement, and hands the connection to
/// [`close`]. If the operation bails out early the connection is dropped, which
/// releases the file handle as well.
///
/// # Example
///
/// ```no_run
/// use taskman_store::db::connection::{close, connect, health_check, DatabaseConfig};
/// use std::path::PathBuf;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         path: PathBuf::from("taskManager.db"),
///         create_if_missing: true,
///         busy_timeout_seconds: 5,
///         foreign_keys: true,
///     };
///
///     let mut conn = connect(&config).await?;
///     health_check(&mut conn).await?;
///     close(conn).await;
///
///     Ok(())
/// }
/// ```

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Default database file, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "taskManager.db";

/// Configuration for opening the SQLite data file
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite file
    pub path: PathBuf,

    /// Create the file on first connect if it does not exist
    ///
    /// Default: true
    pub create_if_missing: bool,

    /// How long a statement waits on a locked file before failing (seconds)
    ///
    /// Default: 5
    pub busy_timeout_seconds: u64,

    /// Enforce `REFERENCES` clauses (SQLite leaves them off unless asked)
    ///
    /// Default: true. Task ownership checks and cascade on user removal depend on it.
    pub foreign_keys: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
            create_if_missing: true,
            busy_timeout_seconds: 5,
            foreign_keys: true,
        }
    }
}

impl DatabaseConfig {
    /// Config for a database file at `path` with default settings
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(self.create_if_missing)
            .busy_timeout(Duration::from_secs(self.busy_timeout_seconds))
            .foreign_keys(self.foreign_keys)
    }
}

/// Opens a fresh connection to the database file
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist and `create_if_missing` is false
/// - The parent directory is missing or not writable
/// - The file is not a SQLite database
pub async fn connect(config: &DatabaseConfig) -> Result<SqliteConnection, sqlx::Error> {
    debug!(path = %config.path.display(), "Opening database connection");

    config.connect_options().connect().await
}

/// Closes a connection, logging instead of failing if the close itself errors
pub async fn close(conn: SqliteConnection) {
    if let Err(e) = conn.close().await {
        warn!(error = %e, "Database connection did not close cleanly");
    } else {
        debug!("Database connection closed");
    }
}

/// Performs a health check on the connection
///
/// Executes a simple query to verify the file is readable.
pub async fn health_check(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    debug!("Performing database health check");

    let result: (i64,) = sqlx::query_as("SELECT 1").fetch_one(&mut *conn).await?;

    if result.0 == 1 {
        debug!("Database health check passed");
        Ok(())
    } else {
        warn!("Database health check returned unexpected value: {}", result.0);
        Err(sqlx::Error::Protocol(
            "Health check returned unexpected value".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, PathBuf::from("taskManager.db"));
        assert!(config.create_if_missing);
        assert_eq!(config.busy_timeout_seconds, 5);
        assert!(config.foreign_keys);
    }

    #[test]
    fn test_database_config_at() {
        let config = DatabaseConfig::at("/tmp/other.db");
        assert_eq!(config.path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.busy_timeout_seconds, 5);
    }

    #[tokio::test]
    async fn test_connect_and_health_check() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig::at(dir.path().join("health.db"));

        let mut conn = connect(&config).await.expect("connect should succeed");
        health_check(&mut conn).await.expect("health check should pass");
        close(conn).await;

        assert!(dir.path().join("health.db").exists());
    }

    #[tokio::test]
    async fn test_connect_without_create_fails_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            create_if_missing: false,
            ..DatabaseConfig::at(dir.path().join("missing.db"))
        };

        assert!(connect(&config).await.is_err());
    }
}
