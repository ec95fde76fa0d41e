/// Database layer for the Taskman store
///
/// This module provides connection handling and schema setup for the embedded
/// SQLite file.
///
/// # Modules
///
/// - `connection`: Per-call SQLite connections with health checks
/// - `schema`: Idempotent table creation and drop helpers
/// - Models are in the `models` module at crate root level
///
/// # Example
///
/// ```no_run
/// use taskman_store::db::connection::{connect, close, DatabaseConfig};
/// use taskman_store::db::schema::create_tables;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig::default();
///
///     let mut conn = connect(&config).await?;
///     create_tables(&mut conn).await?;
///     close(conn).await;
///     Ok(())
/// }
/// ```

pub mod connection;
pub mod schema;
