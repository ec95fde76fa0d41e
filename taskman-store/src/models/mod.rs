/// Database models for the Taskman store
///
/// Each model operation is a single parameterized statement executed on a
/// connection the caller already holds. Opening and closing connections is
/// the job of [`crate::service::TaskStore`].
///
/// # Models
///
/// - `user`: User accounts and credentials
/// - `task`: Tasks owned by users
///
/// # Example
///
/// ```no_run
/// use taskman_store::db::connection::{close, connect, DatabaseConfig};
/// use taskman_store::models::user::{CreateUser, User};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut conn = connect(&DatabaseConfig::default()).await?;
///
/// let user = User::create(&mut conn, CreateUser {
///     username: "alice".to_string(),
///     email: "a@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// }).await?;
///
/// close(conn).await;
/// # Ok(())
/// # }
/// ```

pub mod task;
pub mod user;
