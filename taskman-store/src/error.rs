/// Error handling for the persistence service
///
/// Storage failures never escape as panics. Each store operation returns a
/// `StoreResult`, and mutating operations keyed by id or username additionally
/// report whether a row was touched through [`WriteOutcome`].
///
/// # Example
///
/// ```no_run
/// use taskman_store::{StoreError, TaskStore, WriteOutcome};
///
/// # async fn example(store: TaskStore) {
/// match store.remove_task(42).await {
///     Ok(WriteOutcome::Applied) => println!("task removed"),
///     Ok(WriteOutcome::NotFound) => println!("no such task"),
///     Err(StoreError::Connection(e)) => eprintln!("database unavailable: {}", e),
///     Err(e) => eprintln!("failed: {}", e),
/// }
/// # }
/// ```

use crate::auth::password::PasswordError;

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Unified store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database file could not be opened (missing directory, locked, permissions)
    #[error("Failed to connect to database: {0}")]
    Connection(#[source] sqlx::Error),

    /// A statement failed to execute
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Input rejected before reaching storage
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Another account already uses this username
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// Task owner does not reference an existing user
    #[error("No user with id {0}")]
    UnknownOwner(i64),

    /// Password hashing failed
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// The blocking facade could not start its runtime
    #[error("Failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl StoreError {
    /// Returns true for errors caused by caller input rather than storage
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            StoreError::Validation(_) | StoreError::UsernameTaken(_) | StoreError::UnknownOwner(_)
        )
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

/// Result of a write keyed by id or username
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// At least one row was changed
    Applied,

    /// No row matched the key
    NotFound,
}

impl WriteOutcome {
    /// Builds an outcome from an affected-row count
    pub fn from_rows_affected(rows: u64) -> Self {
        if rows > 0 {
            WriteOutcome::Applied
        } else {
            WriteOutcome::NotFound
        }
    }

    /// Returns true if a row was changed
    pub fn is_applied(&self) -> bool {
        matches!(self, WriteOutcome::Applied)
    }
}
