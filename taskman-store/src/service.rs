/// Async persistence service
///
/// [`TaskStore`] is what callers talk to. It holds configuration only; every
/// operation opens a fresh connection, runs one statement through the models,
/// and closes the connection before returning. No connection, statement or
/// transaction outlives a call.
///
/// Because calls do not share a transaction, a `user_exists` check followed by
/// `create_account` is not atomic. The UNIQUE constraint on `users.username`
/// still rejects the second of two racing inserts with
/// [`StoreError::UsernameTaken`].
///
/// # Example
///
/// ```no_run
/// use taskman_store::{StoreConfig, TaskStore};
/// use taskman_store::validation::NewAccount;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = TaskStore::new(StoreConfig::default());
/// store.init_schema().await?;
///
/// store
///     .create_account(NewAccount::new("alice", "a@example.com", "secret123"))
///     .await?;
///
/// assert!(store.authenticate("alice", "secret123").await);
/// # Ok(())
/// # }
/// ```

use chrono::NaiveDate;
use sqlx::sqlite::SqliteConnection;
use tracing::{debug, error, info, warn};
use validator::Validate;

use crate::auth::password::{hash_password, verify_password, PasswordConfig};
use crate::db::connection::{self, DatabaseConfig};
use crate::db::schema::{self, SchemaStatus};
use crate::error::{StoreError, StoreResult, WriteOutcome};
use crate::models::task::{Task, TaskField};
use crate::models::user::{CreateUser, User};
use crate::validation::{require_non_empty, NewAccount, NewTask};

/// Everything the store needs to run
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub database: DatabaseConfig,
    pub password: PasswordConfig,
}

/// Row counts and table presence, for startup logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSummary {
    pub schema: SchemaStatus,
    pub users: i64,
    pub tasks: i64,
}

/// Credential and task persistence service
#[derive(Debug, Clone)]
pub struct TaskStore {
    config: StoreConfig,
}

impl TaskStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    async fn open(&self) -> StoreResult<SqliteConnection> {
        connection::connect(&self.config.database).await.map_err(|e| {
            error!(
                path = %self.config.database.path.display(),
                error = %e,
                "Failed to open database"
            );
            StoreError::Connection(e)
        })
    }

    /// Creates both tables if missing. Safe to call on every startup.
    pub async fn init_schema(&self) -> StoreResult<()> {
        let mut conn = self.open().await?;
        let result = schema::create_tables(&mut conn).await;
        connection::close(conn).await;

        result.map_err(|e| log_failure("creating tables", e))
    }

    /// Drops the `users` table if present
    pub async fn drop_users_table(&self) -> StoreResult<()> {
        let mut conn = self.open().await?;
        let result = schema::drop_users_table(&mut conn).await;
        connection::close(conn).await;

        result.map_err(|e| log_failure("dropping users table", e))
    }

    /// Drops the `tasks` table if present
    pub async fn drop_tasks_table(&self) -> StoreResult<()> {
        let mut conn = self.open().await?;
        let result = schema::drop_tasks_table(&mut conn).await;
        connection::close(conn).await;

        result.map_err(|e| log_failure("dropping tasks table", e))
    }

    /// Reports table presence and row counts
    pub async fn summary(&self) -> StoreResult<StoreSummary> {
        let mut conn = self.open().await?;
        let result = summarize(&mut conn).await;
        connection::close(conn).await;

        result.map_err(|e| log_failure("summarizing store", e))
    }

    /// Returns whether a user with exactly this username exists
    pub async fn user_exists(&self, username: &str) -> StoreResult<bool> {
        let mut conn = self.open().await?;
        let result = User::exists(&mut conn, username).await;
        connection::close(conn).await;

        let exists = result.map_err(|e| log_failure("finding user", e))?;
        debug!(username, exists, "Checked user existence");
        Ok(exists)
    }

    /// Validates the request, hashes the password and inserts the account
    ///
    /// # Errors
    ///
    /// - `Validation` if a field is empty or the email is malformed
    /// - `UsernameTaken` if the username is already in use
    /// - `Password` if hashing fails
    /// - `Connection` / `Database` on storage failure
    pub async fn create_account(&self, account: NewAccount) -> StoreResult<User> {
        if let Err(errors) = account.validate() {
            warn!(username = %account.username, "Rejected account request");
            return Err(errors.into());
        }

        let password_hash =
            hash_password(&account.password, &self.config.password).map_err(|e| {
                error!(username = %account.username, error = %e, "Error hashing password");
                StoreError::Password(e)
            })?;
        let username = account.username;

        let mut conn = self.open().await?;
        let result = User::create(
            &mut conn,
            CreateUser {
                username: username.clone(),
                email: account.email,
                password_hash,
            },
        )
        .await;
        connection::close(conn).await;

        match result {
            Ok(user) => {
                info!(user_id = user.id, username = %user.username, "Addition of user information successful");
                Ok(user)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                warn!(username = %username, "Username already taken");
                Err(StoreError::UsernameTaken(username))
            }
            Err(e) => Err(log_failure("inserting user", e)),
        }
    }

    /// Checks a username/password pair
    ///
    /// Returns false for an unknown user, a wrong password, or any storage or
    /// hash error. Callers cannot tell these apart.
    pub async fn authenticate(&self, username: &str, password: &str) -> bool {
        let mut conn = match self.open().await {
            Ok(conn) => conn,
            Err(_) => return false,
        };
        let result = User::password_hash_for(&mut conn, username).await;
        connection::close(conn).await;

        let stored = match result {
            Ok(Some(hash)) => hash,
            Ok(None) => {
                debug!(username, "Login failed: user not found");
                return false;
            }
            Err(e) => {
                log_failure("authenticating user", e);
                return false;
            }
        };

        match verify_password(password, &stored) {
            Ok(true) => {
                info!(username, "Login successful");
                true
            }
            Ok(false) => {
                debug!(username, "Login failed: invalid password");
                false
            }
            Err(e) => {
                error!(username, error = %e, "Stored password hash is unreadable");
                false
            }
        }
    }

    /// Finds a user by username
    pub async fn find_user(&self, username: &str) -> StoreResult<Option<User>> {
        let mut conn = self.open().await?;
        let result = User::find_by_username(&mut conn, username).await;
        connection::close(conn).await;

        result.map_err(|e| log_failure("finding user", e))
    }

    /// Removes a user and, through the cascade, all of their tasks
    pub async fn remove_user(&self, username: &str) -> StoreResult<WriteOutcome> {
        let mut conn = self.open().await?;
        let result = User::delete_by_username(&mut conn, username).await;
        connection::close(conn).await;

        let outcome = WriteOutcome::from_rows_affected(
            result.map_err(|e| log_failure("removing user", e))?,
        );
        match outcome {
            WriteOutcome::Applied => info!(username, "User deleted"),
            WriteOutcome::NotFound => warn!(username, "User not found"),
        }
        Ok(outcome)
    }

    /// Validates and inserts a task
    ///
    /// # Errors
    ///
    /// - `Validation` if name or status is empty
    /// - `UnknownOwner` if `owner_id` does not name a user
    /// - `Connection` / `Database` on storage failure
    pub async fn create_task(&self, task: NewTask) -> StoreResult<Task> {
        if let Err(errors) = task.validate() {
            warn!(owner_id = task.owner_id, "Rejected task request");
            return Err(errors.into());
        }

        let owner_id = task.owner_id;
        let mut conn = self.open().await?;
        let result = Task::create(&mut conn, task).await;
        connection::close(conn).await;

        match result {
            Ok(task) => {
                info!(task_id = task.id, owner_id, "Addition of task information successful");
                Ok(task)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                warn!(owner_id, "Task owner does not exist");
                Err(StoreError::UnknownOwner(owner_id))
            }
            Err(e) => Err(log_failure("inserting task", e)),
        }
    }

    /// Reads a task by id
    pub async fn find_task(&self, task_id: i64) -> StoreResult<Option<Task>> {
        let mut conn = self.open().await?;
        let result = Task::find_by_id(&mut conn, task_id).await;
        connection::close(conn).await;

        result.map_err(|e| log_failure("finding task", e))
    }

    /// Lists a user's tasks
    pub async fn list_tasks(&self, owner_id: i64) -> StoreResult<Vec<Task>> {
        let mut conn = self.open().await?;
        let result = Task::list_for_owner(&mut conn, owner_id).await;
        connection::close(conn).await;

        result.map_err(|e| log_failure("listing tasks", e))
    }

    /// Removes exactly the task with this id
    pub async fn remove_task(&self, task_id: i64) -> StoreResult<WriteOutcome> {
        let mut conn = self.open().await?;
        let result = Task::delete(&mut conn, task_id).await;
        connection::close(conn).await;

        let outcome =
            WriteOutcome::from_rows_affected(result.map_err(|e| log_failure("removing task", e))?);
        match outcome {
            WriteOutcome::Applied => info!(task_id, "Task deleted"),
            WriteOutcome::NotFound => warn!(task_id, "Task not found"),
        }
        Ok(outcome)
    }

    /// Writes a single task column, leaving the others untouched
    ///
    /// # Errors
    ///
    /// `Validation` if the new name or status is empty
    pub async fn update_task(&self, task_id: i64, field: TaskField) -> StoreResult<WriteOutcome> {
        match &field {
            TaskField::Name(value) | TaskField::Status(value) => {
                require_non_empty(field.label(), value)?
            }
            _ => {}
        }

        let label = field.label();
        let mut conn = self.open().await?;
        let result = Task::update_field(&mut conn, task_id, field).await;
        connection::close(conn).await;

        let rows = result.map_err(|e| log_failure("updating task", e))?;
        let outcome = WriteOutcome::from_rows_affected(rows);
        match outcome {
            WriteOutcome::Applied => info!(task_id, field = label, "Task updated successfully"),
            WriteOutcome::NotFound => warn!(task_id, field = label, "Task not found"),
        }
        Ok(outcome)
    }

    pub async fn update_task_name(&self, task_id: i64, name: impl Into<String>) -> StoreResult<WriteOutcome> {
        self.update_task(task_id, TaskField::Name(name.into())).await
    }

    pub async fn update_task_description(
        &self,
        task_id: i64,
        description: Option<String>,
    ) -> StoreResult<WriteOutcome> {
        self.update_task(task_id, TaskField::Description(description)).await
    }

    pub async fn update_task_due_date(
        &self,
        task_id: i64,
        due_date: Option<NaiveDate>,
    ) -> StoreResult<WriteOutcome> {
        self.update_task(task_id, TaskField::DueDate(due_date)).await
    }

    pub async fn update_task_priority(
        &self,
        task_id: i64,
        priority: Option<String>,
    ) -> StoreResult<WriteOutcome> {
        self.update_task(task_id, TaskField::Priority(priority)).await
    }

    pub async fn update_task_status(&self, task_id: i64, status: impl Into<String>) -> StoreResult<WriteOutcome> {
        self.update_task(task_id, TaskField::Status(status.into())).await
    }
}

async fn summarize(conn: &mut SqliteConnection) -> Result<StoreSummary, sqlx::Error> {
    connection::health_check(conn).await?;

    let schema = schema::schema_status(conn).await?;
    let users = if schema.users_table { User::count(conn).await? } else { 0 };
    let tasks = if schema.tasks_table { Task::count(conn).await? } else { 0 };

    Ok(StoreSummary { schema, users, tasks })
}

fn log_failure(action: &'static str, err: sqlx::Error) -> StoreError {
    error!(error = %err, "Error {}", action);
    StoreError::Database(err)
}
