/// Task model and database operations
///
/// Tasks belong to a user through `user_id`. Name and status are required;
/// description, due date and priority are optional. Priority and status are
/// free text.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     task_id INTEGER PRIMARY KEY AUTOINCREMENT,
///     user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
///     task_name TEXT NOT NULL,
///     task_description TEXT,
///     due_date TEXT,
///     priority TEXT,
///     status TEXT NOT NULL,
///     created_at TEXT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskman_store::db::connection::{close, connect, DatabaseConfig};
/// use taskman_store::models::task::{Task, TaskField};
/// use taskman_store::validation::NewTask;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut conn = connect(&DatabaseConfig::default()).await?;
///
/// let task = Task::create(&mut conn, NewTask {
///     owner_id: 1,
///     name: "Write report".to_string(),
///     description: None,
///     due_date: None,
///     priority: Some("high".to_string()),
///     status: "pending".to_string(),
/// }).await?;
///
/// Task::update_field(&mut conn, task.id, TaskField::Status("done".to_string())).await?;
/// close(conn).await;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteConnection;

use crate::validation::NewTask;

/// Task model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID, assigned by SQLite
    #[sqlx(rename = "task_id")]
    pub id: i64,

    /// Owning user
    #[sqlx(rename = "user_id")]
    pub owner_id: i64,

    #[sqlx(rename = "task_name")]
    pub name: String,

    #[sqlx(rename = "task_description")]
    pub description: Option<String>,

    /// Stored as `YYYY-MM-DD`
    pub due_date: Option<NaiveDate>,

    pub priority: Option<String>,

    pub status: String,

    pub created_at: DateTime<Utc>,
}

/// A single updatable task column and its new value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskField {
    Name(String),
    Description(Option<String>),
    DueDate(Option<NaiveDate>),
    Priority(Option<String>),
    Status(String),
}

impl TaskField {
    /// Column written by this update
    pub fn column(&self) -> &'static str {
        match self {
            TaskField::Name(_) => "task_name",
            TaskField::Description(_) => "task_description",
            TaskField::DueDate(_) => "due_date",
            TaskField::Priority(_) => "priority",
            TaskField::Status(_) => "status",
        }
    }

    /// Field name as callers know it
    pub fn label(&self) -> &'static str {
        match self {
            TaskField::Name(_) => "name",
            TaskField::Description(_) => "description",
            TaskField::DueDate(_) => "due_date",
            TaskField::Priority(_) => "priority",
            TaskField::Status(_) => "status",
        }
    }
}

const SELECT_COLUMNS: &str =
    "task_id, user_id, task_name, task_description, due_date, priority, status, created_at";

impl Task {
    /// Inserts a new task
    ///
    /// # Errors
    ///
    /// Returns a foreign key violation if `owner_id` does not name a user
    pub async fn create(conn: &mut SqliteConnection, data: NewTask) -> Result<Self, sqlx::Error> {
        let sql = format!(
            r#"
            INSERT INTO tasks (user_id, task_name, task_description, due_date, priority, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        );

        sqlx::query_as::<_, Task>(&sql)
            .bind(data.owner_id)
            .bind(data.name)
            .bind(data.description)
            .bind(data.due_date)
            .bind(data.priority)
            .bind(data.status)
            .bind(Utc::now())
            .fetch_one(&mut *conn)
            .await
    }

    /// Finds a task by ID
    pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {} FROM tasks WHERE task_id = ?", SELECT_COLUMNS);

        sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Lists a user's tasks, earliest due date first, undated tasks last
    pub async fn list_for_owner(
        conn: &mut SqliteConnection,
        owner_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE user_id = ? ORDER BY due_date IS NULL, due_date, task_id",
            SELECT_COLUMNS
        );

        sqlx::query_as::<_, Task>(&sql)
            .bind(owner_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// Writes one column of one task
    ///
    /// The column name comes from [`TaskField::column`]; the value is bound.
    ///
    /// # Returns
    ///
    /// Number of rows updated (0 if no task has this id)
    pub async fn update_field(
        conn: &mut SqliteConnection,
        id: i64,
        field: TaskField,
    ) -> Result<u64, sqlx::Error> {
        let sql = format!("UPDATE tasks SET {} = ? WHERE task_id = ?", field.column());
        let query = sqlx::query(&sql);

        let query = match field {
            TaskField::Name(value) | TaskField::Status(value) => query.bind(value),
            TaskField::Description(value) | TaskField::Priority(value) => query.bind(value),
            TaskField::DueDate(value) => query.bind(value),
        };

        let result = query.bind(id).execute(&mut *conn).await?;
        Ok(result.rows_affected())
    }

    /// Deletes a task by ID
    ///
    /// # Returns
    ///
    /// Number of rows removed (0 if no task has this id)
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE task_id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Counts all tasks
    pub async fn count(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}
