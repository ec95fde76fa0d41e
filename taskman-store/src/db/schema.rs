/// Schema setup for the Taskman data file
///
/// Both tables are created with `IF NOT EXISTS` and dropped with `IF EXISTS`, so
/// every function here may be called repeatedly on startup or in tests.
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
///
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

use sqlx::sqlite::SqliteConnection;
use tracing::{debug, info};

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
"#;

const CREATE_TASKS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS tasks (
        task_id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
        task_name TEXT NOT NULL,
        task_description TEXT,
        due_date TEXT,
        priority TEXT,
        status TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
"#;

/// Which of the two tables are present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaStatus {
    pub users_table: bool,
    pub tasks_table: bool,
}

impl SchemaStatus {
    /// Both tables exist
    pub fn is_ready(&self) -> bool {
        self.users_table && self.tasks_table
    }
}

/// Creates the `users` and `tasks` tables if they are missing
///
/// `users` goes first because `tasks` references it.
pub async fn create_tables(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_USERS_TABLE).execute(&mut *conn).await?;
    sqlx::query(CREATE_TASKS_TABLE).execute(&mut *conn).await?;

    info!("Tables created");
    Ok(())
}

/// Drops the `users` table; no-op if it is already gone
pub async fn drop_users_table(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("DROP TABLE IF EXISTS users")
        .execute(&mut *conn)
        .await?;

    info!("Users table dropped");
    Ok(())
}

/// Drops the `tasks` table; no-op if it is already gone
pub async fn drop_tasks_table(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("DROP TABLE IF EXISTS tasks")
        .execute(&mut *conn)
        .await?;

    info!("Tasks table dropped");
    Ok(())
}

/// Checks whether a table with this exact name exists
pub async fn table_exists(conn: &mut SqliteConnection, table: &str) -> Result<bool, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(table)
            .fetch_one(&mut *conn)
            .await?;

    debug!(table, exists = count > 0, "Checked table existence");
    Ok(count > 0)
}

/// Reports which tables are present
pub async fn schema_status(conn: &mut SqliteConnection) -> Result<SchemaStatus, sqlx::Error> {
    Ok(SchemaStatus {
        users_table: table_exists(conn, "users").await?,
        tasks_table: table_exists(conn, "tasks").await?,
    })
}
