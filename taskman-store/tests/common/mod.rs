#![allow(dead_code)]

/// Common test utilities for integration tests
///
/// Every test gets its own temporary directory and database file, so tests
/// can run in parallel without sharing state.

use taskman_store::auth::password::PasswordConfig;
use taskman_store::db::connection::DatabaseConfig;
use taskman_store::models::user::User;
use taskman_store::validation::{NewAccount, NewTask};
use taskman_store::{StoreConfig, TaskStore};
use tempfile::TempDir;

/// Test context owning the temp directory for the lifetime of the test
pub struct TestContext {
    pub store: TaskStore,
    pub dir: TempDir,
}

impl TestContext {
    /// Creates a store on a fresh file with the schema already in place
    pub async fn new() -> Self {
        let ctx = Self::without_schema();
        ctx.store.init_schema().await.expect("Failed to create tables");
        ctx
    }

    /// Creates a store on a fresh file without creating tables
    pub fn without_schema() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = TaskStore::new(test_config(&dir));
        Self { store, dir }
    }

    /// Creates an account and returns the stored user
    pub async fn create_user(&self, username: &str, password: &str) -> User {
        self.store
            .create_account(NewAccount::new(
                username,
                format!("{}@example.com", username),
                password,
            ))
            .await
            .expect("Failed to create user")
    }
}

/// Store config on a file inside `dir`, with cheap password hashing
pub fn test_config(dir: &TempDir) -> StoreConfig {
    StoreConfig {
        database: DatabaseConfig::at(dir.path().join("taskManager.db")),
        password: PasswordConfig::minimal(),
    }
}

/// A fully populated task request
pub fn full_task(owner_id: i64, name: &str) -> NewTask {
    NewTask {
        owner_id,
        name: name.to_string(),
        description: Some("Quarterly numbers".to_string()),
        due_date: chrono::NaiveDate::from_ymd_opt(2025, 1, 1),
        priority: Some("high".to_string()),
        status: "pending".to_string(),
    }
}
