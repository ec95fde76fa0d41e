/// Blocking facade over [`TaskStore`]
///
/// Presentation code that has no async runtime calls the store through
/// [`Store`]. Each method blocks the calling thread until the underlying
/// operation has opened its connection, run its statement and closed the
/// connection again.
///
/// `Store` owns a current-thread tokio runtime. Do not call it from inside
/// another async runtime; use [`TaskStore`] there.
///
/// # Example
///
/// ```no_run
/// use taskman_store::{Store, StoreConfig};
/// use taskman_store::validation::NewAccount;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Store::open(StoreConfig::default())?;
/// store.init_schema()?;
///
/// if !store.user_exists("alice")? {
///     store.create_account(NewAccount::new("alice", "a@example.com", "secret123"))?;
/// }
/// assert!(store.authenticate("alice", "secret123"));
/// # Ok(())
/// # }
/// ```

use chrono::NaiveDate;
use tokio::runtime::{Builder, Runtime};

use crate::error::{StoreError, StoreResult, WriteOutcome};
use crate::models::task::{Task, TaskField};
use crate::models::user::User;
use crate::service::{StoreConfig, StoreSummary, TaskStore};
use crate::validation::{NewAccount, NewTask};

/// Synchronous credential and task store
#[derive(Debug)]
pub struct Store {
    inner: TaskStore,
    runtime: Runtime,
}

impl Store {
    /// Builds the store and its runtime. Does not touch the database file.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(StoreError::Runtime)?;

        Ok(Self {
            inner: TaskStore::new(config),
            runtime,
        })
    }

    pub fn init_schema(&self) -> StoreResult<()> {
        self.runtime.block_on(self.inner.init_schema())
    }

    pub fn drop_users_table(&self) -> StoreResult<()> {
        self.runtime.block_on(self.inner.drop_users_table())
    }

    pub fn drop_tasks_table(&self) -> StoreResult<()> {
        self.runtime.block_on(self.inner.drop_tasks_table())
    }

    pub fn summary(&self) -> StoreResult<StoreSummary> {
        self.runtime.block_on(self.inner.summary())
    }

    pub fn user_exists(&self, username: &str) -> StoreResult<bool> {
        self.runtime.block_on(self.inner.user_exists(username))
    }

    pub fn create_account(&self, account: NewAccount) -> StoreResult<User> {
        self.runtime.block_on(self.inner.create_account(account))
    }

    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.runtime.block_on(self.inner.authenticate(username, password))
    }

    pub fn find_user(&self, username: &str) -> StoreResult<Option<User>> {
        self.runtime.block_on(self.inner.find_user(username))
    }

    pub fn remove_user(&self, username: &str) -> StoreResult<WriteOutcome> {
        self.runtime.block_on(self.inner.remove_user(username))
    }

    pub fn create_task(&self, task: NewTask) -> StoreResult<Task> {
        self.runtime.block_on(self.inner.create_task(task))
    }

    pub fn find_task(&self, task_id: i64) -> StoreResult<Option<Task>> {
        self.runtime.block_on(self.inner.find_task(task_id))
    }

    pub fn list_tasks(&self, owner_id: i64) -> StoreResult<Vec<Task>> {
        self.runtime.block_on(self.inner.list_tasks(owner_id))
    }

    pub fn remove_task(&self, task_id: i64) -> StoreResult<WriteOutcome> {
        self.runtime.block_on(self.inner.remove_task(task_id))
    }

    pub fn update_task(&self, task_id: i64, field: TaskField) -> StoreResult<WriteOutcome> {
        self.runtime.block_on(self.inner.update_task(task_id, field))
    }

    pub fn update_task_name(&self, task_id: i64, name: impl Into<String>) -> StoreResult<WriteOutcome> {
        self.update_task(task_id, TaskField::Name(name.into()))
    }

    pub fn update_task_description(
        &self,
        task_id: i64,
        description: Option<String>,
    ) -> StoreResult<WriteOutcome> {
        self.update_task(task_id, TaskField::Description(description))
    }

    pub fn update_task_due_date(
        &self,
        task_id: i64,
        due_date: Option<NaiveDate>,
    ) -> StoreResult<WriteOutcome> {
        self.update_task(task_id, TaskField::DueDate(due_date))
    }

    pub fn update_task_priority(
        &self,
        task_id: i64,
        priority: Option<String>,
    ) -> StoreResult<WriteOutcome> {
        self.update_task(task_id, TaskField::Priority(priority))
    }

    pub fn update_task_status(&self, task_id: i64, status: impl Into<String>) -> StoreResult<WriteOutcome> {
        self.update_task(task_id, TaskField::Status(status.into()))
    }
}
