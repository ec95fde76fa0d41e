/// Startup sequence
///
/// Installs logging and prepares the data file so the front end can start
/// calling the store straight away.

use taskman_store::{StoreSummary, TaskStore};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

const DEFAULT_LOG_FILTER: &str = "taskman_app=debug,taskman_store=debug";

/// Installs the global tracing subscriber
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Creates the tables (after dropping them if a reset was requested) and
/// returns what the store now holds
pub async fn prepare_store(config: &Config) -> anyhow::Result<StoreSummary> {
    let store = TaskStore::new(config.store_config());

    if config.startup.reset_on_start {
        warn!(path = %config.database.path, "Resetting store: dropping all tables");
        store.drop_tasks_table().await?;
        store.drop_users_table().await?;
    }

    store.init_schema().await?;

    let summary = store.summary().await?;
    info!(
        path = %config.database.path,
        users = summary.users,
        tasks = summary.tasks,
        "Store ready"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskman_store::validation::NewAccount;

    fn config_in(dir: &tempfile::TempDir, reset: bool) -> Config {
        let path = dir.path().join("taskManager.db");
        let path = path.to_string_lossy().into_owned();
        let reset = if reset { "true" } else { "false" };

        Config::from_vars(move |key| match key {
            "TASKMAN_DATABASE_PATH" => Some(path.clone()),
            "TASKMAN_RESET_ON_START" => Some(reset.to_string()),
            "TASKMAN_PASSWORD_MEMORY_KIB" => Some("8".to_string()),
            "TASKMAN_PASSWORD_ITERATIONS" => Some("1".to_string()),
            "TASKMAN_PASSWORD_PARALLELISM" => Some("1".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_prepare_store_on_fresh_file() {
        let dir = tempfile::tempdir().unwrap();

        let summary = prepare_store(&config_in(&dir, false)).await.unwrap();

        assert!(summary.schema.is_ready());
        assert_eq!(summary.users, 0);
        assert!(dir.path().join("taskManager.db").exists());
    }

    #[tokio::test]
    async fn test_prepare_store_keeps_data_without_reset() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, false);
        prepare_store(&config).await.unwrap();

        let store = TaskStore::new(config.store_config());
        store
            .create_account(NewAccount::new("alice", "a@example.com", "secret123"))
            .await
            .unwrap();

        let summary = prepare_store(&config).await.unwrap();
        assert_eq!(summary.users, 1);
    }

    #[tokio::test]
    async fn test_prepare_store_with_reset_clears_data() {
        let dir = tempfile::tempdir().unwrap();
        prepare_store(&config_in(&dir, false)).await.unwrap();

        let store = TaskStore::new(config_in(&dir, false).store_config());
        store
            .create_account(NewAccount::new("alice", "a@example.com", "secret123"))
            .await
            .unwrap();

        let summary = prepare_store(&config_in(&dir, true)).await.unwrap();
        assert!(summary.schema.is_ready());
        assert_eq!(summary.users, 0);
    }
}
