//! # Taskman
//!
//! Entry point for the Taskman desktop task manager. Loads configuration,
//! installs logging and prepares the SQLite data file. The windowing front end
//! is started by the platform shell once this has succeeded.
//!
//! ## Usage
//!
//! ```bash
//! TASKMAN_DATABASE_PATH=taskManager.db cargo run -p taskman-app
//! ```

use taskman_app::{bootstrap, config::Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    bootstrap::init_tracing(config.startup.log_json);

    tracing::info!("Taskman v{} starting...", env!("CARGO_PKG_VERSION"));

    let summary = bootstrap::prepare_store(&config).await?;

    tracing::info!(
        users = summary.users,
        tasks = summary.tasks,
        "Startup complete"
    );

    Ok(())
}
