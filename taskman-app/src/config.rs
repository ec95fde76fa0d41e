/// Configuration management for the Taskman application
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `TASKMAN_DATABASE_PATH`: SQLite file (default: taskManager.db)
/// - `TASKMAN_DATABASE_BUSY_TIMEOUT_SECONDS`: Wait on a locked file (default: 5)
/// - `TASKMAN_PASSWORD_MEMORY_KIB`: Argon2 memory cost (default: 65536)
/// - `TASKMAN_PASSWORD_ITERATIONS`: Argon2 passes (default: 3)
/// - `TASKMAN_PASSWORD_PARALLELISM`: Argon2 lanes (default: 4)
/// - `TASKMAN_RESET_ON_START`: Drop both tables before creating them (default: false)
/// - `TASKMAN_LOG_JSON`: Emit JSON log lines (default: false)
/// - `RUST_LOG`: Log level (default: taskman_app=debug,taskman_store=debug)
///
/// # Example
///
/// ```no_run
/// use taskman_app::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Using database at {}", config.database.path);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use taskman_store::auth::password::PasswordConfig;
use taskman_store::db::connection::{DatabaseConfig, DEFAULT_DATABASE_PATH};
use taskman_store::StoreConfig;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database file configuration
    pub database: DatabaseSettings,

    /// Password hashing cost
    pub password: PasswordSettings,

    /// Startup behaviour
    pub startup: StartupSettings,
}

/// Database file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Path to the SQLite file
    pub path: String,

    /// Seconds to wait on a locked file
    pub busy_timeout_seconds: u64,
}

/// Argon2id cost parameters for new passwords
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordSettings {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

/// Startup behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupSettings {
    /// Drop both tables before creating them
    ///
    /// IMPORTANT: this deletes every account and task.
    pub reset_on_start: bool,

    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PasswordConfig::default();

        Ok(Self {
            database: DatabaseSettings {
                path: var("TASKMAN_DATABASE_PATH")
                    .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string()),
                busy_timeout_seconds: parse_or(&var, "TASKMAN_DATABASE_BUSY_TIMEOUT_SECONDS", 5)?,
            },
            password: PasswordSettings {
                memory_kib: parse_or(&var, "TASKMAN_PASSWORD_MEMORY_KIB", defaults.memory_kib)?,
                iterations: parse_or(&var, "TASKMAN_PASSWORD_ITERATIONS", defaults.iterations)?,
                parallelism: parse_or(&var, "TASKMAN_PASSWORD_PARALLELISM", defaults.parallelism)?,
            },
            startup: StartupSettings {
                reset_on_start: parse_or(&var, "TASKMAN_RESET_ON_START", false)?,
                log_json: parse_or(&var, "TASKMAN_LOG_JSON", false)?,
            },
        })
    }

    /// Store configuration derived from these settings
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            database: DatabaseConfig {
                busy_timeout_seconds: self.database.busy_timeout_seconds,
                ..DatabaseConfig::at(&self.database.path)
            },
            password: PasswordConfig {
                memory_kib: self.password.memory_kib,
                iterations: self.password.iterations,
                parallelism: self.password.parallelism,
            },
        }
    }
}

fn parse_or<F, T>(var: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} has invalid value {:?}: {}", key, raw, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(vars(&[])).unwrap();

        assert_eq!(config.database.path, "taskManager.db");
        assert_eq!(config.database.busy_timeout_seconds, 5);
        assert_eq!(config.password.memory_kib, 65536);
        assert_eq!(config.password.iterations, 3);
        assert_eq!(config.password.parallelism, 4);
        assert!(!config.startup.reset_on_start);
        assert!(!config.startup.log_json);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("TASKMAN_DATABASE_PATH", "/tmp/tasks.db"),
            ("TASKMAN_DATABASE_BUSY_TIMEOUT_SECONDS", "10"),
            ("TASKMAN_PASSWORD_MEMORY_KIB", "19456"),
            ("TASKMAN_PASSWORD_ITERATIONS", "2"),
            ("TASKMAN_PASSWORD_PARALLELISM", "1"),
            ("TASKMAN_RESET_ON_START", "true"),
            ("TASKMAN_LOG_JSON", " true "),
        ]))
        .unwrap();

        assert_eq!(config.database.path, "/tmp/tasks.db");
        assert_eq!(config.database.busy_timeout_seconds, 10);
        assert_eq!(config.password.memory_kib, 19456);
        assert!(config.startup.reset_on_start);
        assert!(config.startup.log_json);

        let store = config.store_config();
        assert_eq!(store.database.path, std::path::PathBuf::from("/tmp/tasks.db"));
        assert_eq!(store.database.busy_timeout_seconds, 10);
        assert!(store.database.foreign_keys);
        assert_eq!(store.password.iterations, 2);
        assert_eq!(store.password.parallelism, 1);
    }

    #[test]
    fn test_invalid_number_is_error() {
        let err = Config::from_vars(vars(&[("TASKMAN_PASSWORD_ITERATIONS", "three")])).unwrap_err();
        assert!(err.to_string().contains("TASKMAN_PASSWORD_ITERATIONS"));
    }

    #[test]
    fn test_invalid_bool_is_error() {
        assert!(Config::from_vars(vars(&[("TASKMAN_RESET_ON_START", "yes")])).is_err());
    }
}
