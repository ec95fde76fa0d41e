//! # Taskman Store
//!
//! Credential and task persistence for the Taskman desktop task manager.
//!
//! The store owns a single embedded SQLite file with two tables, `users` and
//! `tasks`. Every operation opens its own connection, runs one parameterized
//! statement and closes the connection again.
//!
//! ## Module Organization
//!
//! - `db`: Connection handling and schema setup
//! - `auth`: Password hashing and verification
//! - `validation`: Input checks for accounts and tasks
//! - `models`: Row types and single-statement operations
//! - `service`: Async store facade used by callers
//! - `blocking`: Synchronous wrapper around the async facade
//! - `error`: Store error type

pub mod auth;
pub mod blocking;
pub mod db;
pub mod error;
pub mod models;
pub mod service;
pub mod validation;

pub use blocking::Store;
pub use error::{StoreError, StoreResult, WriteOutcome};
pub use service::{StoreConfig, StoreSummary, TaskStore};

/// Current version of the Taskman store library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
