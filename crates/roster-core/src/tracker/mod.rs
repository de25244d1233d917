//! High-level tracker API.
//!
//! [`Tracker`] is the entry point the CLI and the MCP server share. Every
//! operation opens the SQLite database on a blocking thread, runs one
//! [`Database`] call (one transaction for multi-step writes) and returns the
//! result.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │  (handlers.rs)  │───▶│ (entity_ops,    │───▶│   (via db/)     │
//! │                 │    │  history_ops..) │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use roster_core::{params::{ChangeStatus, CreateEntity}, TrackerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("roster.db"))
//!     .build()
//!     .await?;
//!
//! let worker = tracker
//!     .create_entity(&CreateEntity {
//!         kind: "worker".to_string(),
//!         name: "Amina Hassan".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let change = tracker
//!     .change_status(&ChangeStatus {
//!         id: worker.id,
//!         status: "In Process".to_string(),
//!         note: Some("Medical booked".to_string()),
//!         actor: Some("front-desk".to_string()),
//!     })
//!     .await?;
//! println!("{} moved to {}", change.entity_name, change.to.label());
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use tokio::task;

use crate::{
    db::Database,
    error::{Result, TrackerError},
    transition::TransitionPolicy,
};

pub mod builder;
pub mod entity_ops;
pub mod handlers;
pub mod history_ops;
pub mod layout_ops;
pub mod milestone_ops;

#[cfg(test)]
mod tests;

pub use builder::TrackerBuilder;

/// Main tracker interface.
#[derive(Debug, Clone)]
pub struct Tracker {
    pub(crate) db_path: PathBuf,
    pub(crate) policy: Arc<dyn TransitionPolicy>,
}

impl Tracker {
    pub(crate) fn new(db_path: PathBuf, policy: Arc<dyn TransitionPolicy>) -> Self {
        Self { db_path, policy }
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Runs `op` against a freshly opened database on the blocking pool.
    pub(crate) async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(TrackerError::join)?
    }
}
