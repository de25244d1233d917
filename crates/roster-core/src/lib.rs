//! Core library for the Roster recruitment tracker.
//!
//! Tracks workers, documents, tickets and tasks. Each entity moves through its
//! kind's closed status enumeration, carries an ordered milestone checklist
//! from which progress is derived, and keeps an append-only history of status
//! changes and notes. Listings are narrowed with a conjunctive
//! [`models::EntityFilter`] and rendered as markdown.
//!
//! # Display Architecture
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] for direct
//!   formatting
//! - **Display Wrappers** ([`display`]): Badges, pages and operation results
//! - **Appearance** ([`appearance`]): The single status to tone/icon table
//!   every badge consults
//!
//! # Quick Start
//!
//! ```rust
//! use roster_core::{
//!     params::{ChangeStatus, CreateEntity, ListEntities, SetMilestone},
//!     EntityKind, TrackerBuilder,
//! };
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
//! tracker
//!     .set_milestone(&SetMilestone {
//!         id: worker.id,
//!         label: "visa".to_string(),
//!         satisfied: Some(true),
//!     })
//!     .await?;
//!
//! let change = tracker
//!     .change_status(&ChangeStatus {
//!         id: worker.id,
//!         status: "In Process".to_string(),
//!         note: Some("Visa stamped".to_string()),
//!         actor: None,
//!     })
//!     .await?;
//! println!("{change}");
//!
//! let page = tracker
//!     .list_entities_summary(&ListEntities::of_kind(EntityKind::Worker))
//!     .await?;
//! println!("{page}");
//! # Ok(())
//! # }
//! ```

pub mod appearance;
pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod history;
pub mod models;
pub mod params;
pub mod progress;
pub mod tracker;
pub mod transition;
pub mod view;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, EntityPage, HistoryEntries, OperationStatus, UpdateResult,
};
pub use error::{Result, TrackerError};
pub use models::{
    Entity, EntityFilter, EntityKind, EntitySummary, HistoryEntry, Milestone, MilestoneSet,
    Status, StatusChange,
};
pub use progress::{Progress, ProgressBand};
pub use tracker::{Tracker, TrackerBuilder};
pub use transition::{TransitionPolicy, TransitionTable, Unrestricted};
