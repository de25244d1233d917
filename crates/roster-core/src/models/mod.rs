//! Data models for tracked entities.
//!
//! An [`Entity`] is a worker, document, ticket or task. Each carries a
//! [`Status`] drawn from its kind's closed enumeration, an ordered
//! [`MilestoneSet`] checklist and kind-specific [`Attributes`]. History lives
//! beside the entity as [`HistoryEntry`] rows. Display implementations are in
//! [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use roster_core::models::{EntityKind, MilestoneSet, Status};
//!
//! let mut checklist = MilestoneSet::for_kind(EntityKind::Worker);
//! checklist.set("visa", true)?;
//! assert_eq!(checklist.completed_count(), 1);
//!
//! let status = Status::parse(EntityKind::Worker, "in process")?;
//! assert_eq!(status.label(), "In Process");
//! # roster_core::Result::<()>::Ok(())
//! ```

pub mod attributes;
pub mod entity;
pub mod filters;
pub mod history;
pub mod kind;
pub mod milestone;
pub mod requests;
pub mod status;
pub mod summary;

#[cfg(test)]
mod tests;

pub use attributes::{
    Attributes, DocumentAttributes, TaskAttributes, TicketAttributes, WorkerAttributes,
};
pub use entity::Entity;
pub use filters::{
    DateField, DateRange, EntityFilter, Page, SearchField, Selection, SortDirection, SortKey,
};
pub use history::{HistoryEntry, StatusChange};
pub use kind::EntityKind;
pub use milestone::{Milestone, MilestoneSet};
pub use requests::{NewEntity, UpdateEntityRequest};
pub use status::{
    canonical_label, DocumentStatus, Status, TaskStatus, TicketStatus, WorkerStatus,
};
pub use summary::{EntitySummary, StatusBreakdown};
