//! Entity model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Attributes, EntityKind, MilestoneSet, Status};
use crate::progress::Progress;

/// A tracked record: worker, document, ticket or task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    /// Unique identifier for the entity
    pub id: u64,

    /// Kind discriminator, always equal to `status.kind()` and
    /// `attributes.kind()`
    pub kind: EntityKind,

    /// Human display name
    pub name: String,

    /// Current lifecycle status
    pub status: Status,

    /// Kind-specific attributes
    pub attributes: Attributes,

    /// Ordered checklist
    #[serde(default)]
    pub milestones: MilestoneSet,

    /// Timestamp when the entity was registered (UTC)
    pub created_at: Timestamp,

    /// Timestamp of the last status, milestone or attribute change (UTC)
    pub updated_at: Timestamp,
}

impl Entity {
    /// Checklist progress of this entity.
    pub fn progress(&self) -> Progress {
        Progress::of(&self.milestones)
    }
}
