//! Request types passed to the persistence layer.

use super::{Attributes, MilestoneSet, Status};

/// A validated entity ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewEntity {
    pub name: String,
    pub status: Status,
    pub attributes: Attributes,
    pub milestones: MilestoneSet,
}

/// Partial update of an entity's descriptive fields.
///
/// Status and milestones change through their own operations so that every
/// status change is recorded in the history log.
#[derive(Debug, Clone, Default)]
pub struct UpdateEntityRequest {
    pub name: Option<String>,
    pub attributes: Option<Attributes>,
}

impl UpdateEntityRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.attributes.is_none()
    }
}
