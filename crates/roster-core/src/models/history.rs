//! History entry model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{EntityKind, Status};

/// One immutable line of an entity's history.
///
/// `status` records the label as it was written at the time and is never
/// checked against the entity's status enumeration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Unique identifier, increasing in append order
    pub id: u64,

    /// Entity this entry belongs to
    pub entity_id: u64,

    /// When the entry was recorded (UTC)
    pub recorded_at: Timestamp,

    /// Status label at the time
    pub status: String,

    /// Free-text note
    pub note: String,

    /// Who recorded the entry
    pub actor: String,
}

/// Outcome of a status change, handed to whoever sends notifications.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusChange {
    pub entity_id: u64,
    pub entity_name: String,
    pub kind: EntityKind,
    pub from: Status,
    pub to: Status,
    pub note: String,
    /// History entry written for the change
    pub entry: HistoryEntry,
}

impl StatusChange {
    /// Whether the status actually moved.
    pub fn is_change(&self) -> bool {
        self.from != self.to
    }
}
