//! Entity summary types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind, Status};
use crate::progress::Progress;

/// List-row view of an entity with its checklist progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntitySummary {
    pub id: u64,
    pub kind: EntityKind,
    pub name: String,
    pub status: Status,
    /// Kind-specific type, when set
    pub entity_type: Option<String>,
    pub updated_at: Timestamp,
    pub progress: Progress,
}

impl From<&Entity> for EntitySummary {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            kind: entity.kind,
            name: entity.name.clone(),
            status: entity.status,
            entity_type: entity.attributes.type_label().map(String::from),
            updated_at: entity.updated_at,
            progress: entity.progress(),
        }
    }
}

/// Number of entities of one kind per status, in enumeration order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusBreakdown {
    pub kind: EntityKind,
    pub counts: Vec<(Status, usize)>,
}

impl StatusBreakdown {
    /// Counts the statuses of `entities` belonging to `kind`. Every status of
    /// the enumeration is listed, including those with no entities.
    pub fn tally<'a>(kind: EntityKind, entities: impl IntoIterator<Item = &'a Entity>) -> Self {
        let mut counts: Vec<(Status, usize)> =
            Status::all(kind).into_iter().map(|s| (s, 0)).collect();
        for entity in entities.into_iter().filter(|e| e.kind == kind) {
            if let Some(slot) = counts.iter_mut().find(|(s, _)| *s == entity.status) {
                slot.1 += 1;
            }
        }
        Self { kind, counts }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}
