//! Entity kind discriminator.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kinds of records the agency tracks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A registered worker going through deployment
    Worker,
    /// An uploaded document (passport, visa, medical report, ...)
    Document,
    /// A travel ticket arranged for a worker
    Ticket,
    /// An internal staff task
    Task,
}

impl EntityKind {
    /// Every kind, in display order.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Worker,
        EntityKind::Document,
        EntityKind::Ticket,
        EntityKind::Task,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Worker => "worker",
            EntityKind::Document => "document",
            EntityKind::Ticket => "ticket",
            EntityKind::Task => "task",
        }
    }

    /// Default checklist labels given to a new entity of this kind when none
    /// are supplied.
    pub fn default_milestones(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Worker => &[
                "visa",
                "passport",
                "medical",
                "contract",
                "insurance",
                "orientation",
            ],
            EntityKind::Document => &["uploaded", "verified", "attested"],
            EntityKind::Ticket => &["booked", "paid", "issued"],
            EntityKind::Task => &[],
        }
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "worker" | "workers" => Ok(EntityKind::Worker),
            "document" | "documents" | "doc" => Ok(EntityKind::Document),
            "ticket" | "tickets" => Ok(EntityKind::Ticket),
            "task" | "tasks" => Ok(EntityKind::Task),
            _ => Err(format!("Invalid entity kind: {s}")),
        }
    }
}
