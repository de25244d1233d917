//! Closed status enumerations for each entity kind.
//!
//! Statuses are lifecycle labels only. Nothing here couples a status to the
//! milestone checklist, and no transition graph is enforced unless a
//! [`crate::transition::TransitionPolicy`] is configured on the tracker.

use serde::{Deserialize, Serialize};

use super::EntityKind;
use crate::error::{Result, TrackerError};

/// Canonical form of a status label used for comparisons.
///
/// Case is folded and spaces or hyphens are treated as underscores, so
/// `"In Process"`, `"in-process"` and `"in_process"` compare equal.
pub fn canonical_label(label: &str) -> String {
    label
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Worker deployment lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WorkerStatus {
    Waiting,
    #[serde(rename = "In Process")]
    InProcess,
    #[serde(rename = "Today Flying")]
    TodayFlying,
    Abroad,
    Return,
    Extend,
    Terminate,
    Missing,
}

impl WorkerStatus {
    pub const ALL: [WorkerStatus; 8] = [
        WorkerStatus::Waiting,
        WorkerStatus::InProcess,
        WorkerStatus::TodayFlying,
        WorkerStatus::Abroad,
        WorkerStatus::Return,
        WorkerStatus::Extend,
        WorkerStatus::Terminate,
        WorkerStatus::Missing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WorkerStatus::Waiting => "Waiting",
            WorkerStatus::InProcess => "In Process",
            WorkerStatus::TodayFlying => "Today Flying",
            WorkerStatus::Abroad => "Abroad",
            WorkerStatus::Return => "Return",
            WorkerStatus::Extend => "Extend",
            WorkerStatus::Terminate => "Terminate",
            WorkerStatus::Missing => "Missing",
        }
    }
}

/// Document review lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    PendingReview,
    Approved,
    Rejected,
    NeedsCorrection,
    Expired,
    Processing,
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 6] = [
        DocumentStatus::PendingReview,
        DocumentStatus::Approved,
        DocumentStatus::Rejected,
        DocumentStatus::NeedsCorrection,
        DocumentStatus::Expired,
        DocumentStatus::Processing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DocumentStatus::PendingReview => "pending_review",
            DocumentStatus::Approved => "approved",
            DocumentStatus::Rejected => "rejected",
            DocumentStatus::NeedsCorrection => "needs_correction",
            DocumentStatus::Expired => "expired",
            DocumentStatus::Processing => "processing",
        }
    }
}

/// Ticket arrangement lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TicketStatus {
    Confirmed,
    Pending,
    Cancelled,
    Completed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::Confirmed,
        TicketStatus::Pending,
        TicketStatus::Cancelled,
        TicketStatus::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Confirmed => "Confirmed",
            TicketStatus::Pending => "Pending",
            TicketStatus::Cancelled => "Cancelled",
            TicketStatus::Completed => "Completed",
        }
    }
}

/// Staff task lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Overdue,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Overdue,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Overdue => "overdue",
        }
    }
}

/// A status value tagged with the kind whose enumeration it belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Worker(WorkerStatus),
    Document(DocumentStatus),
    Ticket(TicketStatus),
    Task(TaskStatus),
}

impl Status {
    /// Kind whose enumeration this value belongs to.
    pub fn kind(&self) -> EntityKind {
        match self {
            Status::Worker(_) => EntityKind::Worker,
            Status::Document(_) => EntityKind::Document,
            Status::Ticket(_) => EntityKind::Ticket,
            Status::Task(_) => EntityKind::Task,
        }
    }

    /// Display label, also used as the stored representation.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Worker(s) => s.label(),
            Status::Document(s) => s.label(),
            Status::Ticket(s) => s.label(),
            Status::Task(s) => s.label(),
        }
    }

    /// Every status of `kind`, in enumeration order.
    pub fn all(kind: EntityKind) -> Vec<Status> {
        match kind {
            EntityKind::Worker => WorkerStatus::ALL.iter().copied().map(Status::Worker).collect(),
            EntityKind::Document => DocumentStatus::ALL
                .iter()
                .copied()
                .map(Status::Document)
                .collect(),
            EntityKind::Ticket => TicketStatus::ALL.iter().copied().map(Status::Ticket).collect(),
            EntityKind::Task => TaskStatus::ALL.iter().copied().map(Status::Task).collect(),
        }
    }

    /// Status assigned to a newly registered entity of `kind`.
    pub fn initial(kind: EntityKind) -> Status {
        match kind {
            EntityKind::Worker => Status::Worker(WorkerStatus::Waiting),
            EntityKind::Document => Status::Document(DocumentStatus::PendingReview),
            EntityKind::Ticket => Status::Ticket(TicketStatus::Pending),
            EntityKind::Task => Status::Task(TaskStatus::Pending),
        }
    }

    /// Looks up `label` in the enumeration of `kind`, returning `None` for
    /// values outside the closed set.
    pub fn lookup(kind: EntityKind, label: &str) -> Option<Status> {
        let wanted = canonical_label(label);
        Status::all(kind)
            .into_iter()
            .find(|status| canonical_label(status.label()) == wanted)
    }

    /// Parses `label` as a status of `kind`.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidInput` naming the accepted labels when
    /// `label` is not part of the enumeration.
    pub fn parse(kind: EntityKind, label: &str) -> Result<Status> {
        Status::lookup(kind, label).ok_or_else(|| {
            let accepted: Vec<&str> = Status::all(kind).iter().map(Status::label).collect();
            TrackerError::invalid_input("status").with_reason(format!(
                "Invalid {} status: {label}. Must be one of: {}",
                kind.as_str(),
                accepted.join(", ")
            ))
        })
    }
}
