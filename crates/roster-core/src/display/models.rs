//! Display implementations for domain models.
//!
//! Everything renders as markdown for the terminal renderer and MCP text
//! responses.

use std::fmt;

use super::{
    datetime::LocalDateTime,
    status::{capitalize, ProgressBadge, StatusBadge},
};
use crate::models::{
    Entity, EntityKind, EntitySummary, HistoryEntry, Milestone, MilestoneSet, Status,
    StatusBreakdown, StatusChange,
};

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.satisfied { "x" } else { " " };
        write!(f, "- [{mark}] {}", self.label)
    }
}

impl fmt::Display for MilestoneSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No milestones.");
        }
        for milestone in self {
            writeln!(f, "{milestone}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        writeln!(f, "- Kind: {}", self.kind)?;
        writeln!(f, "- Status: {}", StatusBadge::of(&self.status))?;
        writeln!(f, "- Progress: {}", ProgressBadge(self.progress()))?;
        for (name, value) in self.attributes.details() {
            writeln!(f, "- {name}: {value}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        writeln!(f, "\n## Milestones")?;
        writeln!(f)?;
        write!(f, "{}", self.milestones)
    }
}

impl fmt::Display for EntitySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;

        writeln!(f, "- **Kind**: {}", self.kind)?;
        if let Some(entity_type) = &self.entity_type {
            writeln!(f, "- **Type**: {entity_type}")?;
        }
        writeln!(f, "- **Status**: {}", StatusBadge::of(&self.status))?;
        if self.progress.total > 0 {
            writeln!(f, "- **Progress**: {}", ProgressBadge(self.progress))?;
        }
        writeln!(f, "- **Updated**: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f)
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- {} **{}** by {}",
            LocalDateTime(&self.recorded_at),
            self.status,
            self.actor
        )?;
        if !self.note.is_empty() {
            write!(f, ": {}", self.note)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for StatusChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_change() {
            writeln!(
                f,
                "Moved {} '{}' (ID: {}) from {} to {}",
                self.kind,
                self.entity_name,
                self.entity_id,
                StatusBadge::of(&self.from),
                StatusBadge::of(&self.to)
            )?;
        } else {
            writeln!(
                f,
                "{} '{}' (ID: {}) stays {}",
                capitalize(self.kind.as_str()),
                self.entity_name,
                self.entity_id,
                StatusBadge::of(&self.to)
            )?;
        }
        if !self.note.is_empty() {
            writeln!(f)?;
            writeln!(f, "> {}", self.note)?;
        }
        Ok(())
    }
}

impl fmt::Display for StatusBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} status breakdown", capitalize(self.kind.as_str()))?;
        writeln!(f)?;
        writeln!(f, "| Status | Count |")?;
        writeln!(f, "|:-|-:|")?;
        for (status, count) in &self.counts {
            writeln!(f, "| {} | {count} |", StatusBadge::of(status))?;
        }
        writeln!(f, "| **Total** | **{}** |", self.total())
    }
}
