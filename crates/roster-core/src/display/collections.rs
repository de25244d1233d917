//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use super::{datetime::LocalDateTime, status::StatusBadge};
use crate::{
    models::{EntityKind, EntitySummary, HistoryEntry},
    view::PageSlice,
};

/// One page of entity summaries.
///
/// Handles empty results and prints page metadata when the listing spans
/// more than one page.
#[derive(Debug, Clone)]
pub struct EntityPage(pub PageSlice<EntitySummary>);

impl EntityPage {
    pub fn is_empty(&self) -> bool {
        self.0.items.is_empty()
    }

    /// Number of summaries on this page.
    pub fn len(&self) -> usize {
        self.0.items.len()
    }

    /// Number of matching entities across all pages.
    pub fn total(&self) -> usize {
        self.0.total
    }

    pub fn get(&self, index: usize) -> Option<&EntitySummary> {
        self.0.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntitySummary> {
        self.0.items.iter()
    }
}

impl Index<usize> for EntityPage {
    type Output = EntitySummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0.items[index]
    }
}

impl IntoIterator for EntityPage {
    type Item = EntitySummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a EntityPage {
    type Item = &'a EntitySummary;
    type IntoIter = std::slice::Iter<'a, EntitySummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.items.iter()
    }
}

impl fmt::Display for EntityPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.items.is_empty() {
            if self.0.total > 0 {
                return writeln!(
                    f,
                    "No entities on page {} ({} pages).",
                    self.0.page,
                    self.0.pages()
                );
            }
            return writeln!(f, "No entities found.");
        }

        for summary in &self.0.items {
            write!(f, "{summary}")?;
        }
        if self.0.pages() > 1 {
            writeln!(
                f,
                "Page {} of {} ({} entities)",
                self.0.page,
                self.0.pages(),
                self.0.total
            )?;
        }
        Ok(())
    }
}

/// History entries of one entity, newest first.
///
/// Carries the entity's kind so recorded status labels get their badges.
#[derive(Debug, Clone)]
pub struct HistoryEntries {
    pub kind: EntityKind,
    pub entries: Vec<HistoryEntry>,
}

impl HistoryEntries {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a HistoryEntries {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for HistoryEntries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "No history recorded.");
        }
        for entry in &self.entries {
            write!(
                f,
                "- {} **{}** by {}",
                LocalDateTime(&entry.recorded_at),
                StatusBadge::new(self.kind, &entry.status),
                entry.actor
            )?;
            if !entry.note.is_empty() {
                write!(f, ": {}", entry.note)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
