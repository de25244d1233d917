//! Append-only history log.
//!
//! [`HistoryLog`] keeps every entity's entries in memory, ordered by
//! `recorded_at` with append order breaking ties. Nothing is validated on
//! append: the status label is stored as given, timestamps may be in the past
//! or the future, and duplicate notes are kept. The SQLite-backed equivalent
//! lives in [`crate::db`].

use std::collections::BTreeMap;

use jiff::Timestamp;

use crate::models::HistoryEntry;

/// In-memory history for many entities.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: BTreeMap<u64, Vec<HistoryEntry>>,
    next_id: u64,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an entry and returns it. Always succeeds.
    pub fn append(
        &mut self,
        entity_id: u64,
        status: impl Into<String>,
        note: impl Into<String>,
        actor: impl Into<String>,
        recorded_at: Timestamp,
    ) -> HistoryEntry {
        self.next_id += 1;
        let entry = HistoryEntry {
            id: self.next_id,
            entity_id,
            recorded_at,
            status: status.into(),
            note: note.into(),
            actor: actor.into(),
        };

        let entries = self.entries.entry(entity_id).or_default();
        // Keep ascending (recorded_at, id) order; a new entry goes after every
        // entry with the same or an earlier timestamp.
        let index = entries.partition_point(|e| e.recorded_at <= recorded_at);
        entries.insert(index, entry.clone());
        entry
    }

    /// Entries of `entity_id`, newest first. The iterator can be recreated
    /// at any time and always yields the same finite sequence until the next
    /// append.
    pub fn list(&self, entity_id: u64) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.slice(entity_id).iter().rev()
    }

    /// Entries of `entity_id`, oldest first, for audit replay.
    pub fn replay(&self, entity_id: u64) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.slice(entity_id).iter()
    }

    /// Most recent entry of `entity_id`.
    pub fn latest(&self, entity_id: u64) -> Option<&HistoryEntry> {
        self.slice(entity_id).last()
    }

    pub fn len(&self, entity_id: u64) -> usize {
        self.slice(entity_id).len()
    }

    pub fn is_empty(&self, entity_id: u64) -> bool {
        self.slice(entity_id).is_empty()
    }

    /// Drops the history of a deleted entity.
    pub fn forget(&mut self, entity_id: u64) -> Vec<HistoryEntry> {
        self.entries.remove(&entity_id).unwrap_or_default()
    }

    fn slice(&self, entity_id: u64) -> &[HistoryEntry] {
        self.entries
            .get(&entity_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
