//! Append-only history and status changes.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, Connection};

use super::timestamp_column;
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{HistoryEntry, Status, StatusChange},
    transition::TransitionPolicy,
};

const INSERT_HISTORY_SQL: &str = "INSERT INTO history (entity_id, recorded_at, status, note, actor) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_HISTORY_SQL: &str = "SELECT id, entity_id, recorded_at, status, note, actor FROM history WHERE entity_id = ?1";
const CHECK_ENTITY_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM entities WHERE id = ?1)";
const UPDATE_ENTITY_STATUS_SQL: &str =
    "UPDATE entities SET status = ?1, updated_at = ?2 WHERE id = ?3";

/// Inserts one history row and returns it.
pub(super) fn insert_history(
    conn: &Connection,
    entity_id: u64,
    status: &str,
    note: &str,
    actor: &str,
    recorded_at: &Timestamp,
) -> Result<HistoryEntry> {
    conn.execute(
        INSERT_HISTORY_SQL,
        params![
            entity_id as i64,
            recorded_at.to_string(),
            status,
            note,
            actor
        ],
    )
    .db_context("Failed to insert history entry")?;

    Ok(HistoryEntry {
        id: conn.last_insert_rowid() as u64,
        entity_id,
        recorded_at: *recorded_at,
        status: status.to_string(),
        note: note.to_string(),
        actor: actor.to_string(),
    })
}

fn ensure_entity(conn: &Connection, entity_id: u64) -> Result<()> {
    let exists: bool = conn
        .query_row(CHECK_ENTITY_EXISTS_SQL, params![entity_id as i64], |row| {
            row.get(0)
        })
        .db_context("Failed to check entity existence")?;
    if exists {
        Ok(())
    } else {
        Err(TrackerError::EntityNotFound { id: entity_id })
    }
}

impl super::Database {
    /// Appends a raw history entry.
    ///
    /// The status label is stored as given and the timestamp is not checked
    /// against the clock. Fails only when the entity doesn't exist.
    pub fn append_history(
        &mut self,
        entity_id: u64,
        status: &str,
        note: &str,
        actor: &str,
        recorded_at: Timestamp,
    ) -> Result<HistoryEntry> {
        ensure_entity(&self.connection, entity_id)?;
        insert_history(
            &self.connection,
            entity_id,
            status,
            note,
            actor,
            &recorded_at,
        )
    }

    /// Appends a note stamped with the entity's current status.
    pub fn add_note(&mut self, entity_id: u64, note: &str, actor: &str) -> Result<HistoryEntry> {
        let tx = self.write_transaction()?;

        let Some(entity) = super::entity_queries::load_entity(&tx, entity_id)? else {
            return Err(TrackerError::EntityNotFound { id: entity_id });
        };

        let entry = insert_history(
            &tx,
            entity_id,
            entity.status.label(),
            note,
            actor,
            &Timestamp::now(),
        )?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(entry)
    }

    /// History of an entity, newest first. Entries with equal timestamps are
    /// listed in reverse append order.
    pub fn list_history(&self, entity_id: u64) -> Result<Vec<HistoryEntry>> {
        ensure_entity(&self.connection, entity_id)?;

        let mut stmt = self
            .connection
            .prepare(SELECT_HISTORY_SQL)
            .db_context("Failed to prepare query")?;

        let mut entries = stmt
            .query_map(params![entity_id as i64], |row| {
                Ok(HistoryEntry {
                    id: row.get::<_, i64>(0)? as u64,
                    entity_id: row.get::<_, i64>(1)? as u64,
                    recorded_at: timestamp_column(row, 2)?,
                    status: row.get(3)?,
                    note: row.get(4)?,
                    actor: row.get(5)?,
                })
            })
            .db_context("Failed to query history")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch history")?;

        entries.sort_by(|a, b| {
            b.recorded_at
                .cmp(&a.recorded_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(entries)
    }

    /// Moves an entity to `to` and records the change in its history, both in
    /// one transaction.
    ///
    /// `policy` decides whether the move is allowed; nothing is written when
    /// it refuses.
    pub fn change_status(
        &mut self,
        entity_id: u64,
        to: Status,
        note: &str,
        actor: &str,
        policy: &dyn TransitionPolicy,
    ) -> Result<StatusChange> {
        let tx = self.write_transaction()?;

        let Some(entity) = super::entity_queries::load_entity(&tx, entity_id)? else {
            return Err(TrackerError::EntityNotFound { id: entity_id });
        };

        policy.check(entity.status, to)?;

        let now = Timestamp::now();
        tx.execute(
            UPDATE_ENTITY_STATUS_SQL,
            params![to.label(), now.to_string(), entity_id as i64],
        )
        .db_context("Failed to update entity status")?;

        let entry = insert_history(&tx, entity_id, to.label(), note, actor, &now)?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!(
            "{} {} status '{}' -> '{}' by {actor}",
            entity.kind.as_str(),
            entity_id,
            entity.status.label(),
            to.label()
        );

        Ok(StatusChange {
            entity_id,
            entity_name: entity.name,
            kind: entity.kind,
            from: entity.status,
            to,
            note: note.to_string(),
            entry,
        })
    }
}
