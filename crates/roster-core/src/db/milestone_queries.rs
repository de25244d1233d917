//! Milestone checklist operations.
//!
//! Edits load the entity's [`MilestoneSet`], apply the change through its
//! validated methods and write the whole checklist back in the same
//! transaction, so label uniqueness and order are enforced in one place.

use jiff::Timestamp;
use rusqlite::{params, Connection};

use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{Entity, Milestone, MilestoneSet},
};

const SELECT_MILESTONES_SQL: &str =
    "SELECT label, satisfied FROM milestones WHERE entity_id = ?1 ORDER BY position";
const DELETE_MILESTONES_SQL: &str = "DELETE FROM milestones WHERE entity_id = ?1";
const INSERT_MILESTONE_SQL: &str =
    "INSERT INTO milestones (entity_id, label, satisfied, position) VALUES (?1, ?2, ?3, ?4)";
const CHECK_ENTITY_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM entities WHERE id = ?1)";

/// Reads an entity's checklist in display order.
pub(super) fn load_milestones(conn: &Connection, entity_id: u64) -> Result<MilestoneSet> {
    let mut stmt = conn
        .prepare(SELECT_MILESTONES_SQL)
        .db_context("Failed to prepare query")?;

    let milestones = stmt
        .query_map(params![entity_id as i64], |row| {
            Ok(Milestone {
                label: row.get(0)?,
                satisfied: row.get(1)?,
            })
        })
        .db_context("Failed to query milestones")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch milestones")?;

    MilestoneSet::new(milestones)
}

/// Replaces an entity's checklist rows with `set`.
pub(super) fn write_milestones(conn: &Connection, entity_id: u64, set: &MilestoneSet) -> Result<()> {
    conn.execute(DELETE_MILESTONES_SQL, params![entity_id as i64])
        .db_context("Failed to clear milestones")?;

    let mut stmt = conn
        .prepare(INSERT_MILESTONE_SQL)
        .db_context("Failed to prepare milestone insert")?;
    for (position, milestone) in set.iter().enumerate() {
        stmt.execute(params![
            entity_id as i64,
            milestone.label,
            milestone.satisfied,
            position as i64
        ])
        .db_context("Failed to insert milestone")?;
    }
    Ok(())
}

impl super::Database {
    /// Reads the checklist of an existing entity.
    pub fn get_milestones(&self, entity_id: u64) -> Result<MilestoneSet> {
        let exists: bool = self
            .connection
            .query_row(CHECK_ENTITY_EXISTS_SQL, params![entity_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check entity existence")?;
        if !exists {
            return Err(TrackerError::EntityNotFound { id: entity_id });
        }
        load_milestones(&self.connection, entity_id)
    }

    /// Applies `edit` to the entity's checklist and persists the result.
    ///
    /// Nothing is written when `edit` fails. Returns the updated entity.
    pub fn edit_milestones<F, T>(&mut self, entity_id: u64, edit: F) -> Result<(Entity, T)>
    where
        F: FnOnce(&mut MilestoneSet) -> Result<T>,
    {
        let tx = self.write_transaction()?;

        let Some(mut entity) = super::entity_queries::load_entity(&tx, entity_id)? else {
            return Err(TrackerError::EntityNotFound { id: entity_id });
        };

        let value = edit(&mut entity.milestones)?;

        let now = Timestamp::now();
        write_milestones(&tx, entity_id, &entity.milestones)?;
        super::entity_queries::touch_entity(&tx, entity_id, &now)?;

        tx.commit().db_context("Failed to commit transaction")?;

        entity.updated_at = now;
        Ok((entity, value))
    }

    /// Appends an unsatisfied milestone.
    pub fn add_milestone(&mut self, entity_id: u64, label: &str) -> Result<Entity> {
        self.edit_milestones(entity_id, |set| set.add(label))
            .map(|(entity, ())| entity)
    }

    /// Sets a milestone's satisfied flag.
    pub fn set_milestone(&mut self, entity_id: u64, label: &str, satisfied: bool) -> Result<Entity> {
        self.edit_milestones(entity_id, |set| set.set(label, satisfied))
            .map(|(entity, ())| entity)
    }

    /// Flips a milestone and returns the entity with the new value.
    pub fn toggle_milestone(&mut self, entity_id: u64, label: &str) -> Result<(Entity, bool)> {
        self.edit_milestones(entity_id, |set| set.toggle(label))
    }

    /// Removes a milestone from the checklist.
    pub fn remove_milestone(&mut self, entity_id: u64, label: &str) -> Result<Entity> {
        self.edit_milestones(entity_id, |set| set.remove(label).map(drop))
            .map(|(entity, ())| entity)
    }
}
