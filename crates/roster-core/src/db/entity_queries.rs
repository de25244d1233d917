//! Entity CRUD operations and queries.

use jiff::Timestamp;
use log::warn;
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use super::{invalid_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{Attributes, Entity, EntityKind, MilestoneSet, NewEntity, Status, UpdateEntityRequest},
};

const INSERT_ENTITY_SQL: &str = "INSERT INTO entities (kind, name, status, attributes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_ENTITY_SQL: &str = "SELECT id, kind, name, status, attributes, created_at, updated_at FROM entities WHERE id = ?1";
const SELECT_ALL_ENTITIES_SQL: &str =
    "SELECT id, kind, name, status, attributes, created_at, updated_at FROM entities";
const SELECT_ENTITIES_BY_KIND_SQL: &str = "SELECT id, kind, name, status, attributes, created_at, updated_at FROM entities WHERE kind = ?1";
const UPDATE_ENTITY_SQL: &str =
    "UPDATE entities SET name = ?1, attributes = ?2, updated_at = ?3 WHERE id = ?4";
const TOUCH_ENTITY_SQL: &str = "UPDATE entities SET updated_at = ?1 WHERE id = ?2";
const DELETE_ENTITY_HISTORY_SQL: &str = "DELETE FROM history WHERE entity_id = ?1";
const DELETE_ENTITY_MILESTONES_SQL: &str = "DELETE FROM milestones WHERE entity_id = ?1";
const DELETE_ENTITY_SQL: &str = "DELETE FROM entities WHERE id = ?1";

/// Note written to the history log when an entity is registered.
pub const REGISTERED_NOTE: &str = "Registered";

/// Builds an entity from a row of the `SELECT_*` queries above. Milestones
/// are left empty.
pub(super) fn build_entity_from_row(row: &rusqlite::Row) -> rusqlite::Result<Entity> {
    let kind_str: String = row.get(1)?;
    let kind = kind_str
        .parse::<EntityKind>()
        .map_err(|e| invalid_column(1, e))?;

    let status_str: String = row.get(3)?;
    let status = Status::lookup(kind, &status_str).ok_or_else(|| {
        invalid_column(3, format!("Invalid {} status: {status_str}", kind.as_str()))
    })?;

    let attributes_str: String = row.get(4)?;
    let attributes: Attributes = serde_json::from_str(&attributes_str)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(Entity {
        id: row.get::<_, i64>(0)? as u64,
        kind,
        name: row.get(2)?,
        status,
        attributes,
        milestones: MilestoneSet::default(),
        created_at: timestamp_column(row, 5)?,
        updated_at: timestamp_column(row, 6)?,
    })
}

/// Like [`build_entity_from_row`], but a row whose values cannot be decoded
/// (a status outside its kind's enumeration, malformed attributes) is
/// skipped with a warning so the rest of a listing stays readable.
fn readable_entity_from_row(row: &rusqlite::Row) -> rusqlite::Result<Option<Entity>> {
    match build_entity_from_row(row) {
        Ok(entity) => Ok(Some(entity)),
        Err(rusqlite::Error::FromSqlConversionFailure(column, _, reason)) => {
            let id: i64 = row.get(0)?;
            warn!("Skipping entity {id}: unreadable column {column}: {reason}");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Loads one entity with its milestones.
pub(super) fn load_entity(conn: &Connection, id: u64) -> Result<Option<Entity>> {
    let entity = conn
        .query_row(SELECT_ENTITY_SQL, params![id as i64], build_entity_from_row)
        .optional()
        .db_context("Failed to query entity")?;

    match entity {
        Some(mut entity) => {
            entity.milestones = super::milestone_queries::load_milestones(conn, id)?;
            Ok(Some(entity))
        }
        None => Ok(None),
    }
}

/// Sets `updated_at` of an entity.
pub(super) fn touch_entity(conn: &Connection, id: u64, now: &Timestamp) -> Result<()> {
    conn.execute(TOUCH_ENTITY_SQL, params![now.to_string(), id as i64])
        .db_context("Failed to update entity timestamp")?;
    Ok(())
}

fn check_kinds(status: Status, attributes: &Attributes) -> Result<()> {
    if status.kind() != attributes.kind() {
        return Err(TrackerError::invalid_input("status").with_reason(format!(
            "Status '{}' does not belong to {} entities",
            status.label(),
            attributes.kind().as_str()
        )));
    }
    Ok(())
}

impl super::Database {
    /// Registers a new entity with its checklist and writes the first
    /// history entry.
    pub fn create_entity(&mut self, new: &NewEntity, actor: &str) -> Result<Entity> {
        check_kinds(new.status, &new.attributes)?;
        let kind = new.attributes.kind();
        let attributes = serde_json::to_string(&new.attributes)?;

        let tx = self.write_transaction()?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_ENTITY_SQL,
            params![
                kind.as_str(),
                new.name,
                new.status.label(),
                attributes,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert entity")?;

        let id = tx.last_insert_rowid() as u64;

        super::milestone_queries::write_milestones(&tx, id, &new.milestones)?;
        super::history_queries::insert_history(
            &tx,
            id,
            new.status.label(),
            REGISTERED_NOTE,
            actor,
            &now,
        )?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Entity {
            id,
            kind,
            name: new.name.clone(),
            status: new.status,
            attributes: new.attributes.clone(),
            milestones: new.milestones.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves an entity with its milestones.
    pub fn get_entity(&self, id: u64) -> Result<Option<Entity>> {
        load_entity(&self.connection, id)
    }

    /// Lists entities, most recently updated first.
    pub fn list_entities(&self, kind: Option<EntityKind>) -> Result<Vec<Entity>> {
        let sql = if kind.is_some() {
            SELECT_ENTITIES_BY_KIND_SQL
        } else {
            SELECT_ALL_ENTITIES_SQL
        };

        let mut stmt = self
            .connection
            .prepare(sql)
            .db_context("Failed to prepare query")?;

        let rows = match kind {
            Some(kind) => stmt.query_map(params![kind.as_str()], readable_entity_from_row),
            None => stmt.query_map([], readable_entity_from_row),
        }
        .db_context("Failed to query entities")?;

        let mut entities: Vec<Entity> = rows
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch entities")?
            .into_iter()
            .flatten()
            .collect();

        entities.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        for entity in &mut entities {
            entity.milestones = super::milestone_queries::load_milestones(&self.connection, entity.id)?;
        }

        Ok(entities)
    }

    /// Updates name and attributes. Returns `None` if the entity doesn't
    /// exist.
    pub fn update_entity(
        &mut self,
        id: u64,
        request: &UpdateEntityRequest,
    ) -> Result<Option<Entity>> {
        let tx = self.write_transaction()?;

        let Some(current) = load_entity(&tx, id)? else {
            return Ok(None);
        };

        let name = request.name.as_deref().unwrap_or(&current.name);
        let attributes = request.attributes.as_ref().unwrap_or(&current.attributes);
        check_kinds(current.status, attributes)?;
        let attributes_json = serde_json::to_string(attributes)?;

        tx.execute(
            UPDATE_ENTITY_SQL,
            params![name, attributes_json, Timestamp::now().to_string(), id as i64],
        )
        .db_context("Failed to update entity")?;

        let updated = load_entity(&tx, id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(updated)
    }

    /// Deletes an entity together with its milestones and history. Returns
    /// the deleted entity, or `None` if it didn't exist.
    pub fn delete_entity(&mut self, id: u64) -> Result<Option<Entity>> {
        let tx = self.write_transaction()?;

        let Some(entity) = load_entity(&tx, id)? else {
            return Ok(None);
        };

        tx.execute(DELETE_ENTITY_HISTORY_SQL, params![id as i64])
            .db_context("Failed to delete entity history")?;
        tx.execute(DELETE_ENTITY_MILESTONES_SQL, params![id as i64])
            .db_context("Failed to delete entity milestones")?;
        tx.execute(DELETE_ENTITY_SQL, params![id as i64])
            .db_context("Failed to delete entity")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(Some(entity))
    }
}
