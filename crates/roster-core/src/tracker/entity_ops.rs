//! Entity operations for the Tracker.

use super::Tracker;
use crate::{
    error::{Result, TrackerError},
    models::{Entity, EntityKind},
    params::{CreateEntity, Id, UpdateEntity},
};

impl Tracker {
    /// Registers a new entity. Unset status and checklist fall back to the
    /// kind's defaults; the registration is the first history entry.
    pub async fn create_entity(&self, params: &CreateEntity) -> Result<Entity> {
        let new = params.to_new_entity()?;
        let actor = params.actor().to_string();

        self.with_db(move |db| db.create_entity(&new, &actor)).await
    }

    /// Retrieves an entity with its milestones.
    pub async fn get_entity(&self, params: &Id) -> Result<Option<Entity>> {
        let id = params.id;
        self.with_db(move |db| db.get_entity(id)).await
    }

    /// Retrieves an entity, failing when it doesn't exist.
    pub async fn require_entity(&self, params: &Id) -> Result<Entity> {
        self.get_entity(params)
            .await?
            .ok_or(TrackerError::EntityNotFound { id: params.id })
    }

    /// Lists entities, most recently updated first.
    pub async fn list_entities(&self, kind: Option<EntityKind>) -> Result<Vec<Entity>> {
        self.with_db(move |db| db.list_entities(kind)).await
    }

    /// Changes name and attributes. Status and milestones have their own
    /// operations.
    pub async fn update_entity(&self, params: &UpdateEntity) -> Result<Entity> {
        if !params.has_changes() {
            return Err(TrackerError::invalid_input("update")
                .with_reason("Nothing to update; pass a name, type or attribute"));
        }

        let id = params.id;
        let params = params.clone();
        self.with_db(move |db| {
            let current = db
                .get_entity(id)?
                .ok_or(TrackerError::EntityNotFound { id })?;
            let request = params.to_request(&current.attributes)?;
            db.update_entity(id, &request)?
                .ok_or(TrackerError::EntityNotFound { id })
        })
        .await
    }

    /// Permanently deletes an entity with its milestones and history.
    /// Returns the deleted entity, or `None` if it didn't exist.
    pub async fn delete_entity_by_id(&self, params: &Id) -> Result<Option<Entity>> {
        let id = params.id;
        self.with_db(move |db| db.delete_entity(id)).await
    }
}
