//! Status and history operations for the Tracker.

use log::debug;

use super::Tracker;
use crate::{
    error::{Result, TrackerError},
    models::{HistoryEntry, Status, StatusChange},
    params::{AddNote, ChangeStatus, Id},
};

impl Tracker {
    /// Moves an entity to a new status and records it in the history log.
    ///
    /// The status label is parsed against the entity's kind. The configured
    /// transition policy may refuse the move, in which case nothing changes.
    /// The returned [`StatusChange`] is what a notifier would consume.
    pub async fn change_status(&self, params: &ChangeStatus) -> Result<StatusChange> {
        let id = params.id;
        let label = params.status.clone();
        let note = params.note().to_string();
        let actor = params.actor().to_string();
        let policy = self.policy.clone();

        let change = self
            .with_db(move |db| {
                let entity = db
                    .get_entity(id)?
                    .ok_or(TrackerError::EntityNotFound { id })?;
                let to = Status::parse(entity.kind, &label)?;
                db.change_status(id, to, &note, &actor, policy.as_ref())
            })
            .await?;

        debug!(
            "Status change for '{}': {} -> {}",
            change.entity_name,
            change.from.label(),
            change.to.label()
        );
        Ok(change)
    }

    /// Appends a note stamped with the entity's current status.
    pub async fn add_note(&self, params: &AddNote) -> Result<HistoryEntry> {
        let note = params.note.trim().to_string();
        if note.is_empty() {
            return Err(TrackerError::invalid_input("note").with_reason("Note cannot be empty"));
        }
        let id = params.id;
        let actor = params.actor().to_string();

        self.with_db(move |db| db.add_note(id, &note, &actor)).await
    }

    /// History of an entity, newest first.
    pub async fn history(&self, params: &Id) -> Result<Vec<HistoryEntry>> {
        let id = params.id;
        self.with_db(move |db| db.list_history(id)).await
    }
}
