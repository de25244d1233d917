//! Handler operations that return display-ready types for the Tracker.

use super::Tracker;
use crate::{
    display::{EntityPage, HistoryEntries},
    error::{Result, TrackerError},
    models::{Entity, EntityKind, EntitySummary, Page, StatusBreakdown},
    params::{DeleteEntity, Id, ListEntities},
    view::{paginate, sort_entities},
};

impl Tracker {
    /// Handle listing entities through the filter view.
    ///
    /// Filtering keeps the store's order (most recently updated first);
    /// sorting and pagination are applied afterwards when requested.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use roster_core::{params::ListEntities, TrackerBuilder};
    /// # async {
    /// let tracker = TrackerBuilder::new().build().await?;
    /// let params = ListEntities {
    ///     kind: Some("worker".to_string()),
    ///     search: Some("amina".to_string()),
    ///     ..Default::default()
    /// };
    /// let page = tracker.list_entities_summary(&params).await?;
    /// println!("{page}");
    /// # Result::<(), roster_core::TrackerError>::Ok(())
    /// # };
    /// ```
    pub async fn list_entities_summary(&self, params: &ListEntities) -> Result<EntityPage> {
        let query = params.to_query()?;
        let entities = self.list_entities(query.kind).await?;

        let mut selected: Vec<&Entity> = query.filter.apply(&entities);
        if let Some((key, direction)) = query.sort {
            sort_entities(&mut selected, key, direction);
        }

        let summaries: Vec<EntitySummary> = selected.into_iter().map(Into::into).collect();
        let page = query.page.unwrap_or(Page {
            number: 1,
            size: summaries.len().max(1),
        });
        Ok(EntityPage(paginate(summaries, page)))
    }

    /// Handle showing an entity's history together with its kind, so status
    /// labels can be drawn with the right badges.
    pub async fn show_history(&self, params: &Id) -> Result<HistoryEntries> {
        let id = params.id;
        self.with_db(move |db| {
            let entity = db
                .get_entity(id)?
                .ok_or(TrackerError::EntityNotFound { id })?;
            let entries = db.list_history(id)?;
            Ok(HistoryEntries {
                kind: entity.kind,
                entries,
            })
        })
        .await
    }

    /// Number of entities of `kind` per status.
    pub async fn status_breakdown(&self, kind: EntityKind) -> Result<StatusBreakdown> {
        let entities = self.list_entities(Some(kind)).await?;
        Ok(StatusBreakdown::tally(kind, &entities))
    }

    /// Handle permanently deleting an entity with confirmation.
    ///
    /// Returns the deleted entity for confirmation, or `None` if it doesn't
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidInput` if `confirmed` is false
    pub async fn delete_entity(&self, params: &DeleteEntity) -> Result<Option<Entity>> {
        if !params.confirmed {
            return Err(TrackerError::invalid_input("confirmed").with_reason(
                "Deletion removes the entity with its milestones and history. Set 'confirmed' to true to proceed.",
            ));
        }
        self.delete_entity_by_id(&Id { id: params.id }).await
    }
}
