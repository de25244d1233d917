//! Milestone operations for the Tracker.

use super::Tracker;
use crate::{
    error::Result,
    models::{Entity, MilestoneSet},
    params::{Id, MilestoneRef, SetMilestone},
};

impl Tracker {
    /// The checklist of an entity.
    pub async fn milestones(&self, params: &Id) -> Result<MilestoneSet> {
        let id = params.id;
        self.with_db(move |db| db.get_milestones(id)).await
    }

    /// Appends an unsatisfied milestone to the checklist.
    pub async fn add_milestone(&self, params: &MilestoneRef) -> Result<Entity> {
        let (id, label) = (params.id, params.label.clone());
        self.with_db(move |db| db.add_milestone(id, &label)).await
    }

    /// Sets a milestone, or flips it when no value is given. Returns the
    /// entity and the milestone's new value.
    pub async fn set_milestone(&self, params: &SetMilestone) -> Result<(Entity, bool)> {
        let (id, label) = (params.id, params.label.clone());
        match params.satisfied {
            Some(satisfied) => {
                self.with_db(move |db| db.set_milestone(id, &label, satisfied))
                    .await
                    .map(|entity| (entity, satisfied))
            }
            None => self.with_db(move |db| db.toggle_milestone(id, &label)).await,
        }
    }

    /// Flips a milestone.
    pub async fn toggle_milestone(&self, params: &MilestoneRef) -> Result<(Entity, bool)> {
        let (id, label) = (params.id, params.label.clone());
        self.with_db(move |db| db.toggle_milestone(id, &label)).await
    }

    /// Removes a milestone from the checklist.
    pub async fn remove_milestone(&self, params: &MilestoneRef) -> Result<Entity> {
        let (id, label) = (params.id, params.label.clone());
        self.with_db(move |db| db.remove_milestone(id, &label)).await
    }
}
