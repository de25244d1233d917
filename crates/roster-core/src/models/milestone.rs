//! Ordered milestone checklists owned by an entity.

use serde::{Deserialize, Serialize};

use super::EntityKind;
use crate::error::{Result, TrackerError};

/// A single named gate in an entity's checklist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Milestone {
    /// Label shown in the checklist, unique within its set
    pub label: String,

    /// Whether the gate has been passed
    #[serde(default)]
    pub satisfied: bool,
}

impl Milestone {
    /// Creates an unsatisfied milestone.
    pub fn pending(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            satisfied: false,
        }
    }

    /// Creates a satisfied milestone.
    pub fn done(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            satisfied: true,
        }
    }

    fn has_label(&self, label: &str) -> bool {
        self.label.eq_ignore_ascii_case(label.trim())
    }
}

/// Ordered sequence of milestones with unique labels.
///
/// Order is display-significant and never changes except through
/// [`MilestoneSet::add`] (appends) and [`MilestoneSet::remove`]. Labels are
/// compared case-insensitively after trimming.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<Milestone>", into = "Vec<Milestone>")]
pub struct MilestoneSet {
    milestones: Vec<Milestone>,
}

impl MilestoneSet {
    /// Builds a set from explicit milestones.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidInput` for an empty label and
    /// `TrackerError::DuplicateMilestone` when a label appears twice.
    pub fn new(milestones: Vec<Milestone>) -> Result<Self> {
        let mut set = Self::default();
        for milestone in milestones {
            set.push(milestone)?;
        }
        Ok(set)
    }

    /// Builds a set of unsatisfied milestones from labels.
    pub fn from_labels<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            labels
                .into_iter()
                .map(|label| Milestone::pending(label.as_ref()))
                .collect(),
        )
    }

    /// The default checklist for a newly registered entity of `kind`.
    pub fn for_kind(kind: EntityKind) -> Self {
        Self {
            milestones: kind
                .default_milestones()
                .iter()
                .map(|label| Milestone::pending(*label))
                .collect(),
        }
    }

    fn push(&mut self, milestone: Milestone) -> Result<()> {
        let label = milestone.label.trim();
        if label.is_empty() {
            return Err(TrackerError::invalid_input("milestone")
                .with_reason("Milestone label cannot be empty"));
        }
        if self.get(label).is_some() {
            return Err(TrackerError::DuplicateMilestone {
                label: label.to_string(),
            });
        }
        self.milestones.push(Milestone {
            label: label.to_string(),
            satisfied: milestone.satisfied,
        });
        Ok(())
    }

    /// Appends a new unsatisfied milestone at the end of the checklist.
    pub fn add(&mut self, label: &str) -> Result<()> {
        self.push(Milestone::pending(label))
    }

    /// Removes a milestone, returning it.
    pub fn remove(&mut self, label: &str) -> Result<Milestone> {
        let index = self.position(label).ok_or_else(|| not_found(label))?;
        Ok(self.milestones.remove(index))
    }

    /// Sets the satisfied flag of the milestone with `label`.
    pub fn set(&mut self, label: &str, satisfied: bool) -> Result<()> {
        let milestone = self
            .milestones
            .iter_mut()
            .find(|m| m.has_label(label))
            .ok_or_else(|| not_found(label))?;
        milestone.satisfied = satisfied;
        Ok(())
    }

    /// Flips the milestone with `label` and returns its new value.
    pub fn toggle(&mut self, label: &str) -> Result<bool> {
        let milestone = self
            .milestones
            .iter_mut()
            .find(|m| m.has_label(label))
            .ok_or_else(|| not_found(label))?;
        milestone.satisfied = !milestone.satisfied;
        Ok(milestone.satisfied)
    }

    /// Looks up a milestone by label.
    pub fn get(&self, label: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.has_label(label))
    }

    /// Index of the milestone with `label` in display order.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.milestones.iter().position(|m| m.has_label(label))
    }

    /// Number of satisfied milestones.
    pub fn completed_count(&self) -> usize {
        self.milestones.iter().filter(|m| m.satisfied).count()
    }

    pub fn len(&self) -> usize {
        self.milestones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Milestone> {
        self.milestones.iter()
    }
}

fn not_found(label: &str) -> TrackerError {
    TrackerError::MilestoneNotFound {
        label: label.trim().to_string(),
    }
}

impl TryFrom<Vec<Milestone>> for MilestoneSet {
    type Error = TrackerError;

    fn try_from(milestones: Vec<Milestone>) -> Result<Self> {
        Self::new(milestones)
    }
}

impl From<MilestoneSet> for Vec<Milestone> {
    fn from(set: MilestoneSet) -> Self {
        set.milestones
    }
}

impl<'a> IntoIterator for &'a MilestoneSet {
    type Item = &'a Milestone;
    type IntoIter = std::slice::Iter<'a, Milestone>;

    fn into_iter(self) -> Self::IntoIter {
        self.milestones.iter()
    }
}
