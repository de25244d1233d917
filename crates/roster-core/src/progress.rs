//! Checklist progress and its qualitative band.
//!
//! Progress is a pure function of a [`MilestoneSet`]: the share of satisfied
//! milestones, and a band derived from fixed thresholds.
//!
//! | ratio            | band               |
//! |------------------|--------------------|
//! | 1.0              | `Complete`         |
//! | 0.70 ..< 1.0     | `In Progress`      |
//! | below 0.70       | `Attention Needed` |
//!
//! ```rust
//! use roster_core::{models::{Milestone, MilestoneSet}, progress::{Progress, ProgressBand}};
//!
//! let set = MilestoneSet::new(vec![
//!     Milestone::done("visa"),
//!     Milestone::done("passport"),
//!     Milestone::pending("medical"),
//! ])?;
//! let progress = Progress::of(&set);
//! assert_eq!(progress.completed, 2);
//! assert_eq!(progress.band(), ProgressBand::AttentionNeeded);
//! # roster_core::Result::<()>::Ok(())
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::MilestoneSet;

/// Ratio at or above which incomplete work counts as "In Progress".
pub const IN_PROGRESS_THRESHOLD: f64 = 0.70;

/// Qualitative progress band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressBand {
    Complete,
    InProgress,
    AttentionNeeded,
}

impl ProgressBand {
    /// Band for an arbitrary ratio in `[0, 1]`.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 1.0 {
            ProgressBand::Complete
        } else if ratio >= IN_PROGRESS_THRESHOLD {
            ProgressBand::InProgress
        } else {
            ProgressBand::AttentionNeeded
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProgressBand::Complete => "Complete",
            ProgressBand::InProgress => "In Progress",
            ProgressBand::AttentionNeeded => "Attention Needed",
        }
    }
}

impl fmt::Display for ProgressBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Completed and total milestone counts of one checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Measures a checklist.
    pub fn of(milestones: &MilestoneSet) -> Self {
        Self {
            completed: milestones.completed_count(),
            total: milestones.len(),
        }
    }

    /// `completed / total`, or `0.0` for an empty checklist.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    /// Ratio as a whole percentage, rounded down.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (self.completed * 100 / self.total) as u32
        }
    }

    /// Band of this progress.
    ///
    /// Evaluated on the integer counts so that a ratio of exactly 70% always
    /// lands in `InProgress`.
    pub fn band(&self) -> ProgressBand {
        if self.total > 0 && self.completed >= self.total {
            ProgressBand::Complete
        } else if self.total > 0 && self.completed * 10 >= self.total * 7 {
            ProgressBand::InProgress
        } else {
            ProgressBand::AttentionNeeded
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({}%, {})",
            self.completed,
            self.total,
            self.percent(),
            self.band()
        )
    }
}
