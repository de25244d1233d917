//! Status transition policies.
//!
//! By default any status of a kind may follow any other. A
//! [`TransitionTable`] restricts changes to an explicit graph; setting the
//! status an entity already has is always accepted.

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::warn;

use crate::{
    error::{Result, TrackerError},
    models::{Status, WorkerStatus},
};

/// Decides whether an entity may move from one status to another.
pub trait TransitionPolicy: Send + Sync + fmt::Debug {
    /// # Errors
    ///
    /// Returns `TrackerError::TransitionRejected` when the move is refused,
    /// or `TrackerError::InvalidInput` when the statuses belong to different
    /// kinds.
    fn check(&self, from: Status, to: Status) -> Result<()>;
}

fn check_kinds(from: Status, to: Status) -> Result<()> {
    if from.kind() != to.kind() {
        return Err(TrackerError::invalid_input("status").with_reason(format!(
            "Status '{}' does not belong to {} entities",
            to.label(),
            from.kind().as_str()
        )));
    }
    Ok(())
}

/// Accepts every transition within a kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unrestricted;

impl TransitionPolicy for Unrestricted {
    fn check(&self, from: Status, to: Status) -> Result<()> {
        check_kinds(from, to)
    }
}

/// Explicit allow-list of transitions.
///
/// Statuses without outgoing edges are terminal except for staying put.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    edges: HashMap<Status, HashSet<Status>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allows `from` to move to each of `to`.
    pub fn allow(mut self, from: Status, to: impl IntoIterator<Item = Status>) -> Self {
        self.edges.entry(from).or_default().extend(to);
        self
    }

    pub fn permits(&self, from: Status, to: Status) -> bool {
        from == to || self.edges.get(&from).is_some_and(|next| next.contains(&to))
    }

    /// Statuses reachable from `from` in one step, in enumeration order.
    pub fn next_statuses(&self, from: Status) -> Vec<Status> {
        Status::all(from.kind())
            .into_iter()
            .filter(|to| *to != from && self.permits(from, *to))
            .collect()
    }

    /// Deployment lifecycle for workers. Other kinds stay unrestricted.
    pub fn worker_lifecycle() -> Self {
        use WorkerStatus::*;

        let w = Status::Worker;
        let table = Self::new()
            .allow(w(Waiting), [w(InProcess), w(Terminate)])
            .allow(w(InProcess), [w(Waiting), w(TodayFlying), w(Terminate)])
            .allow(w(TodayFlying), [w(Abroad), w(InProcess), w(Missing)])
            .allow(
                w(Abroad),
                [w(Return), w(Extend), w(Terminate), w(Missing)],
            )
            .allow(w(Extend), [w(Abroad), w(Return), w(Terminate)])
            .allow(w(Return), [w(Waiting), w(InProcess)])
            .allow(w(Missing), [w(Abroad), w(Return), w(Terminate)]);
        table.open_kinds_except_worker()
    }

    fn open_kinds_except_worker(mut self) -> Self {
        for kind in crate::models::EntityKind::ALL {
            if kind == crate::models::EntityKind::Worker {
                continue;
            }
            let statuses = Status::all(kind);
            for from in &statuses {
                self.edges
                    .entry(*from)
                    .or_default()
                    .extend(statuses.iter().copied());
            }
        }
        self
    }
}

impl TransitionPolicy for TransitionTable {
    fn check(&self, from: Status, to: Status) -> Result<()> {
        check_kinds(from, to)?;
        if self.permits(from, to) {
            return Ok(());
        }
        warn!(
            "Rejected {} transition '{}' -> '{}'",
            from.kind().as_str(),
            from.label(),
            to.label()
        );
        Err(TrackerError::TransitionRejected {
            from: from.label().to_string(),
            to: to.label().to_string(),
        })
    }
}
