//! Transaction group coordinator.

use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};
use txgroup_core::ParticipantRef;
use txgroup_scope::{new_scope, CancelHandle, Scope};

use crate::builder::GroupBuilder;
use crate::error::{GroupError, GroupResult};

/// Whether the group itself has been finalized.
///
/// Cancelling a parent scope makes the group's scope refuse lookups and
/// registrations but leaves the group `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupState {
    /// Participants can still be registered and looked up.
    Open,
    /// The group was committed or rolled back.
    Finalized,
}

/// A group of transactions committed or rolled back as one unit of work.
///
/// The group owns the authoritative, weight-ordered participant sequence; the
/// scope returned alongside it only publishes the participants to downstream
/// code. The group is meant to be driven by one unit of work at a time and
/// performs no locking of its own.
#[derive(Debug)]
pub struct Group {
    participants: Vec<ParticipantRef>,
    cancel: CancelHandle,
}

impl Group {
    /// Start a unit of work.
    ///
    /// Returns the group and a scope, derived from `parent` (or an empty root),
    /// with every participant bound under its key.
    pub fn begin(parent: Option<&Scope>, mut participants: Vec<ParticipantRef>) -> (Self, Scope) {
        let (scope, cancel) = new_scope(parent, &mut participants);
        debug!(participants = participants.len(), "transaction group started");

        (
            Self {
                participants,
                cancel,
            },
            scope,
        )
    }

    /// Configure a unit of work before starting it.
    pub fn builder() -> GroupBuilder {
        GroupBuilder::new()
    }

    /// Add a participant to the group.
    ///
    /// Fails if `scope` was already cancelled, leaving the group unchanged.
    /// Otherwise the participant is inserted before the first participant
    /// whose weight is greater or equal, and a scope binding it is returned.
    ///
    /// Keys are not deduplicated: a participant registered under a key that
    /// is already taken is committed and rolled back like any other, but only
    /// the newest binding is reachable through the returned scope.
    pub fn register(&mut self, scope: &Scope, participant: ParticipantRef) -> GroupResult<Scope> {
        // Prevent extending the group after it was committed or rolled back.
        scope.check()?;

        let weight = participant.weight();
        let index = self.participants.partition_point(|p| p.weight() < weight);
        self.participants.insert(index, Arc::clone(&participant));
        debug!(
            key = participant.key(),
            weight,
            position = index,
            "participant registered"
        );

        Ok(scope.with_participant(participant))
    }

    /// Commit every participant, lowest weight first.
    ///
    /// On the first failure the whole group is rolled back and the commit
    /// failure is returned. Participants committed before the failing one stay
    /// committed. On success the scope is cancelled.
    pub fn commit(&self) -> GroupResult<()> {
        for participant in &self.participants {
            if let Err(source) = participant.commit() {
                warn!(key = participant.key(), error = %source, "participant commit failed");
                if let Err(err) = self.rollback() {
                    warn!(error = %err, "rollback after failed commit failed");
                }
                return Err(GroupError::commit_failed(participant.key(), source));
            }
        }

        self.cancel.cancel();
        debug!(participants = self.participants.len(), "transaction group committed");
        Ok(())
    }

    /// Roll back every participant, lowest weight first.
    ///
    /// Every participant is attempted even after a failure; only the first
    /// failure is returned. The scope is cancelled in every case.
    pub fn rollback(&self) -> GroupResult<()> {
        let first_failure = OnceLock::new();

        for participant in &self.participants {
            if let Err(source) = participant.rollback() {
                warn!(key = participant.key(), error = %source, "participant rollback failed");
                let _ = first_failure.set(GroupError::rollback_failed(participant.key(), source));
            }
        }

        self.cancel.cancel();
        debug!(participants = self.participants.len(), "transaction group rolled back");

        match first_failure.into_inner() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Get the current group state.
    pub fn state(&self) -> GroupState {
        if self.cancel.is_cancelled() {
            GroupState::Finalized
        } else {
            GroupState::Open
        }
    }

    /// Participant keys in execution order.
    pub fn keys(&self) -> Vec<&str> {
        self.participants.iter().map(|p| p.key()).collect()
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Check if the group has no participants.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
