//! Builder for starting a transaction group.

use txgroup_core::ParticipantRef;
use txgroup_scope::Scope;

use crate::group::Group;

/// Collects the parent scope and initial participants of a unit of work.
#[derive(Debug, Default)]
pub struct GroupBuilder {
    parent: Option<Scope>,
    participants: Vec<ParticipantRef>,
}

impl GroupBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the group's scope from `parent` instead of an empty root.
    pub fn parent(mut self, parent: &Scope) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    /// Add an initial participant.
    pub fn participant(mut self, participant: ParticipantRef) -> Self {
        self.participants.push(participant);
        self
    }

    /// Add several initial participants.
    pub fn participants(mut self, participants: impl IntoIterator<Item = ParticipantRef>) -> Self {
        self.participants.extend(participants);
        self
    }

    /// Start the unit of work.
    pub fn begin(self) -> (Group, Scope) {
        Group::begin(self.parent.as_ref(), self.participants)
    }
}
