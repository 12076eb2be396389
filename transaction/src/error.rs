//! Transaction group error types.

use std::fmt;

use thiserror::Error;
use txgroup_core::ParticipantError;
use txgroup_scope::ScopeError;

/// Phase in which a participant failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Commit,
    Rollback,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Commit => write!(f, "commit"),
            Phase::Rollback => write!(f, "rollback"),
        }
    }
}

/// Transaction group errors.
#[derive(Debug, Error)]
pub enum GroupError {
    /// A participant failed to commit or roll back.
    #[error("{key} {phase} failed: {source}")]
    Participant {
        key: String,
        phase: Phase,
        source: ParticipantError,
    },

    /// The scope was already cancelled.
    #[error(transparent)]
    Scope(#[from] ScopeError),
}

impl GroupError {
    pub fn commit_failed(key: impl Into<String>, source: ParticipantError) -> Self {
        Self::Participant {
            key: key.into(),
            phase: Phase::Commit,
            source,
        }
    }

    pub fn rollback_failed(key: impl Into<String>, source: ParticipantError) -> Self {
        Self::Participant {
            key: key.into(),
            phase: Phase::Rollback,
            source,
        }
    }

    /// Key of the participant that failed, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Participant { key, .. } => Some(key),
            Self::Scope(_) => None,
        }
    }

    /// Phase of the participant failure, if any.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::Participant { phase, .. } => Some(*phase),
            Self::Scope(_) => None,
        }
    }

    /// Returns true when the group's scope had already been cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Scope(err) if err.is_cancelled())
    }
}

/// Result type for transaction group operations.
pub type GroupResult<T> = Result<T, GroupError>;
