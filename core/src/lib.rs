//! TxGroup Core Types
//!
//! This crate provides the contract every transactional resource implements
//! to take part in a transaction group:
//! - The `Participant` trait (commit, rollback, key, weight)
//! - Shared handle and error aliases (`ParticipantRef`, `ParticipantError`)
//! - `AsAny` support for recovering a participant's concrete type

mod participant;

pub use participant::*;
