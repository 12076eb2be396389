//! TxGroup Transaction
//!
//! Handle several independent transactions as if they were a single block.
//!
//! Responsibilities:
//! - Keep the participants of a unit of work ordered by weight
//! - Publish them into a cancellable scope for downstream code
//! - Implement COMMIT (stop at the first failure, then roll everything back)
//! - Implement ROLLBACK (attempt every participant, report the first failure)
//! - Cancel the scope once the unit of work is finished
//!
//! This is sequencing, not two-phase commit: participants committed before a
//! failing one stay committed.
//!
//! # Example
//!
//! ```ignore
//! let (group, scope) = Group::begin(Some(&request_scope), vec![sql_tx]);
//!
//! service.create_user(&scope, user)?; // looks up "sql" in the scope
//!
//! if let Err(e) = group.commit() {
//!     // the group has already been rolled back
//! }
//! ```

mod builder;
mod error;
mod group;

pub use builder::GroupBuilder;
pub use error::{GroupError, GroupResult, Phase};
pub use group::{Group, GroupState};

pub use txgroup_core::{
    same_participant, AsAny, Participant, ParticipantError, ParticipantRef, ParticipantResult,
    Weight,
};
pub use txgroup_scope::{new_scope, CancelHandle, Scope, ScopeError, ScopeResult};
