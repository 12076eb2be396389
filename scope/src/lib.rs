//! TxGroup Scope
//!
//! Propagated, cancellable scopes carrying participant bindings.
//!
//! Responsibilities:
//! - Bind participants under their keys into immutable scope layers
//! - Resolve a participant by key for downstream code
//! - Carry the cancellation signal that marks the end of a unit of work
//! - Refuse lookups once the scope has been cancelled

mod cancel;
mod error;
mod scope;

pub use cancel::CancelHandle;
pub use error::{ScopeError, ScopeResult};
pub use scope::{new_scope, sort_by_weight, Scope};
