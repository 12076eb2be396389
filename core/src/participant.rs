//! The participant contract.
//!
//! A participant is one independently-owned transaction (a relational
//! transaction, a document store session, a queue publisher, ...). The
//! coordinator only ever calls the four operations of [`Participant`] and
//! never reaches into resource-specific state.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Ordering weight of a participant. Lower weights commit and roll back first.
pub type Weight = u64;

/// Resource-specific failure returned by a participant.
pub type ParticipantError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for participant operations.
pub type ParticipantResult = Result<(), ParticipantError>;

/// Shared handle to a participant.
///
/// The same handle is held by the group's ordered sequence and by every scope
/// binding, so a lookup yields the instance that was registered.
pub type ParticipantRef = Arc<dyn Participant>;

/// Upcasting support so a participant can be recovered as its concrete type.
///
/// Implemented for every `'static + Send + Sync` type; never implement it by hand.
///
/// That includes `Arc<dyn Participant>` itself: `handle.as_any()` on a
/// [`ParticipantRef`] resolves to the `Arc`'s own impl and every downcast to
/// the participant type fails. Call through the trait object instead, e.g.
/// `(*handle).as_any()` or `AsAny::into_any(handle)`.
pub trait AsAny: Any + Send + Sync {
    /// Borrow as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Convert a shared handle into `Arc<dyn Any>`.
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// A transaction that can be driven by a transaction group.
///
/// Methods take `&self` because the participant is shared between the group
/// and the scopes it was published into; implementations keep their
/// transaction handle behind interior mutability.
///
/// Calling `commit` or `rollback` twice is not guarded by the coordinator; the
/// outcome is whatever the underlying resource does (typically an
/// "already finished" error).
pub trait Participant: AsAny {
    /// Commit the transaction.
    fn commit(&self) -> ParticipantResult;

    /// Abort the transaction.
    fn rollback(&self) -> ParticipantResult;

    /// Identifier of the transaction.
    ///
    /// It should be unique among the participants registered into one group.
    fn key(&self) -> &str;

    /// Priority in which the transaction is committed or rolled back.
    fn weight(&self) -> Weight;
}

impl fmt::Debug for dyn Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Participant")
            .field("key", &self.key())
            .field("weight", &self.weight())
            .finish()
    }
}

/// Returns true when both handles point at the same participant instance.
pub fn same_participant(a: &ParticipantRef, b: &ParticipantRef) -> bool {
    Arc::ptr_eq(a, b)
}
