//! Scope chain and participant lookup.

use std::fmt;
use std::sync::Arc;

use txgroup_core::{AsAny, Participant, ParticipantRef};

use crate::cancel::CancelHandle;
use crate::error::{ScopeError, ScopeResult};

/// A propagated, cancellable set of participant bindings.
///
/// Scopes are immutable: every binding or cancellation layer produces a new
/// scope that points at its parent. Cloning is cheap and shares the chain.
/// A later binding for a key shadows earlier ones without removing them.
#[derive(Clone)]
pub struct Scope {
    node: Arc<Node>,
}

struct Node {
    parent: Option<Scope>,
    layer: Layer,
}

// Unlink the parent chain iteratively; a long chain of registrations would
// otherwise be freed one stack frame per layer.
impl Drop for Node {
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(scope) = parent {
            parent = match Arc::into_inner(scope.node) {
                Some(mut node) => node.parent.take(),
                None => None,
            };
        }
    }
}

enum Layer {
    Root,
    Binding {
        key: String,
        participant: ParticipantRef,
    },
    Cancel(CancelHandle),
}

impl Scope {
    /// Create an empty root scope. It is never cancelled.
    pub fn root() -> Self {
        Self {
            node: Arc::new(Node {
                parent: None,
                layer: Layer::Root,
            }),
        }
    }

    fn child(&self, layer: Layer) -> Self {
        Self {
            node: Arc::new(Node {
                parent: Some(self.clone()),
                layer,
            }),
        }
    }

    /// Derive a scope binding `participant` under its own key.
    pub fn with_participant(&self, participant: ParticipantRef) -> Self {
        let key = participant.key().to_string();
        self.child(Layer::Binding { key, participant })
    }

    /// Derive a cancellable scope.
    ///
    /// Cancelling the returned handle cancels the returned scope and every
    /// scope derived from it, never `self`.
    pub fn with_cancel(&self) -> (Self, CancelHandle) {
        let handle = CancelHandle::new();
        (self.child(Layer::Cancel(handle.clone())), handle)
    }

    /// Check if this scope or any of its ancestors has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.layers()
            .any(|layer| matches!(layer, Layer::Cancel(handle) if handle.is_cancelled()))
    }

    /// Fail with [`ScopeError::Cancelled`] once the scope has been cancelled.
    pub fn check(&self) -> ScopeResult<()> {
        if self.is_cancelled() {
            return Err(ScopeError::Cancelled);
        }
        Ok(())
    }

    /// Get the participant bound under `key`.
    ///
    /// Cancellation is checked before the bindings, so a participant whose
    /// group has already finished is never handed out.
    pub fn lookup(&self, key: &str) -> ScopeResult<ParticipantRef> {
        self.check()?;

        self.layers()
            .find_map(|layer| match layer {
                Layer::Binding {
                    key: bound,
                    participant,
                } if bound == key => Some(Arc::clone(participant)),
                _ => None,
            })
            .ok_or_else(|| ScopeError::not_found(key))
    }

    /// Get the participant bound under `key` as its concrete type.
    pub fn lookup_as<T: Participant>(&self, key: &str) -> ScopeResult<Arc<T>> {
        let participant = self.lookup(key)?;
        AsAny::into_any(participant)
            .downcast::<T>()
            .map_err(|_| ScopeError::type_mismatch(key, std::any::type_name::<T>()))
    }

    /// Keys reachable through [`lookup`](Self::lookup), newest binding first.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for layer in self.layers() {
            if let Layer::Binding { key, .. } = layer {
                if !keys.contains(&key.as_str()) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    fn layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        std::iter::successors(Some(&*self.node), |&node| {
            node.parent.as_ref().map(|parent| &*parent.node)
        })
        .map(|node| &node.layer)
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("keys", &self.keys())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Sort participants ascending by weight, keeping insertion order among equals.
pub fn sort_by_weight(participants: &mut [ParticipantRef]) {
    // Nothing to order for zero or one participant.
    if participants.len() > 1 {
        participants.sort_by_key(|participant| participant.weight());
    }
}

/// Create a cancellable scope with `participants` bound in it.
///
/// The participants are sorted in place by weight and bound in that order.
/// Without a parent an empty root scope is used.
pub fn new_scope(
    parent: Option<&Scope>,
    participants: &mut [ParticipantRef],
) -> (Scope, CancelHandle) {
    sort_by_weight(participants);

    let mut scope = parent.cloned().unwrap_or_default();
    for participant in participants.iter() {
        scope = scope.with_participant(Arc::clone(participant));
    }
    scope.with_cancel()
}
