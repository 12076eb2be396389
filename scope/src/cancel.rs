//! Cancellation signal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

/// Handle that cancels the scope it was created with.
///
/// Cancellation is a one-time signal: once fired it stays fired, and firing it
/// again has no effect. Every scope derived from the cancelled layer observes
/// the signal immediately.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fire the signal.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::AcqRel) {
            debug!("scope cancelled");
        }
    }

    /// Check whether the signal has fired.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
