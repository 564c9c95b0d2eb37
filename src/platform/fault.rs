//! Failure mapping for calls into a managed runtime.
//!
//! A failed call can leave an exception pending on the calling thread, and
//! the runtime rejects most further calls from that thread until it is
//! cleared. Faults are turned into `UsageError` only after the exception is
//! gone, so the shell can still build its error reply.

use crate::error::UsageError;

/// Exception state of the thread a runtime call ran on.
pub trait ExceptionState {
    fn exception_pending(&self) -> bool;

    /// Report the pending exception to the runtime log and clear it.
    fn discard_exception(&self);
}

/// Map a failed call on `capability` to `UsageError`, discarding any
/// exception it left pending.
pub fn release_fault(
    state: &impl ExceptionState,
    capability: &'static str,
    reason: impl Into<String>,
) -> UsageError {
    if state.exception_pending() {
        log::warn!("Clearing exception left pending by {capability}");
        state.discard_exception();
    }
    UsageError::unavailable(capability, reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct ThreadState {
        pending: Cell<bool>,
        discarded: Cell<u32>,
    }

    impl ExceptionState for ThreadState {
        fn exception_pending(&self) -> bool {
            self.pending.get()
        }

        fn discard_exception(&self) {
            self.pending.set(false);
            self.discarded.set(self.discarded.get() + 1);
        }
    }

    #[test]
    fn test_pending_exception_cleared_before_error() {
        let state = ThreadState::default();
        state.pending.set(true);

        let err = release_fault(&state, "settings navigation", "ActivityNotFoundException");

        assert!(!state.exception_pending());
        assert_eq!(state.discarded.get(), 1);
        assert!(matches!(
            err,
            UsageError::CapabilityUnavailable { capability: "settings navigation", .. }
        ));
    }

    #[test]
    fn test_no_exception_leaves_state_alone() {
        let state = ThreadState::default();
        let err = release_fault(&state, "usage stats service", "service not running");

        assert_eq!(state.discarded.get(), 0);
        assert_eq!(
            err.to_string(),
            "usage stats service unavailable: service not running"
        );
    }

    #[test]
    fn test_each_fault_clears_its_own_exception() {
        let state = ThreadState::default();
        for capability in ["app ops", "usage stats service", "package manager"] {
            state.pending.set(true);
            release_fault(&state, capability, "java exception");
            assert!(!state.exception_pending(), "{capability} left an exception pending");
        }
        assert_eq!(state.discarded.get(), 3);
    }
}
