//! Single-slot submission guard.
//!
//! The guard is advisory: it never blocks or queues. Callers check it (or
//! use [`SubmissionGuard::try_acquire`]) before starting a submission and
//! treat a held guard as "busy". Entries are counted and released by
//! dropping a [`GuardPermit`], so every exit path (return, `?`, panic, or a
//! dropped future) gives the slot back.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, instrument, trace};

/// Counting lock shared by clones.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard {
    active: Arc<AtomicUsize>,
}

impl SubmissionGuard {
    /// Creates an unlocked guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while any protected region is running.
    pub fn is_locked(&self) -> bool {
        self.active.load(Ordering::Acquire) > 0
    }

    /// Enters the protected region unconditionally.
    pub fn enter(&self) -> GuardPermit {
        let previous = self.active.fetch_add(1, Ordering::AcqRel);
        trace!(active = previous + 1, "Entered guarded region");
        GuardPermit {
            active: Arc::clone(&self.active),
        }
    }

    /// Enters the protected region only if nothing else holds it.
    #[instrument(skip(self))]
    pub fn try_acquire(&self) -> Option<GuardPermit> {
        match self
            .active
            .compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => Some(GuardPermit {
                active: Arc::clone(&self.active),
            }),
            Err(active) => {
                debug!(active, "Guard already held");
                None
            }
        }
    }

    /// Runs `action` inside the protected region and returns its output.
    ///
    /// The guard is held for the whole of `action` and released afterwards
    /// whether it succeeds, fails or is dropped mid-flight.
    pub async fn run_exclusive<F>(&self, action: F) -> F::Output
    where
        F: Future,
    {
        let _permit = self.enter();
        action.await
    }
}

/// Proof of being inside the guarded region. Dropping it releases the slot.
#[derive(Debug)]
#[must_use = "the guard is released as soon as the permit is dropped"]
pub struct GuardPermit {
    active: Arc<AtomicUsize>,
}

impl Drop for GuardPermit {
    fn drop(&mut self) {
        let previous = self.active.fetch_sub(1, Ordering::AcqRel);
        trace!(active = previous - 1, "Left guarded region");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permit_releases_on_drop() {
        let guard = SubmissionGuard::new();
        let permit = guard.try_acquire().expect("Guard should be free");
        assert!(guard.is_locked());
        assert!(guard.try_acquire().is_none());
        drop(permit);
        assert!(!guard.is_locked());
    }

    #[test]
    fn test_clones_share_state() {
        let guard = SubmissionGuard::new();
        let other = guard.clone();
        let _permit = guard.enter();
        assert!(other.is_locked());
    }

    #[test]
    fn test_enter_counts() {
        let guard = SubmissionGuard::new();
        let first = guard.enter();
        let second = guard.enter();
        drop(first);
        assert!(guard.is_locked());
        drop(second);
        assert!(!guard.is_locked());
    }
}
