use parking_lot::Mutex;
use std::sync::Arc;

use crate::domain::sampler::CancelToken;

/// Holds the cancel token of the run in progress; at most one at a time.
#[derive(Default)]
pub struct RunSlot {
    active: Mutex<Option<CancelToken>>,
}

/// Owned claim on the slot. Travels with the run onto the worker thread and
/// releases the slot when the work is done. A lease dropped before the run
/// finished also cancels it.
pub struct RunLease {
    slot: Arc<RunSlot>,
    token: CancelToken,
}

impl RunSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot, or `None` if a run is already in progress.
    pub fn try_claim(self: &Arc<Self>) -> Option<RunLease> {
        let mut active = self.active.lock();
        if active.is_some() {
            return None;
        }
        let token = CancelToken::new();
        *active = Some(token.clone());
        Some(RunLease {
            slot: Arc::clone(self),
            token,
        })
    }

    /// Signal the active run to stop. Returns false if nothing is running.
    pub fn cancel(&self) -> bool {
        match self.active.lock().as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.active.lock().is_some()
    }
}

impl RunLease {
    pub fn token(&self) -> &CancelToken {
        &self.token
    }
}

impl Drop for RunLease {
    fn drop(&mut self) {
        // No-op for a finished run; stops one whose owner went away.
        self.token.cancel();
        *self.slot.active.lock() = None;
    }
}
