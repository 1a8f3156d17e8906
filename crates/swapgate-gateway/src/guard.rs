//! Call-scoped reentrancy guard.
//!
//! An external token transfer invoked mid-operation could, if the token is
//! malicious or upgradable, call back into the gateway before the initiating
//! operation finishes writing its state. Every state-mutating entry point
//! acquires the guard at entry; the returned permit releases it on every
//! exit path, including errors, via `Drop`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use swapgate_types::{GatewayError, Result};

/// A shareable single-entry lock. Clones observe the same lock state, so a
/// collaborator holding a clone cannot re-enter while the gateway is inside
/// a guarded operation.
#[derive(Debug, Clone, Default)]
pub struct ReentrancyGuard {
    locked: Arc<AtomicBool>,
}

impl ReentrancyGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the guard for the duration of one operation.
    ///
    /// # Errors
    /// Returns [`GatewayError::ReentrancyBlocked`] if the guard is already
    /// held.
    pub fn enter(&self) -> Result<EntryPermit> {
        if self
            .locked
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(GatewayError::ReentrancyBlocked);
        }
        Ok(EntryPermit {
            locked: Arc::clone(&self.locked),
        })
    }

    /// Whether a guarded operation is currently in progress.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }
}

/// RAII permit: the guard stays held exactly as long as this value lives.
#[derive(Debug)]
pub struct EntryPermit {
    locked: Arc<AtomicBool>,
}

impl Drop for EntryPermit {
    fn drop(&mut self) {
        self.locked.store(false, Ordering::Release);
    }
}
