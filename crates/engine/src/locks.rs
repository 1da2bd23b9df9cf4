//! Per-user turn serialization.
//!
//! The read-modify-write sequence of a turn must not interleave with a
//! duplicate delivery for the same user, but different users share
//! nothing, so the primitive is a map of per-user mutexes rather than a
//! global lock.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// A map of per-user mutexes.
///
/// Entries are created on first use and kept for the process lifetime;
/// a lock is a handful of bytes and the user population is bounded by
/// the entitlement store anyway.
#[derive(Debug, Default)]
pub struct UserLocks {
    inner: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl UserLocks {
    /// Create an empty lock map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for one user, waiting if a turn is in flight.
    pub async fn acquire(&self, user_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            map.entry(user_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
