//! Per-owner checkout serialization.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::ids::OwnerId;

type LockMap = FxHashMap<OwnerId, Arc<AsyncMutex<()>>>;

/// Keyed async locks. Owners never contend with each other.
#[derive(Debug, Clone, Default)]
pub(crate) struct OwnerLocks {
    inner: Arc<Mutex<LockMap>>,
}

impl OwnerLocks {
    pub(crate) async fn lock(&self, owner: OwnerId) -> OwnerGuard {
        let entry = Arc::clone(lock_map(&self.inner).entry(owner).or_default());

        let guard = entry.lock_owned().await;

        OwnerGuard {
            owner,
            locks: Arc::clone(&self.inner),
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        lock_map(&self.inner).len()
    }
}

fn lock_map(map: &Mutex<LockMap>) -> MutexGuard<'_, LockMap> {
    map.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Held for the duration of one owner's checkout.
#[derive(Debug)]
pub(crate) struct OwnerGuard {
    owner: OwnerId,
    locks: Arc<Mutex<LockMap>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for OwnerGuard {
    fn drop(&mut self) {
        let mut map = lock_map(&self.locks);

        drop(self.guard.take());

        // Only the map still references the mutex: nobody holds or awaits it.
        if map
            .get(&self.owner)
            .is_some_and(|entry| Arc::strong_count(entry) == 1)
        {
            map.remove(&self.owner);
        }
    }
}
