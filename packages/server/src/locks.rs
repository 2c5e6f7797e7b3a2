use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-interview mutual exclusion for the score workflow.
///
/// One lock per interview public id. An entry lives only while some caller
/// holds or waits for it.
#[derive(Debug, Default)]
pub struct InterviewLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

/// Held lock for one interview. Dropping it releases the lock and removes the
/// registry entry once nobody else is waiting.
pub struct InterviewLockGuard<'a> {
    registry: &'a InterviewLocks,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl InterviewLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other holder exists for `interview_public_id`.
    pub async fn acquire(&self, interview_public_id: &str) -> InterviewLockGuard<'_> {
        // Clone the Arc out so the shard guard is released before awaiting.
        let lock = self
            .locks
            .entry(interview_public_id.to_string())
            .or_default()
            .clone();
        let guard = lock.lock_owned().await;

        InterviewLockGuard {
            registry: self,
            key: interview_public_id.to_string(),
            guard: Some(guard),
        }
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl Drop for InterviewLockGuard<'_> {
    fn drop(&mut self) {
        // The owned guard holds a reference to the mutex; release it first.
        drop(self.guard.take());
        // Waiters clone the Arc under the shard lock, so a count of one means
        // the map holds the only reference.
        self.registry
            .locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}
