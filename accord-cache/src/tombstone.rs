//! Deletion tombstones.
//!
//! A tombstone records when an id was deleted so a late or reordered event
//! for the same id can be told apart from one that was never seen. Nothing
//! on the dispatch path expires entries; lookups treat entries older than the
//! horizon as absent and the owner calls [`TombstoneRegistry::sweep`] to
//! reclaim them.

use accord_model::MemberKey;
use accord_types::{Snowflake, Timestamp};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::trace;

/// Recently deleted ids of one kind, with their deletion time.
#[derive(Debug)]
pub struct TombstoneRegistry<K> {
    entries: Mutex<HashMap<K, Timestamp>>,
    horizon: Duration,
}

impl<K: Copy + Eq + Hash> TombstoneRegistry<K> {
    pub fn new(horizon: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            horizon,
        }
    }

    pub fn horizon(&self) -> Duration {
        self.horizon
    }

    /// Records `id` as deleted at `at`. A later mark overwrites an earlier one.
    pub fn mark(&self, id: K, at: Timestamp) {
        self.lock().insert(id, at);
    }

    /// Whether `id` has a tombstone younger than the horizon.
    pub fn has(&self, id: &K) -> bool {
        self.has_at(id, Timestamp::now())
    }

    /// [`TombstoneRegistry::has`] against an explicit clock.
    pub fn has_at(&self, id: &K, now: Timestamp) -> bool {
        self.lock()
            .get(id)
            .is_some_and(|deleted_at| now.since(deleted_at) <= self.horizon)
    }

    /// Drops the tombstone for `id`. Returns whether one existed.
    pub fn clear(&self, id: &K) -> bool {
        self.lock().remove(id).is_some()
    }

    /// When `id` was deleted, if recorded. Ignores the horizon.
    pub fn deleted_at(&self, id: &K) -> Option<Timestamp> {
        self.lock().get(id).copied()
    }

    /// Removes every tombstone older than the horizon. Returns how many were
    /// removed.
    pub fn sweep(&self, now: Timestamp) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, deleted_at| now.since(deleted_at) <= self.horizon);
        let swept = before - entries.len();
        if swept > 0 {
            trace!(swept, "tombstones expired");
        }
        swept
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, Timestamp>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The tombstone registries the dispatcher consults, owned by one client.
#[derive(Debug)]
pub struct Tombstones {
    /// Channels and threads.
    pub channels: TombstoneRegistry<Snowflake>,
    pub messages: TombstoneRegistry<Snowflake>,
    pub members: TombstoneRegistry<MemberKey>,
    pub stage_instances: TombstoneRegistry<Snowflake>,
}

impl Tombstones {
    pub fn new(horizon: Duration) -> Self {
        Self {
            channels: TombstoneRegistry::new(horizon),
            messages: TombstoneRegistry::new(horizon),
            members: TombstoneRegistry::new(horizon),
            stage_instances: TombstoneRegistry::new(horizon),
        }
    }

    /// Sweeps every registry. Returns the total removed.
    pub fn sweep(&self, now: Timestamp) -> usize {
        self.channels.sweep(now)
            + self.messages.sweep(now)
            + self.members.sweep(now)
            + self.stage_instances.sweep(now)
    }
}
