use crate::Cached;
use accord_model::{DecodeContext, Entity, ModelResult};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, trace};

struct StoreInner<T: Entity> {
    entries: HashMap<T::Key, Cached<T>>,
    /// Keys in insertion order, oldest first.
    order: VecDeque<T::Key>,
}

/// Keyed store of live entities of one kind.
///
/// Upserting an existing key patches the stored instance in place; the same
/// key never maps to two live instances. An optional capacity evicts the
/// oldest insertion when exceeded. Eviction only forgets the instance, it
/// does not mark it deleted.
pub struct EntityStore<T: Entity> {
    inner: RwLock<StoreInner<T>>,
    capacity: Option<usize>,
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> EntityStore<T> {
    /// An unbounded store.
    pub fn new() -> Self {
        Self::with_capacity(None)
    }

    /// A store holding at most `capacity` entries, or unbounded for `None`.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity,
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn get(&self, key: &T::Key) -> Option<Cached<T>> {
        self.read_inner().entries.get(key).cloned()
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.read_inner().entries.contains_key(key)
    }

    /// Patches the cached instance for the payload's key, or constructs and
    /// caches a new one.
    pub fn upsert(&self, raw: &Value, ctx: &DecodeContext<'_>) -> ModelResult<Cached<T>> {
        self.add(raw, true, ctx)
    }

    /// Like [`EntityStore::upsert`], but with `cache == false` a new instance
    /// is returned detached instead of being stored. An existing instance is
    /// always patched.
    pub fn add(&self, raw: &Value, cache: bool, ctx: &DecodeContext<'_>) -> ModelResult<Cached<T>> {
        let key = T::key_of(raw)?;
        if let Some(existing) = self.get(&key) {
            existing.write().patch(raw, ctx)?;
            trace!(kind = %T::KIND, %key, "patched");
            return Ok(existing);
        }

        let entity = T::from_raw(raw, ctx)?;
        if !cache {
            return Ok(Cached::new(entity));
        }
        // The key may have been cached since the lookup above; the first
        // insert wins and this payload patches it.
        match self.insert_new(entity) {
            Ok(handle) => Ok(handle),
            Err((existing, _)) => {
                existing.write().patch(raw, ctx)?;
                Ok(existing)
            }
        }
    }

    /// Stores a fully built entity. An existing instance under the same key is
    /// overwritten in place so outstanding handles see the new value.
    pub fn insert(&self, entity: T) -> Cached<T> {
        let key = entity.key();
        match self.insert_new(entity) {
            Ok(handle) => handle,
            Err((existing, entity)) => {
                *existing.write() = entity;
                trace!(kind = %T::KIND, %key, "replaced");
                existing
            }
        }
    }

    /// Caches `entity` unless its key is already present, checking and
    /// inserting under one write lock. Otherwise hands back the present
    /// handle together with the unused entity.
    fn insert_new(&self, entity: T) -> Result<Cached<T>, (Cached<T>, T)> {
        let key = entity.key();
        let mut inner = self.write_inner();
        if let Some(existing) = inner.entries.get(&key) {
            return Err((existing.clone(), entity));
        }

        let handle = Cached::new(entity);
        inner.entries.insert(key, handle.clone());
        inner.order.push_back(key);
        debug!(kind = %T::KIND, %key, "cached");

        if let Some(capacity) = self.capacity {
            while inner.entries.len() > capacity {
                let Some(oldest) = inner.order.pop_front() else {
                    break;
                };
                inner.entries.remove(&oldest);
                trace!(kind = %T::KIND, key = %oldest, "evicted");
            }
        }
        Ok(handle)
    }

    /// Removes `key` and flags the removed instance deleted.
    pub fn remove(&self, key: &T::Key) -> Option<Cached<T>> {
        let removed = {
            let mut inner = self.write_inner();
            let removed = inner.entries.remove(key)?;
            inner.order.retain(|k| k != key);
            removed
        };
        removed.write().mark_deleted();
        debug!(kind = %T::KIND, %key, "removed");
        Some(removed)
    }

    /// Handles to every entry, oldest first. The key set is buffered, so the
    /// store may be mutated while the result is iterated.
    pub fn values(&self) -> Vec<Cached<T>> {
        let inner = self.read_inner();
        inner
            .order
            .iter()
            .filter_map(|key| inner.entries.get(key).cloned())
            .collect()
    }

    pub fn keys(&self) -> Vec<T::Key> {
        self.read_inner().order.iter().copied().collect()
    }

    /// Entries whose current state matches `predicate`.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<Cached<T>> {
        self.values()
            .into_iter()
            .filter(|handle| predicate(&handle.read()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read_inner().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every entry without marking any deleted.
    pub fn clear(&self) {
        let mut inner = self.write_inner();
        inner.entries.clear();
        inner.order.clear();
    }

    fn read_inner(&self) -> RwLockReadGuard<'_, StoreInner<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_inner(&self) -> RwLockWriteGuard<'_, StoreInner<T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
