use accord_model::Entity;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared handle to a live entity.
///
/// Cloning the handle shares the instance. A poisoned lock is recovered: the
/// guarded value is plain cache state.
pub struct Cached<T>(Arc<RwLock<T>>);

impl<T: Entity> Cached<T> {
    pub fn new(entity: T) -> Self {
        Self(Arc::new(RwLock::new(entity)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// The entity's key.
    pub fn id(&self) -> T::Key {
        self.read().key()
    }

    /// A detached copy of the current state.
    pub fn snapshot(&self) -> T {
        self.read().snapshot()
    }

    pub fn is_deleted(&self) -> bool {
        self.read().is_deleted()
    }

    /// Whether both handles point at the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Cached<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: Entity> fmt::Debug for Cached<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cached").field(&*self.read()).finish()
    }
}
