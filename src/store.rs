use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::id::Identifier;

pub struct Store {
    inner: RwLock<HashMap<Identifier, String>>,
}

impl Store {
    pub fn new() -> Store {
        Store {
            inner: RwLock::new(HashMap::new()),
        }
    }

    // A writer that panicked cannot leave the map half-updated.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<Identifier, String>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Identifier, String>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, id: &Identifier) -> Option<String> {
        self.read().get(id).cloned()
    }

    pub fn exists(&self, id: &Identifier) -> bool {
        self.read().contains_key(id)
    }

    pub fn put(&self, id: Identifier, value: String) {
        self.write().insert(id, value);
    }

    /// Inserts only when `id` is absent. Returns whether the insert happened.
    pub fn put_if_absent(&self, id: Identifier, value: String) -> bool {
        let mut inner = self.write();
        if inner.contains_key(&id) {
            return false;
        }
        inner.insert(id, value);
        true
    }

    /// Overwrites only when `id` is present. Returns whether the write happened.
    pub fn update(&self, id: &Identifier, value: String) -> bool {
        match self.write().get_mut(id) {
            Some(current) => {
                *current = value;
                true
            }
            None => false,
        }
    }

    pub fn delete(&self, id: &Identifier) -> bool {
        self.write().remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new()
    }
}
