use std::cell::RefCell;
use std::rc::Rc;

use super::{Result, StorageBackend, StoreSnapshot};

/// In-memory backend for tests and throwaway stores.
///
/// The snapshot lives behind a shared handle so callers can inspect what
/// the store persisted.
#[derive(Default)]
pub struct MemoryStorage {
    snapshot: Rc<RefCell<StoreSnapshot>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            snapshot: Rc::new(RefCell::new(snapshot)),
        }
    }

    /// Shared handle onto the persisted snapshot.
    pub fn handle(&self) -> Rc<RefCell<StoreSnapshot>> {
        Rc::clone(&self.snapshot)
    }
}

impl StorageBackend for MemoryStorage {
    fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        *self.snapshot.borrow_mut() = snapshot.clone();
        Ok(())
    }

    fn load(&self) -> Result<StoreSnapshot> {
        Ok(self.snapshot.borrow().clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::Person;

    use super::*;

    #[test]
    fn save_is_visible_through_the_handle() {
        let storage = MemoryStorage::new();
        let handle = storage.handle();
        let snapshot = StoreSnapshot {
            people: vec![Person::new("Alex")],
            ..StoreSnapshot::default()
        };
        storage.save(&snapshot).unwrap();
        assert_eq!(handle.borrow().people.len(), 1);
        assert_eq!(storage.load().unwrap(), snapshot);
    }
}
