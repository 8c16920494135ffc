use std::cell::RefCell;
use std::collections::HashMap;

use super::{KeyValueStore, StoreError};

/// Process-local store with no durability. Used as a test double.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
