//! Key-value persistence seam

use std::cell::RefCell;
use std::collections::HashMap;

/// Storage key for the raw bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key for the JSON-encoded user profile
pub const USER_KEY: &str = "user";

/// Synchronous string key-value store, e.g. browser `localStorage`.
///
/// Writes are best-effort: implementations log failures instead of
/// returning them, since the in-memory session stays authoritative.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-process store for native builds and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set(TOKEN_KEY, "abc");
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));
        assert!(store.contains(TOKEN_KEY));

        store.set(TOKEN_KEY, "def");
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("def"));
        assert_eq!(store.len(), 1);

        store.remove(TOKEN_KEY);
        store.remove(TOKEN_KEY);
        assert!(store.get(TOKEN_KEY).is_none());
    }
}
