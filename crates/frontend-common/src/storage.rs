//! `localStorage`-backed session persistence

use porter_core::KeyValueStore;
use web_sys::Storage;

/// [`KeyValueStore`] over the browser's `window.localStorage`.
///
/// Reads return `None` and writes are dropped (with a warning) when storage
/// is unavailable, e.g. outside a browser or with storage disabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

/// Get localStorage
fn get_local_storage() -> Option<Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = get_local_storage() else {
            tracing::warn!(key, "localStorage unavailable, value not persisted");
            return;
        };
        if let Err(error) = storage.set_item(key, value) {
            tracing::warn!(key, ?error, "Failed to write localStorage");
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = get_local_storage()
            && let Err(error) = storage.remove_item(key)
        {
            tracing::warn!(key, ?error, "Failed to remove localStorage entry");
        }
    }
}
