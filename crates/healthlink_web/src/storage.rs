//! Browser-backed session storage.

use healthlink_core::SessionStore;
use web_sys::Storage;

/// [`SessionStore`] over the browser's localStorage, scoped per browser
/// profile. The keys are `token` and `user`, matching what the backend's
/// other clients use.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<Storage> {
        web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    }
}

impl SessionStore for BrowserStorage {
    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            tracing::error!("localStorage is unavailable");
            return;
        };
        if let Err(err) = storage.set_item(key, value) {
            tracing::error!("Failed to write {key} to localStorage: {err:?}");
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            if let Err(err) = storage.remove_item(key) {
                tracing::error!("Failed to remove {key} from localStorage: {err:?}");
            }
        }
    }
}
