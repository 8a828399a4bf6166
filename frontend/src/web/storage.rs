//! LocalStorage binding.
//!
//! Thin wrapper over `web_sys::Storage` that backs the session store.

use bursary_shared::KeyValueStore;

/// Browser `window.localStorage`.
///
/// Every operation degrades to `None`/`false` when storage is unavailable
/// (private mode, sandboxed iframe).
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn delete(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }

    fn clear(&self) -> bool {
        Self::storage().and_then(|s| s.clear().ok()).is_some()
    }
}
