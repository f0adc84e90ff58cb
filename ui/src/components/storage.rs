//! `localStorage` backing for the session cache.

use canteen_common::session::{KeyValueStore, SessionCache};

/// The browser's `localStorage`. Every operation is a no-op when storage is
/// unavailable (private mode, native builds).
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

#[cfg(target_family = "wasm")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(target_family = "wasm")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            if let Err(e) = storage.set_item(key, value) {
                tracing::warn!("localStorage write of {key} failed: {e:?}");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            if let Err(e) = storage.remove_item(key) {
                tracing::warn!("localStorage removal of {key} failed: {e:?}");
            }
        }
    }
}

#[cfg(not(target_family = "wasm"))]
impl KeyValueStore for BrowserStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) {}

    fn remove(&self, _key: &str) {}
}

pub fn session_cache() -> SessionCache<BrowserStore> {
    SessionCache::new(BrowserStore)
}
