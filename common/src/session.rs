//! Session continuity across page reloads.
//!
//! The browser keeps the logged-in user and the support tickets in
//! `localStorage`; [`KeyValueStore`] hides that so the same cache logic runs
//! against a plain map in tests.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::support::SupportThread;
use crate::user::User;

pub const USER_KEY: &str = "sesiUser";
pub const SUPPORT_KEY: &str = "sesiSupportMessages";

/// String-keyed persistent storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Storage that lives only as long as the value itself.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
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

/// Typed view over a [`KeyValueStore`].
pub struct SessionCache<S> {
    store: S,
}

impl<S: KeyValueStore> SessionCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The cached user, if one is stored and still parses.
    pub fn load_user(&self) -> Option<User> {
        self.read(USER_KEY)
    }

    pub fn save_user(&self, user: &User) {
        self.write(USER_KEY, user);
    }

    pub fn clear_user(&self) {
        self.store.remove(USER_KEY);
    }

    pub fn load_support(&self) -> SupportThread {
        self.read(SUPPORT_KEY).unwrap_or_default()
    }

    pub fn save_support(&self, thread: &SupportThread) {
        self.write(SUPPORT_KEY, thread);
    }

    // A corrupt entry is dropped so the next start is clean.
    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(_) => {
                self.store.remove(key);
                None
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) {
        if let Ok(json) = serde_json::to_string(value) {
            self.store.set(key, &json);
        }
    }
}
