//! Browser Local Storage
//!
//! Thin wrappers over `window.localStorage`. A missing or blocked storage
//! behaves like an empty one.

use menu_core::StampStore;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn load_item(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

pub fn save_item(key: &str, value: &str) -> Result<(), String> {
    let storage = local_storage().ok_or("local storage is unavailable")?;
    storage
        .set_item(key, value)
        .map_err(|e| format!("Failed to write {}: {:?}", key, e))
}

/// Stamp card persistence in this browser profile
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl StampStore for LocalStore {
    fn load(&self, key: &str) -> Option<String> {
        load_item(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), String> {
        save_item(key, value)
    }
}
