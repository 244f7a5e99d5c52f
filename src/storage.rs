use braced_core::PrefStore;
use web_sys::Storage;

use crate::dom::js_err;

/// `localStorage`-backed preferences. When storage is blocked reads come back
/// empty and writes are dropped.
pub(crate) struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub(crate) fn open() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            gloo::console::warn!("storage: localStorage unavailable, preferences will not persist");
        }
        Self { storage }
    }
}

impl PrefStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok()?
    }

    fn set(&mut self, key: &str, value: &str) {
        let Some(storage) = self.storage.as_ref() else {
            return;
        };
        if let Err(err) = storage.set_item(key, value) {
            gloo::console::warn!("storage: write failed", key, js_err(err));
        }
    }
}
