use gloo_utils::window;
use tracing::warn;
use web_sys::Storage;
use whereabouts_common::platform::{KeyValueStore, MemoryStore, StoreError};

use super::js_error;

/// `localStorage`, or memory if the browser will not give us that.
pub enum BrowserStore {
    Local(Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn new() -> Self {
        match window().local_storage() {
            Ok(Some(storage)) => BrowserStore::Local(storage),
            Ok(None) => {
                warn!("No localStorage, saved locations will be lost on reload");
                BrowserStore::Memory(MemoryStore::new())
            }
            Err(err) => {
                warn!(
                    "localStorage blocked ({}), saved locations will be lost on reload",
                    js_error(&err)
                );
                BrowserStore::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            BrowserStore::Local(storage) => storage.get_item(key).map_err(|err| StoreError::Read {
                key: key.to_string(),
                message: js_error(&err),
            }),
            BrowserStore::Memory(memory) => memory.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            BrowserStore::Local(storage) => {
                storage
                    .set_item(key, value)
                    .map_err(|err| StoreError::Write {
                        key: key.to_string(),
                        message: js_error(&err),
                    })
            }
            BrowserStore::Memory(memory) => memory.set(key, value),
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_storage() {
        let store = BrowserStore::new();
        assert!(matches!(store, BrowserStore::Local(_)));

        store.set("whereabouts-test", "[]").unwrap();
        assert_eq!(store.get("whereabouts-test").unwrap().as_deref(), Some("[]"));
    }
}
