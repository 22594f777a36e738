//! `localStorage`-backed key-value store implementation.

use platform_host::KeyValueStore;

#[derive(Debug, Clone, Copy, Default)]
/// Browser key-value store backed by `window.localStorage`.
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| "localStorage unavailable".to_string())
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .get_item(key)
                .map_err(|e| format!("localStorage get_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .set_item(key, value)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
            Ok(())
        }
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .remove_item(key)
                .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}
