//! String key-value storage contracts and in-memory adapters.
//!
//! Apps that want their own settings or content to survive a reload opt into a
//! [`KeyValueStore`]. The window manager itself never persists anything through it.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Host service for string values keyed by string (browser `localStorage` semantics).
pub trait KeyValueStore {
    /// Reads the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), String>;

    /// Removes `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op store for unsupported targets and baseline tests.
pub struct NoopKeyValueStore;

impl KeyValueStore for NoopKeyValueStore {
    fn get(&self, _key: &str) -> Result<Option<String>, String> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory store keyed by string. Clones share the same map.
pub struct MemoryKeyValueStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads and deserializes a JSON value through a [`KeyValueStore`] implementation.
///
/// # Errors
///
/// Returns an error when the store read or JSON deserialization fails.
pub fn load_typed<S: KeyValueStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    Ok(Some(value))
}

/// Serializes a value as JSON and saves it through a [`KeyValueStore`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn save_typed<S: KeyValueStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct NotepadDraft {
        text: String,
        word_wrap: bool,
    }

    #[test]
    fn memory_store_get_set_remove() {
        let store = MemoryKeyValueStore::default();
        let store_obj: &dyn KeyValueStore = &store;

        store_obj.set("simpleos.theme", "dark").expect("set");
        assert_eq!(
            store_obj.get("simpleos.theme").expect("get"),
            Some("dark".to_string())
        );
        store_obj.set("simpleos.theme", "light").expect("overwrite");
        assert_eq!(
            store_obj.get("simpleos.theme").expect("get"),
            Some("light".to_string())
        );
        store_obj.remove("simpleos.theme").expect("remove");
        assert_eq!(store_obj.get("simpleos.theme").expect("get"), None);
        store_obj.remove("simpleos.theme").expect("remove missing key");
        assert!(store.is_empty());
    }

    #[test]
    fn clones_share_the_same_entries() {
        let store = MemoryKeyValueStore::default();
        let other = store.clone();
        store.set("k", "v").expect("set");
        assert_eq!(other.get("k").expect("get"), Some("v".to_string()));
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn typed_helpers_round_trip_and_reject_garbage() {
        let store = MemoryKeyValueStore::default();
        save_typed(
            &store,
            "notepad",
            &NotepadDraft {
                text: "hello".to_string(),
                word_wrap: true,
            },
        )
        .expect("save typed");

        let loaded: Option<NotepadDraft> = load_typed(&store, "notepad").expect("load typed");
        assert_eq!(
            loaded,
            Some(NotepadDraft {
                text: "hello".to_string(),
                word_wrap: true,
            })
        );

        store.set("broken", "{not json").expect("set");
        assert!(load_typed::<_, NotepadDraft>(&store, "broken").is_err());
        assert_eq!(
            load_typed::<_, NotepadDraft>(&store, "missing").expect("missing"),
            None
        );
    }

    #[test]
    fn noop_store_is_empty_and_successful() {
        let store = NoopKeyValueStore;
        store.set("k", "v").expect("set");
        assert_eq!(store.get("k").expect("get"), None);
        store.remove("k").expect("remove");
    }
}
