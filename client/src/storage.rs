use std::cell::RefCell;
use std::collections::BTreeMap;

use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};

/// Prefix-namespaced persistence for per-region settled flags.
///
/// Values are serialized booleans under `<prefix><region_id>`, the exact
/// representation `LocalStorage` writes, so the in-memory backing stays
/// byte-compatible with the browser one.
pub struct ProgressStore {
    prefix: &'static str,
    backing: Backing,
}

enum Backing {
    Local,
    Memory(RefCell<BTreeMap<String, String>>),
}

impl ProgressStore {
    /// Browser-backed store. `None` when localStorage is absent or blocked
    /// (private-mode policies, sandboxed frames).
    pub fn browser(prefix: &'static str) -> Option<Self> {
        let available = web_sys::window()
            .and_then(|window| window.local_storage().ok())
            .flatten()
            .is_some();
        available.then_some(Self {
            prefix,
            backing: Backing::Local,
        })
    }

    /// Session-only store; nothing survives a reload.
    pub fn in_memory(prefix: &'static str) -> Self {
        Self {
            prefix,
            backing: Backing::Memory(RefCell::new(BTreeMap::new())),
        }
    }

    fn key(&self, region_id: &str) -> String {
        format!("{}{}", self.prefix, region_id)
    }

    pub fn save(&self, region_id: &str, settled: bool) -> Result<(), StorageError> {
        let key = self.key(region_id);
        match &self.backing {
            Backing::Local => LocalStorage::set(&key, settled),
            Backing::Memory(map) => {
                let raw = serde_json::to_string(&settled)?;
                map.borrow_mut().insert(key, raw);
                Ok(())
            }
        }
    }

    /// `Some` only for a cleanly stored boolean. Missing keys and corrupt
    /// values both read as absent, leaving the region hidden.
    pub fn load(&self, region_id: &str) -> Result<Option<bool>, StorageError> {
        let key = self.key(region_id);
        match &self.backing {
            Backing::Local => match LocalStorage::get::<bool>(&key) {
                Ok(settled) => Ok(Some(settled)),
                Err(StorageError::KeyNotFound(_) | StorageError::SerdeError(_)) => Ok(None),
                Err(err) => Err(err),
            },
            Backing::Memory(map) => Ok(map
                .borrow()
                .get(&key)
                .and_then(|raw| serde_json::from_str(raw).ok())),
        }
    }

    /// Removes the keys for the given regions. Absent keys are a no-op.
    pub fn clear_all<'a>(&self, region_ids: impl IntoIterator<Item = &'a str>) {
        match &self.backing {
            Backing::Local => {
                for region_id in region_ids {
                    LocalStorage::delete(self.key(region_id));
                }
            }
            Backing::Memory(map) => {
                let mut map = map.borrow_mut();
                for region_id in region_ids {
                    map.remove(&self.key(region_id));
                }
            }
        }
    }

    /// True when any stored key carries this store's prefix.
    pub fn has_any_saved_data(&self) -> bool {
        match &self.backing {
            Backing::Local => {
                let Some(storage) = web_sys::window()
                    .and_then(|window| window.local_storage().ok())
                    .flatten()
                else {
                    return false;
                };
                let Ok(total) = storage.length() else {
                    return false;
                };
                (0..total).any(|index| {
                    storage
                        .key(index)
                        .ok()
                        .flatten()
                        .is_some_and(|key| key.starts_with(self.prefix))
                })
            }
            Backing::Memory(map) => map.borrow().keys().any(|key| key.starts_with(self.prefix)),
        }
    }
}

#[cfg(test)]
impl ProgressStore {
    pub(crate) fn raw_value(&self, region_id: &str) -> Option<String> {
        match &self.backing {
            Backing::Memory(map) => map.borrow().get(&self.key(region_id)).cloned(),
            Backing::Local => None,
        }
    }

    pub(crate) fn insert_raw(&self, region_id: &str, raw: &str) {
        if let Backing::Memory(map) = &self.backing {
            map.borrow_mut().insert(self.key(region_id), raw.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ProgressStore;

    fn store() -> ProgressStore {
        ProgressStore::in_memory("map_test_v1_")
    }

    #[test]
    fn round_trips_both_flags() {
        let store = store();
        store.save("reg1", true).unwrap();
        assert_eq!(store.load("reg1").unwrap(), Some(true));
        store.save("reg1", false).unwrap();
        assert_eq!(store.load("reg1").unwrap(), Some(false));
    }

    #[test]
    fn stores_plain_serialized_booleans_under_prefixed_keys() {
        let store = store();
        store.save("reg7", true).unwrap();
        assert_eq!(store.raw_value("reg7").as_deref(), Some("true"));
        store.save("reg7", false).unwrap();
        assert_eq!(store.raw_value("reg7").as_deref(), Some("false"));
    }

    #[test]
    fn missing_key_reads_as_absent() {
        assert_eq!(store().load("reg1").unwrap(), None);
    }

    #[test]
    fn corrupt_values_read_as_absent() {
        let store = store();
        store.insert_raw("reg1", "tru");
        store.insert_raw("reg2", "1");
        store.insert_raw("reg3", "\"true\"");
        assert_eq!(store.load("reg1").unwrap(), None);
        assert_eq!(store.load("reg2").unwrap(), None);
        assert_eq!(store.load("reg3").unwrap(), None);
    }

    #[test]
    fn has_any_saved_data_flips_after_the_first_save() {
        let store = store();
        assert!(!store.has_any_saved_data());
        store.save("reg3", false).unwrap();
        assert!(store.has_any_saved_data());
    }

    #[test]
    fn clear_all_is_idempotent() {
        let store = store();
        store.save("reg1", true).unwrap();
        store.save("reg2", false).unwrap();
        store.clear_all(["reg1", "reg2", "reg3"]);
        assert!(!store.has_any_saved_data());
        store.clear_all(["reg1", "reg2", "reg3"]);
        assert_eq!(store.load("reg1").unwrap(), None);
    }
}
