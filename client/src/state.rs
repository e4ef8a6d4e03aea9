use std::cell::RefCell;
use std::collections::BTreeSet;

use gloo_storage::errors::StorageError;

use crate::storage::ProgressStore;

/// Authoritative in-memory settled set. DOM classes and the legend mirror
/// this; the store holds the durable copy.
pub struct MapState {
    store: ProgressStore,
    settled: RefCell<BTreeSet<String>>,
}

impl MapState {
    pub fn new(store: ProgressStore) -> Self {
        Self {
            store,
            settled: RefCell::new(BTreeSet::new()),
        }
    }

    /// Rebuilds the settled set from persisted flags. Corrupt or missing
    /// values leave a region hidden.
    pub fn restore<'a>(
        &self,
        region_ids: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), StorageError> {
        let mut settled = self.settled.borrow_mut();
        settled.clear();
        for region_id in region_ids {
            if self.store.load(region_id)? == Some(true) {
                settled.insert(region_id.to_string());
            }
        }
        Ok(())
    }

    pub fn is_settled(&self, region_id: &str) -> bool {
        self.settled.borrow().contains(region_id)
    }

    /// User toggle: persists the flipped flag before touching memory, so a
    /// failed write leaves both sides unchanged. Returns the new state.
    pub fn toggle(&self, region_id: &str) -> Result<bool, StorageError> {
        let now_settled = !self.is_settled(region_id);
        self.store.save(region_id, now_settled)?;
        let mut settled = self.settled.borrow_mut();
        if now_settled {
            settled.insert(region_id.to_string());
        } else {
            settled.remove(region_id);
        }
        Ok(now_settled)
    }

    /// Scripted reveal: memory only, never persisted — the reveal animation
    /// replays from scratch on every load. Returns false if already settled.
    pub fn reveal(&self, region_id: &str) -> bool {
        self.settled.borrow_mut().insert(region_id.to_string())
    }

    /// Clears memory and every persisted flag for the given regions.
    pub fn reset<'a>(&self, region_ids: impl IntoIterator<Item = &'a str>) {
        self.store.clear_all(region_ids);
        self.settled.borrow_mut().clear();
    }

    pub fn settled_ids(&self) -> BTreeSet<String> {
        self.settled.borrow().clone()
    }

    pub fn has_saved_progress(&self) -> bool {
        self.store.has_any_saved_data()
    }
}

#[cfg(test)]
impl MapState {
    pub(crate) fn store(&self) -> &ProgressStore {
        &self.store
    }
}
