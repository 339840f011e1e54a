use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Durable key/value storage for filter state
///
/// Implementations swallow storage errors: a failed write only loses the
/// persisted copy, never the in-memory state.
pub trait FilterStorage {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, raw: &str);
    fn remove(&self, key: &str);
}

/// Browser `localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilterStorage;

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl FilterStorage for LocalFilterStorage {
    fn load(&self, key: &str) -> Option<String> {
        storage()?.get_item(key).ok().flatten()
    }

    fn save(&self, key: &str, raw: &str) {
        let Some(storage) = storage() else { return };
        if storage.set_item(key, raw).is_err() {
            log::warn!("failed to persist '{}'", key);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory storage; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryFilterStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryFilterStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl FilterStorage for MemoryFilterStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn save(&self, key: &str, raw: &str) {
        self.items.borrow_mut().insert(key.to_string(), raw.to_string());
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Storage keys of one report view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub applied: String,
    pub pending: String,
}

impl StorageKeys {
    pub fn for_report(report_id: &str) -> Self {
        Self {
            applied: format!("{}_applied_filters_v1", report_id),
            pending: format!("{}_pending_filters_v1", report_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_is_shared_between_clones() {
        let a = MemoryFilterStorage::new();
        let b = a.clone();
        a.save("k", "v");
        assert_eq!(b.load("k").as_deref(), Some("v"));
        b.remove("k");
        assert!(a.is_empty());
    }

    #[test]
    fn test_keys_are_namespaced_per_report() {
        let keys = StorageKeys::for_report("p950_ticket_items_report");
        assert_eq!(keys.applied, "p950_ticket_items_report_applied_filters_v1");
        assert_eq!(keys.pending, "p950_ticket_items_report_pending_filters_v1");
        assert_ne!(StorageKeys::for_report("other"), keys);
    }
}
