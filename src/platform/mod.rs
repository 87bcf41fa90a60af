//! Platform abstraction layer
//!
//! Capabilities the planner needs from its surroundings, injected rather
//! than looked up ad hoc:
//! - `KeyValueStore`: LocalStorage on web, memory elsewhere
//! - `HostBridge`: the chat-platform mini-app runtime, when present
//! - `Notifier`: alert/confirm dialogs

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::PersistenceError;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
pub mod testing;

/// String key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

/// Operations offered by the mini-app host runtime
pub trait HostBridge {
    /// Theme parameter such as `bg_color`
    fn theme_param(&self, name: &str) -> Option<String>;

    /// One-shot data delivery, no acknowledgement
    fn send_data(&self, data: &str);

    fn close(&self);

    fn ready(&self) {}

    fn expand(&self) {}

    /// Show the host's primary action button
    fn show_main_button(&self, _label: &str, _on_click: Box<dyn FnMut()>) {}

    /// Id of the user who opened the app, if the host shares it
    fn user_id(&self) -> Option<i64> {
        None
    }
}

/// Whether the page was launched by the host. The host script defines its
/// runtime object in any tab, so only non-empty launch data counts.
pub fn host_launched(init_data: Option<&str>) -> bool {
    init_data.is_some_and(|data| !data.trim().is_empty())
}

/// User-facing dialogs
pub trait Notifier {
    fn notify(&self, message: &str);

    /// Ask a yes/no question
    fn confirm(&self, message: &str) -> bool;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        (**self).remove(key)
    }
}

/// In-memory store for native builds and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
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

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.len(), 1);
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_host_launched_needs_init_data() {
        assert!(!host_launched(None));
        assert!(!host_launched(Some("")));
        assert!(!host_launched(Some("  ")));
        assert!(host_launched(Some("query_id=AAH&user=%7B%22id%22%3A1%7D&hash=ab12")));
    }

    #[test]
    fn test_shared_store() {
        let store = Rc::new(MemoryStore::new());
        let handle: Rc<MemoryStore> = Rc::clone(&store);
        handle.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }
}
