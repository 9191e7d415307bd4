//! Access-token storage seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token slot is shared by login, logout, account deletion, the guard
//! refresh and the interceptor refresh. Writes are whole-value replacements,
//! so last writer wins.

use std::cell::RefCell;
use std::rc::Rc;

/// Durable single-slot storage for the raw access token.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// In-memory token slot. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store.save(token);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.slot.borrow_mut() = Some(token.to_owned());
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_slot() {
        let store = MemoryTokenStore::default();
        let view = store.clone();
        store.save("abc");
        assert_eq!(view.load().as_deref(), Some("abc"));
        view.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn save_replaces_previous_value() {
        let store = MemoryTokenStore::with_token("old");
        store.save("new");
        assert_eq!(store.load().as_deref(), Some("new"));
    }
}
