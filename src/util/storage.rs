//! Durable token slot.
//!
//! SYSTEM CONTEXT
//! ==============
//! The bearer token is the only thing this client persists. In the browser it
//! lives under a single `localStorage` key; elsewhere (SSR, tests) an
//! in-memory slot stands in.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::rc::Rc;

/// A single named string slot. Writes are last-write-wins.
pub trait TokenSlot {
    fn load(&self) -> Option<String>;
    fn store(&self, token: &str);
    fn remove(&self);
}

/// Process-local slot. Clones share the same cell.
#[derive(Clone, Debug, Default)]
pub struct MemorySlot {
    cell: Rc<RefCell<Option<String>>>,
}

impl MemorySlot {
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let slot = Self::default();
        slot.store(token);
        slot
    }
}

impl TokenSlot for MemorySlot {
    fn load(&self) -> Option<String> {
        self.cell.borrow().clone()
    }

    fn store(&self, token: &str) {
        *self.cell.borrow_mut() = Some(token.to_owned());
    }

    fn remove(&self) {
        self.cell.borrow_mut().take();
    }
}

/// `window.localStorage` slot under a fixed key.
#[cfg(feature = "csr")]
#[derive(Clone, Debug)]
pub struct LocalStorageSlot {
    key: String,
}

#[cfg(feature = "csr")]
impl LocalStorageSlot {
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self { key: key.to_owned() }
    }

    fn storage() -> Option<web_sys::Storage> {
        match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(storage)) => storage,
            _ => None,
        }
    }
}

#[cfg(feature = "csr")]
impl TokenSlot for LocalStorageSlot {
    fn load(&self) -> Option<String> {
        let storage = Self::storage()?;
        match storage.get_item(&self.key) {
            Ok(Some(token)) if !token.is_empty() => Some(token),
            _ => None,
        }
    }

    fn store(&self, token: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if let Err(err) = storage.set_item(&self.key, token) {
            leptos::logging::warn!("failed to persist session token: {err:?}");
        }
    }

    fn remove(&self) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if let Err(err) = storage.remove_item(&self.key) {
            leptos::logging::warn!("failed to remove session token: {err:?}");
        }
    }
}
