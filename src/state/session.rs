//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by the route guard, the gateway's token source, and identity-aware
//! pages. Mutated only through [`Session::set_user`], [`Session::set_token`]
//! and [`Session::clear`]; `is_authenticated` is derived from `user`, so the
//! two can never disagree.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::rc::Rc;

use leptos::prelude::*;

use crate::net::types::User;
use crate::util::storage::TokenSlot;

/// Snapshot of the session. Fields are private; use the accessors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    user: Option<User>,
    token: Option<String>,
}

impl SessionState {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Reactive session container plus the durable token slot it mirrors.
#[derive(Clone)]
pub struct Session {
    state: RwSignal<SessionState>,
    slot: Rc<dyn TokenSlot>,
}

impl Session {
    pub fn new(slot: Rc<dyn TokenSlot>) -> Self {
        Self { state: RwSignal::new(SessionState::default()), slot }
    }

    /// Read-only signal for views.
    #[must_use]
    pub fn state(&self) -> ReadSignal<SessionState> {
        self.state.read_only()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.get_untracked()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.with_untracked(SessionState::is_authenticated)
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state.with_untracked(|s| s.token.clone())
    }

    /// Token currently held by the durable slot, if any.
    #[must_use]
    pub fn stored_token(&self) -> Option<String> {
        self.slot.load().filter(|token| !token.is_empty())
    }

    pub fn set_user(&self, user: Option<User>) {
        self.state.update(|s| s.user = user);
    }

    /// Set or drop the token, mirroring it into the durable slot.
    pub fn set_token(&self, token: Option<String>) {
        let token = token.filter(|t| !t.is_empty());
        match &token {
            Some(value) => self.slot.store(value),
            None => self.slot.remove(),
        }
        self.state.update(|s| s.token = token);
    }

    /// Drop user and token together and empty the durable slot.
    pub fn clear(&self) {
        self.slot.remove();
        self.state.set(SessionState::default());
    }
}
