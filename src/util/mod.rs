//! Browser-facing helpers kept apart from page logic.
//!
//! SYSTEM CONTEXT
//! ==============
//! `storage` isolates the durable token slot; `guard` owns route access
//! decisions and session rehydration.

pub mod guard;
pub mod storage;
