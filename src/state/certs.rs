//! Certificate collection state and its merge rules.
//!
//! DESIGN
//! ======
//! Items are ordered newest first and keyed by `id`. The three merges below
//! are the only ways entries enter or change, and each preserves the
//! one-entry-per-id invariant on its own, so interleaved responses cannot
//! produce duplicates whatever order they land in.

#[cfg(test)]
#[path = "certs_test.rs"]
mod certs_test;

use std::collections::HashSet;

use crate::net::types::Certificate;

/// Local certificate cache plus request status for list views.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CertificatesState {
    pub items: Vec<Certificate>,
    pub loading: bool,
    /// Message of the last failed operation, cleared by the next success.
    pub error: Option<String>,
}

impl CertificatesState {
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Certificate> {
        self.items.iter().find(|cert| cert.id == id)
    }
}

/// Replace the whole collection with a server listing, keeping server order.
/// Repeated ids keep their first occurrence.
pub fn replace_all(items: &mut Vec<Certificate>, listing: Vec<Certificate>) {
    let mut seen = HashSet::with_capacity(listing.len());
    *items = listing
        .into_iter()
        .filter(|cert| seen.insert(cert.id.clone()))
        .collect();
}

/// Insert a newly created certificate at the front.
///
/// An existing entry with the same id (e.g. from a listing that landed first)
/// is dropped so the new record takes the most-recent slot.
pub fn prepend(items: &mut Vec<Certificate>, created: Certificate) {
    items.retain(|cert| cert.id != created.id);
    items.insert(0, created);
}

/// Swap in an updated certificate at the position of its id.
///
/// Returns `false` and leaves `items` untouched when the id is not present.
pub fn replace_in_place(items: &mut [Certificate], updated: Certificate) -> bool {
    match items.iter_mut().find(|cert| cert.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}
