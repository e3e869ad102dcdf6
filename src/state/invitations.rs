//! Invitation list and counters for the referral page.

#[cfg(test)]
#[path = "invitations_test.rs"]
mod invitations_test;

use crate::net::types::{Invitation, InvitationStats};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InvitationsState {
    /// Invitations issued by the user, newest first.
    pub items: Vec<Invitation>,
    pub stats: InvitationStats,
    pub loading: bool,
    pub error: Option<String>,
}

/// Put a freshly issued invitation first and count it, unless the id is
/// already listed.
pub fn record_issued(state: &mut InvitationsState, issued: Invitation) {
    if state.items.iter().any(|inv| inv.id == issued.id) {
        return;
    }
    state.stats.total += 1;
    if issued.is_pending() {
        state.stats.pending += 1;
    }
    state.items.insert(0, issued);
}
