//! Invitation store: issue and accept invite codes and keep the referral
//! list and counters current.

#[cfg(test)]
#[path = "invitations_test.rs"]
mod invitations_test;

use futures::future::join;
use leptos::prelude::*;

use crate::net::api;
use crate::net::error::GatewayError;
use crate::net::gateway::Gateway;
use crate::net::types::Invitation;
use crate::state::invitations::{InvitationsState, record_issued};

#[derive(Clone)]
pub struct InvitationStore {
    state: RwSignal<InvitationsState>,
    gateway: Gateway,
}

impl InvitationStore {
    pub fn new(gateway: Gateway) -> Self {
        Self { state: RwSignal::new(InvitationsState::default()), gateway }
    }

    #[must_use]
    pub fn state(&self) -> ReadSignal<InvitationsState> {
        self.state.read_only()
    }

    #[must_use]
    pub fn snapshot(&self) -> InvitationsState {
        self.state.get_untracked()
    }

    /// Load the list and the counters together. Both must succeed for
    /// either to be applied.
    ///
    /// # Errors
    ///
    /// Returns the first gateway error; the state is left as it was.
    pub async fn refresh(&self) -> Result<(), GatewayError> {
        self.state.update(|s| s.loading = true);
        let (listing, stats) = join(api::list_invitations(&self.gateway), api::invitation_stats(&self.gateway)).await;
        match listing.and_then(|items| stats.map(|stats| (items, stats))) {
            Ok((items, stats)) => {
                self.state.update(|s| {
                    s.items = items;
                    s.stats = stats;
                    s.loading = false;
                    s.error = None;
                });
                Ok(())
            }
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Issue a new invite code.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the state is left as it was.
    pub async fn create(&self) -> Result<Invitation, GatewayError> {
        match api::create_invitation(&self.gateway).await {
            Ok(issued) => {
                self.state.update(|s| {
                    record_issued(s, issued.clone());
                    s.error = None;
                });
                Ok(issued)
            }
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Redeem someone else's invite code. The user's own list is unaffected.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; a used, expired, or unknown code comes back
    /// as `RequestRejected` carrying the server's message.
    pub async fn accept(&self, invite_code: &str) -> Result<Invitation, GatewayError> {
        let code = invite_code.trim();
        let result = api::accept_invitation(&self.gateway, code).await;
        match &result {
            Ok(_) => self.state.update(|s| s.error = None),
            Err(err) => self.record_failure(err),
        }
        result
    }

    fn record_failure(&self, err: &GatewayError) {
        let message = err.to_string();
        self.state.update(|s| {
            s.loading = false;
            s.error = Some(message);
        });
    }
}
