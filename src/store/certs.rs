//! Certificate store: keeps the local collection in step with the API.
//!
//! Each operation applies its merge in a single signal update after the
//! response lands, so overlapping calls interleave safely. Ordering between
//! concurrent calls is the caller's business; there are no retries.

#[cfg(test)]
#[path = "certs_test.rs"]
mod certs_test;

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;

use crate::net::api;
use crate::net::error::GatewayError;
use crate::net::gateway::Gateway;
use crate::net::types::{Certificate, CertificateRequest};
use crate::state::certs::{CertificatesState, prepend, replace_all, replace_in_place};

#[derive(Clone)]
pub struct CertStore {
    state: RwSignal<CertificatesState>,
    gateway: Gateway,
    fetches_in_flight: Rc<Cell<u32>>,
}

impl CertStore {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            state: RwSignal::new(CertificatesState::default()),
            gateway,
            fetches_in_flight: Rc::new(Cell::new(0)),
        }
    }

    #[must_use]
    pub fn state(&self) -> ReadSignal<CertificatesState> {
        self.state.read_only()
    }

    #[must_use]
    pub fn snapshot(&self) -> CertificatesState {
        self.state.get_untracked()
    }

    /// Replace the collection with the server listing.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the collection is left as it was.
    pub async fn fetch_all(&self) -> Result<(), GatewayError> {
        self.fetches_in_flight.set(self.fetches_in_flight.get() + 1);
        self.state.update(|s| s.loading = true);

        let result = api::list_certificates(&self.gateway).await;

        let remaining = self.fetches_in_flight.get().saturating_sub(1);
        self.fetches_in_flight.set(remaining);
        match result {
            Ok(listing) => {
                self.state.update(|s| {
                    replace_all(&mut s.items, listing);
                    s.loading = remaining > 0;
                    s.error = None;
                });
                Ok(())
            }
            Err(err) => {
                self.record_failure(&err, remaining > 0);
                Err(err)
            }
        }
    }

    /// Issue a certificate and put it at the front of the collection.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the collection is left as it was.
    pub async fn create(&self, request: &CertificateRequest) -> Result<Certificate, GatewayError> {
        match api::create_certificate(&self.gateway, request).await {
            Ok(created) => {
                self.state.update(|s| {
                    prepend(&mut s.items, created.clone());
                    s.error = None;
                });
                Ok(created)
            }
            Err(err) => {
                self.record_failure(&err, self.fetches_in_flight.get() > 0);
                Err(err)
            }
        }
    }

    /// Renew a certificate and swap the result in at its current position.
    ///
    /// If `id` is not in the local collection the renewed record is still
    /// returned but not added.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the collection is left as it was.
    pub async fn renew(&self, id: &str) -> Result<Certificate, GatewayError> {
        match api::renew_certificate(&self.gateway, id).await {
            Ok(renewed) => {
                let mut replaced = false;
                self.state.update(|s| {
                    replaced = replace_in_place(&mut s.items, renewed.clone());
                    s.error = None;
                });
                if !replaced {
                    leptos::logging::log!("renewed certificate {id} is not in the local list; leaving list as is");
                }
                Ok(renewed)
            }
            Err(err) => {
                self.record_failure(&err, self.fetches_in_flight.get() > 0);
                Err(err)
            }
        }
    }

    /// Fetch one certificate without touching the local collection.
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn get_one(&self, id: &str) -> Result<Certificate, GatewayError> {
        api::fetch_certificate(&self.gateway, id).await
    }

    fn record_failure(&self, err: &GatewayError, still_loading: bool) {
        let message = err.to_string();
        self.state.update(|s| {
            s.loading = still_loading;
            s.error = Some(message);
        });
    }
}
