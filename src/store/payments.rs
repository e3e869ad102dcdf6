//! Payment store: start a checkout for a certificate and follow the order
//! until the provider settles it.

#[cfg(test)]
#[path = "payments_test.rs"]
mod payments_test;

use leptos::prelude::*;

use crate::net::api;
use crate::net::error::GatewayError;
use crate::net::gateway::Gateway;
use crate::net::types::{PaymentLink, PaymentMethod, PaymentOrder, PaymentRequest};
use crate::state::payments::{PaymentsState, upsert_order};

#[derive(Clone)]
pub struct PaymentStore {
    state: RwSignal<PaymentsState>,
    gateway: Gateway,
}

impl PaymentStore {
    pub fn new(gateway: Gateway) -> Self {
        Self { state: RwSignal::new(PaymentsState::default()), gateway }
    }

    #[must_use]
    pub fn state(&self) -> ReadSignal<PaymentsState> {
        self.state.read_only()
    }

    #[must_use]
    pub fn snapshot(&self) -> PaymentsState {
        self.state.get_untracked()
    }

    /// Open an order for `cert_id` at the server's default price.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the previous checkout is kept.
    pub async fn checkout(&self, cert_id: &str, method: PaymentMethod) -> Result<PaymentLink, GatewayError> {
        let request = PaymentRequest { cert_id: cert_id.to_owned(), payment_method: method, amount: None };
        match api::create_payment(&self.gateway, &request).await {
            Ok(link) => {
                leptos::logging::log!("opened payment order {} via {}", link.order_id, method.as_str());
                self.state.update(|s| {
                    s.checkout = Some(link.clone());
                    s.error = None;
                });
                Ok(link)
            }
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Fetch the current status of an order and remember it.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; an order the user does not own is
    /// `NotFound`.
    pub async fn refresh_order(&self, order_id: &str) -> Result<PaymentOrder, GatewayError> {
        match api::fetch_order(&self.gateway, order_id).await {
            Ok(order) => {
                self.state.update(|s| {
                    if s.checkout.as_ref().is_some_and(|link| link.order_id == order.order_id) && !order.is_pending() {
                        s.checkout = None;
                    }
                    upsert_order(&mut s.orders, order.clone());
                    s.error = None;
                });
                Ok(order)
            }
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    fn record_failure(&self, err: &GatewayError) {
        let message = err.to_string();
        self.state.update(|s| s.error = Some(message));
    }
}
