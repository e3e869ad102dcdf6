//! Checkout progress: the last provider link handed out and the orders the
//! user has looked at.

#[cfg(test)]
#[path = "payments_test.rs"]
mod payments_test;

use crate::net::types::{PaymentLink, PaymentOrder};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaymentsState {
    pub checkout: Option<PaymentLink>,
    /// Keyed by `order_id`, most recently refreshed last.
    pub orders: Vec<PaymentOrder>,
    pub error: Option<String>,
}

impl PaymentsState {
    #[must_use]
    pub fn order(&self, order_id: &str) -> Option<&PaymentOrder> {
        self.orders.iter().find(|order| order.order_id == order_id)
    }
}

/// Store the latest view of an order, replacing any earlier one.
pub fn upsert_order(orders: &mut Vec<PaymentOrder>, latest: PaymentOrder) {
    orders.retain(|order| order.order_id != latest.order_id);
    orders.push(latest);
}
