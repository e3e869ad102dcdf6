//! Paid upgrade flow: pick a provider for a certificate, follow the provider
//! link, then check the order once the browser comes back.
//!
//! SYSTEM CONTEXT
//! ==============
//! The provider redirects to `/payment/return?out_trade_no=...`; that page
//! and `/payment/orders/:order_id` both render the same order status view.

#[cfg(test)]
#[path = "payments_test.rs"]
mod payments_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_params_map, use_query_map};

use crate::context::use_app_handle;
use crate::net::types::{PaymentMethod, PaymentOrder};
use crate::pages::certificates::display_date;
use crate::routes::{AppRoute, CERTIFICATES_PATH};

pub(crate) fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

pub(crate) fn order_status_label(order: &PaymentOrder) -> &'static str {
    match order.status.as_deref() {
        Some("paid") => "Paid",
        Some("failed") => "Failed",
        Some("cancelled") => "Cancelled",
        _ => "Waiting for payment",
    }
}

// =============================================================================
// CHECKOUT
// =============================================================================

#[component]
pub fn PayCertificatePage() -> impl IntoView {
    let app = use_app_handle();
    let params = use_params_map();
    let cert_id = Memo::new(move |_| params.read().get("id").unwrap_or_default());
    let state = app.with_value(|app| app.payments.state());
    let method = RwSignal::new(PaymentMethod::Alipay);
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);
        info.set("Creating order...".to_owned());

        let store = app.with_value(|app| app.payments.clone());
        let cert_id = cert_id.get_untracked();
        let method = method.get_untracked();
        leptos::task::spawn_local(async move {
            match store.checkout(&cert_id, method).await {
                Ok(_) => info.set(String::new()),
                Err(e) => info.set(e.to_string()),
            }
            busy.set(false);
        });
    };

    let methods = PaymentMethod::ALL
        .into_iter()
        .map(|option| {
            view! {
                <label class="pay-form__method">
                    <input
                        type="radio"
                        name="payment-method"
                        prop:checked=move || method.get() == option
                        on:change=move |_| method.set(option)
                    />
                    {option.label()}
                </label>
            }
        })
        .collect_view();

    view! {
        <section class="certs">
            <h1>"Upgrade certificate"</h1>
            <form class="cert-form" on:submit=on_submit>
                {methods}
                <button class="button" type="submit" disabled=move || busy.get()>
                    "Continue to payment"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="page__status">{move || info.get()}</p>
            </Show>
            {move || {
                state
                    .get()
                    .checkout
                    .map(|link| {
                        let order_href = AppRoute::PaymentOrder(link.order_id.clone()).path();
                        let amount = format_amount(link.amount);
                        let payment_url = link.payment_url;
                        view! {
                            <div class="pay-link">
                                <p>"Amount due: " {amount}</p>
                                <a href={payment_url.clone()} class="button">"Pay now"</a>
                                <p class="pay-link__url">{payment_url}</p>
                                <A href=order_href>"Check order status"</A>
                            </div>
                        }
                    })
            }}
            <A href={move || AppRoute::CertificateDetail(cert_id.get()).path()}>"Back to certificate"</A>
        </section>
    }
}

// =============================================================================
// ORDER STATUS
// =============================================================================

#[component]
pub fn PaymentOrderPage() -> impl IntoView {
    let params = use_params_map();
    let order_id = Signal::derive(move || params.read().get("order_id").unwrap_or_default());
    view! { <OrderStatus order_id/> }
}

#[component]
pub fn PaymentReturnPage() -> impl IntoView {
    let query = use_query_map();
    let order_id = Signal::derive(move || query.read().get("out_trade_no").unwrap_or_default());
    view! { <OrderStatus order_id/> }
}

#[component]
fn OrderStatus(#[prop(into)] order_id: Signal<String>) -> impl IntoView {
    let app = use_app_handle();
    let order = LocalResource::new(move || {
        let store = app.with_value(|app| app.payments.clone());
        let order_id = order_id.get();
        async move {
            if order_id.is_empty() {
                return None;
            }
            Some(store.refresh_order(&order_id).await)
        }
    });

    view! {
        <section class="certs">
            <h1>"Payment"</h1>
            {move || match order.get() {
                None => view! { <p class="page__status">"Loading..."</p> }.into_any(),
                Some(None) => view! { <p class="page__error">"No order reference in this link."</p> }.into_any(),
                Some(Some(Err(e))) => view! { <p class="page__error">{e.to_string()}</p> }.into_any(),
                Some(Some(Ok(found))) => view! { <OrderSummary order=found/> }.into_any(),
            }}
            <button class="button button--secondary" on:click=move |_| order.refetch()>
                "Check again"
            </button>
            <A href=CERTIFICATES_PATH>"Back to certificates"</A>
        </section>
    }
}

#[component]
fn OrderSummary(order: PaymentOrder) -> impl IntoView {
    let status = order_status_label(&order);
    let amount = format_amount(order.amount);
    let paid = display_date(order.paid_at.as_deref());
    let certificate = order.cert_id.map(|id| {
        let href = AppRoute::CertificateDetail(id).path();
        view! { <A href=href>"View certificate"</A> }
    });
    let order_id = order.order_id;
    view! {
        <dl class="cert-detail">
            <dt>"Order"</dt>
            <dd>{order_id}</dd>
            <dt>"Status"</dt>
            <dd>{status}</dd>
            <dt>"Amount"</dt>
            <dd>{amount}</dd>
            <dt>"Paid"</dt>
            <dd>{paid}</dd>
        </dl>
        {certificate}
    }
}
