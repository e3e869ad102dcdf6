//! Dashboard page: the authenticated landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Refreshes the certificate list once on mount and shows counts plus the
//! most recently issued entries.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::context::use_app_handle;
use crate::net::types::Certificate;
use crate::routes::{AppRoute, CERTIFICATES_PATH, CREATE_CERTIFICATE_PATH};

const RECENT_LIMIT: usize = 5;

/// Counts shown on the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct CertificateSummary {
    pub total: usize,
    pub active: usize,
    pub expired: usize,
    pub renewable: usize,
}

pub(crate) fn summarize(items: &[Certificate]) -> CertificateSummary {
    items.iter().fold(CertificateSummary::default(), |mut acc, cert| {
        acc.total += 1;
        if cert.is_expired() {
            acc.expired += 1;
        } else {
            acc.active += 1;
        }
        if cert.can_renew == Some(true) {
            acc.renewable += 1;
        }
        acc
    })
}

/// The newest entries, as many as the dashboard lists.
pub(crate) fn most_recent(items: &[Certificate]) -> Vec<Certificate> {
    items.iter().take(RECENT_LIMIT).cloned().collect()
}

#[component]
fn RecentItem(cert: Certificate) -> impl IntoView {
    let href = AppRoute::CertificateDetail(cert.id).path();
    let label = cert.domains;
    view! {
        <li>
            <A href=href>{label}</A>
        </li>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app = use_app_handle();
    let session = app.with_value(|app| app.session.session().state());
    let certs = app.with_value(|app| app.certs.clone());
    let state = certs.state();

    leptos::task::spawn_local(async move {
        if let Err(err) = certs.fetch_all().await {
            leptos::logging::warn!("dashboard refresh failed: {err}");
        }
    });

    let summary = Memo::new(move |_| summarize(&state.read().items));
    let recent = move || state.with(|s| most_recent(&s.items));

    view! {
        <section class="dashboard">
            <h1>
                "Welcome, "
                {move || session.get().user().map(|u| u.username.clone()).unwrap_or_default()}
            </h1>
            <div class="dashboard__stats">
                <div class="stat">
                    <span class="stat__value">{move || summary.get().total}</span>
                    <span class="stat__label">"Certificates"</span>
                </div>
                <div class="stat">
                    <span class="stat__value">{move || summary.get().active}</span>
                    <span class="stat__label">"Active"</span>
                </div>
                <div class="stat">
                    <span class="stat__value">{move || summary.get().expired}</span>
                    <span class="stat__label">"Expired"</span>
                </div>
                <div class="stat">
                    <span class="stat__value">{move || summary.get().renewable}</span>
                    <span class="stat__label">"Renewable"</span>
                </div>
            </div>
            <Show when=move || state.get().loading>
                <p class="page__status">"Refreshing..."</p>
            </Show>
            <Show when=move || state.get().error.is_some()>
                <p class="page__error">{move || state.get().error.unwrap_or_default()}</p>
            </Show>
            <h2>"Recent certificates"</h2>
            <ul class="dashboard__recent">
                <For
                    each=recent
                    key=|cert| cert.id.clone()
                    let:cert
                >
                    <RecentItem cert/>
                </For>
            </ul>
            <div class="dashboard__actions">
                <A href=CREATE_CERTIFICATE_PATH attr:class="button">"New certificate"</A>
                <A href=CERTIFICATES_PATH attr:class="button button--secondary">"All certificates"</A>
            </div>
        </section>
    }
}
