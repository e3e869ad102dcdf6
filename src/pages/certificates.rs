//! Certificate pages: list, create, detail, and renew.
//!
//! SYSTEM CONTEXT
//! ==============
//! List and create read the shared collection on `CertStore`. Detail loads
//! the full record (PEM material included) through `get_one`, which never
//! touches the collection. Renew swaps the result into the collection in
//! place and then shows the detail page.

#[cfg(test)]
#[path = "certificates_test.rs"]
mod certificates_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::context::use_app_handle;
use crate::net::types::{Certificate, CertificateRequest};
use crate::routes::{AppRoute, CERTIFICATES_PATH, CREATE_CERTIFICATE_PATH};

/// Turn free-form input into the comma-separated list the backend expects.
///
/// Commas, whitespace, and newlines all separate entries. Entries are
/// lowercased and repeated names dropped, keeping first-seen order.
pub(crate) fn normalize_domains(input: &str) -> Result<String, &'static str> {
    let mut domains: Vec<String> = Vec::new();
    for raw in input.split(|c: char| c == ',' || c.is_whitespace()) {
        let domain = raw.trim().trim_end_matches('.').to_ascii_lowercase();
        if domain.is_empty() {
            continue;
        }
        if !is_plausible_domain(&domain) {
            return Err("Domains may only contain letters, digits, dots, hyphens, or a leading wildcard.");
        }
        if !domains.contains(&domain) {
            domains.push(domain);
        }
    }
    if domains.is_empty() {
        return Err("Enter at least one domain.");
    }
    Ok(domains.join(","))
}

fn is_plausible_domain(domain: &str) -> bool {
    let body = domain.strip_prefix("*.").unwrap_or(domain);
    !body.is_empty()
        && body.contains('.')
        && body
            .split('.')
            .all(|label| !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'))
}

/// Date part of a backend timestamp, or a dash when absent.
pub(crate) fn display_date(value: Option<&str>) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v.split(['T', ' ']).next().unwrap_or(v).to_owned(),
        None => "-".to_owned(),
    }
}

/// Renewal is offered unless the backend says otherwise.
pub(crate) fn renewal_offered(cert: &Certificate) -> bool {
    cert.can_renew != Some(false)
}

/// Follow-up offered on the detail page: renew, or pay to upgrade when the
/// free renewal is used up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum NextStep {
    Renew(String),
    Upgrade(String),
}

pub(crate) fn next_step(cert: &Certificate) -> NextStep {
    if renewal_offered(cert) {
        NextStep::Renew(AppRoute::RenewCertificate(cert.id.clone()).path())
    } else {
        NextStep::Upgrade(AppRoute::PayCertificate(cert.id.clone()).path())
    }
}

pub(crate) fn status_label(cert: &Certificate) -> &'static str {
    if cert.is_expired() { "Expired" } else { "Active" }
}

fn route_id() -> Memo<String> {
    let params = use_params_map();
    Memo::new(move |_| params.read().get("id").unwrap_or_default())
}

// =============================================================================
// LIST
// =============================================================================

#[component]
pub fn CertificatesPage() -> impl IntoView {
    let app = use_app_handle();
    let certs = app.with_value(|app| app.certs.clone());
    let state = certs.state();

    let refresh = move || {
        let certs = app.with_value(|app| app.certs.clone());
        leptos::task::spawn_local(async move {
            if let Err(err) = certs.fetch_all().await {
                leptos::logging::warn!("certificate list refresh failed: {err}");
            }
        });
    };
    refresh();

    view! {
        <section class="certs">
            <header class="certs__header">
                <h1>"Certificates"</h1>
                <button
                    class="button button--secondary"
                    on:click=move |_| refresh()
                    disabled=move || state.get().loading
                >
                    "Refresh"
                </button>
                <A href=CREATE_CERTIFICATE_PATH attr:class="button">"New certificate"</A>
            </header>
            <Show when=move || state.get().error.is_some()>
                <p class="page__error">{move || state.get().error.unwrap_or_default()}</p>
            </Show>
            <Show
                when=move || !state.get().items.is_empty()
                fallback=move || {
                    view! {
                        <p class="page__status">
                            {move || if state.get().loading { "Loading..." } else { "No certificates yet." }}
                        </p>
                    }
                }
            >
                <table class="certs__table">
                    <thead>
                        <tr>
                            <th>"Domains"</th>
                            <th>"Issued"</th>
                            <th>"Expires"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For each=move || state.get().items key=|cert| cert.id.clone() let:cert>
                            <CertificateRow cert/>
                        </For>
                    </tbody>
                </table>
            </Show>
        </section>
    }
}

#[component]
fn CertificateRow(cert: Certificate) -> impl IntoView {
    let issued = display_date(cert.issue_date.as_deref());
    let expires = display_date(cert.expiry_date.as_deref());
    let status = status_label(&cert);
    let renew = renewal_offered(&cert).then(|| {
        let href = AppRoute::RenewCertificate(cert.id.clone()).path();
        view! { <A href=href>"Renew"</A> }
    });
    let detail_href = AppRoute::CertificateDetail(cert.id).path();
    let domains = cert.domains;
    view! {
        <tr>
            <td>
                <A href=detail_href>{domains}</A>
            </td>
            <td>{issued}</td>
            <td>{expires}</td>
            <td>{status}</td>
            <td>{renew}</td>
        </tr>
    }
}

// =============================================================================
// CREATE
// =============================================================================

#[component]
pub fn CreateCertificatePage() -> impl IntoView {
    let app = use_app_handle();
    let navigate = use_navigate();
    let domains = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match normalize_domains(&domains.get()) {
            Ok(domains) => CertificateRequest { domains },
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Requesting certificate...".to_owned());

        let certs = app.with_value(|app| app.certs.clone());
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match certs.create(&request).await {
                Ok(created) => {
                    info.set(String::new());
                    navigate(&AppRoute::CertificateDetail(created.id).path(), NavigateOptions::default());
                }
                Err(e) => info.set(e.to_string()),
            }
            busy.set(false);
        });
    };

    view! {
        <section class="certs">
            <h1>"New certificate"</h1>
            <form class="cert-form" on:submit=on_submit>
                <label for="cert-domains">"Domains"</label>
                <textarea
                    id="cert-domains"
                    class="cert-form__domains"
                    placeholder="example.com, www.example.com"
                    prop:value=move || domains.get()
                    on:input=move |ev| domains.set(event_target_value(&ev))
                ></textarea>
                <button class="button" type="submit" disabled=move || busy.get()>
                    "Issue certificate"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="page__status">{move || info.get()}</p>
            </Show>
            <A href=CERTIFICATES_PATH>"Back to certificates"</A>
        </section>
    }
}

// =============================================================================
// DETAIL
// =============================================================================

#[component]
pub fn CertificateDetailPage() -> impl IntoView {
    let app = use_app_handle();
    let id = route_id();
    let record = LocalResource::new(move || {
        let certs = app.with_value(|app| app.certs.clone());
        let id = id.get();
        async move { certs.get_one(&id).await }
    });

    view! {
        <section class="certs">
            {move || match record.get() {
                None => view! { <p class="page__status">"Loading..."</p> }.into_any(),
                Some(Err(e)) => view! { <p class="page__error">{e.to_string()}</p> }.into_any(),
                Some(Ok(cert)) => view! { <CertificateDetail cert/> }.into_any(),
            }}
            <A href=CERTIFICATES_PATH>"Back to certificates"</A>
        </section>
    }
}

#[component]
fn CertificateDetail(cert: Certificate) -> impl IntoView {
    let status = status_label(&cert);
    let issued = display_date(cert.issue_date.as_deref());
    let expires = display_date(cert.expiry_date.as_deref());
    let free_until = display_date(cert.free_expiry_date.as_deref());
    let action = match next_step(&cert) {
        NextStep::Renew(href) => view! { <A href=href attr:class="button">"Renew"</A> }.into_any(),
        NextStep::Upgrade(href) => view! { <A href=href attr:class="button">"Upgrade"</A> }.into_any(),
    };
    let pem_blocks = [("Certificate", cert.certificate), ("Private key", cert.private_key), ("Chain", cert.chain)]
        .into_iter()
        .filter_map(|(title, body)| body.map(|body| (title, body)))
        .map(|(title, body)| {
            view! {
                <h2>{title}</h2>
                <pre class="cert-detail__pem">{body}</pre>
            }
        })
        .collect_view();
    let domains = cert.domains;

    view! {
        <h1>{domains}</h1>
        <dl class="cert-detail">
            <dt>"Status"</dt>
            <dd>{status}</dd>
            <dt>"Issued"</dt>
            <dd>{issued}</dd>
            <dt>"Expires"</dt>
            <dd>{expires}</dd>
            <dt>"Free until"</dt>
            <dd>{free_until}</dd>
        </dl>
        {action}
        {pem_blocks}
    }
}

// =============================================================================
// RENEW
// =============================================================================

#[component]
pub fn RenewCertificatePage() -> impl IntoView {
    let app = use_app_handle();
    let navigate = use_navigate();
    let id = route_id();
    let state = app.with_value(|app| app.certs.state());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let domains = move || {
        let id = id.get();
        state.with(|s| s.find(&id).map(|cert| cert.domains.clone())).unwrap_or(id)
    };

    let on_renew = move |_: leptos::ev::MouseEvent| {
        if busy.get() {
            return;
        }
        busy.set(true);
        info.set("Renewing...".to_owned());

        let certs = app.with_value(|app| app.certs.clone());
        let id = id.get_untracked();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match certs.renew(&id).await {
                Ok(renewed) => {
                    info.set(String::new());
                    navigate(&AppRoute::CertificateDetail(renewed.id).path(), NavigateOptions::default());
                }
                Err(e) => info.set(e.to_string()),
            }
            busy.set(false);
        });
    };

    view! {
        <section class="certs">
            <h1>"Renew certificate"</h1>
            <p>"Request a fresh certificate for " <strong>{domains}</strong> "."</p>
            <button class="button" on:click=on_renew disabled=move || busy.get()>
                "Renew now"
            </button>
            <Show when=move || !info.get().is_empty()>
                <p class="page__status">{move || info.get()}</p>
            </Show>
            <A href={move || AppRoute::CertificateDetail(id.get()).path()}>"Cancel"</A>
        </section>
    }
}
