//! Invitations page: referral counters, the user's invite codes, and a form
//! to redeem a code from someone else.

#[cfg(test)]
#[path = "invitations_test.rs"]
mod invitations_test;

use leptos::prelude::*;

use crate::context::use_app_handle;
use crate::net::types::Invitation;
use crate::pages::certificates::display_date;

/// Codes are issued as 16 upper-case letters and digits.
pub(crate) fn validate_invite_code(raw: &str) -> Result<String, &'static str> {
    let code = raw.trim();
    if code.is_empty() {
        return Err("Enter an invite code.");
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Invite codes contain only letters and digits.");
    }
    Ok(code.to_owned())
}

pub(crate) fn invitation_status_label(invitation: &Invitation) -> &'static str {
    match invitation.status.as_deref() {
        Some("accepted") => "Accepted",
        Some("expired") => "Expired",
        _ => "Pending",
    }
}

#[component]
pub fn InvitationsPage() -> impl IntoView {
    let app = use_app_handle();
    let state = app.with_value(|app| app.invitations.state());
    let code = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let store = app.with_value(|app| app.invitations.clone());
    leptos::task::spawn_local(async move {
        if let Err(err) = store.refresh().await {
            leptos::logging::warn!("invitation refresh failed: {err}");
        }
    });

    let on_create = move |_: leptos::ev::MouseEvent| {
        if busy.get() {
            return;
        }
        busy.set(true);
        let store = app.with_value(|app| app.invitations.clone());
        leptos::task::spawn_local(async move {
            match store.create().await {
                Ok(issued) => info.set(format!("New code: {}", issued.invite_code)),
                Err(e) => info.set(e.to_string()),
            }
            busy.set(false);
        });
    };

    let on_accept = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let invite_code = match validate_invite_code(&code.get()) {
            Ok(invite_code) => invite_code,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        let store = app.with_value(|app| app.invitations.clone());
        leptos::task::spawn_local(async move {
            match store.accept(&invite_code).await {
                Ok(_) => {
                    code.set(String::new());
                    info.set("Invitation accepted.".to_owned());
                }
                Err(e) => info.set(e.to_string()),
            }
            busy.set(false);
        });
    };

    view! {
        <section class="invitations">
            <header class="certs__header">
                <h1>"Invitations"</h1>
                <button class="button" on:click=on_create disabled=move || busy.get()>
                    "New invite code"
                </button>
            </header>
            <dl class="invitations__stats">
                <dt>"Issued"</dt>
                <dd>{move || state.get().stats.total}</dd>
                <dt>"Accepted"</dt>
                <dd>{move || state.get().stats.accepted}</dd>
                <dt>"Pending"</dt>
                <dd>{move || state.get().stats.pending}</dd>
                <dt>"Reward points"</dt>
                <dd>{move || state.get().stats.total_rewards}</dd>
            </dl>
            <Show when=move || !info.get().is_empty()>
                <p class="page__status">{move || info.get()}</p>
            </Show>
            <table class="certs__table">
                <thead>
                    <tr>
                        <th>"Code"</th>
                        <th>"Status"</th>
                        <th>"Expires"</th>
                        <th>"Reward"</th>
                    </tr>
                </thead>
                <tbody>
                    <For each=move || state.get().items key=|inv| inv.id.clone() let:invitation>
                        <InvitationRow invitation/>
                    </For>
                </tbody>
            </table>
            <form class="cert-form" on:submit=on_accept>
                <label for="invite-code">"Have a code?"</label>
                <input
                    id="invite-code"
                    type="text"
                    prop:value=move || code.get()
                    on:input=move |ev| code.set(event_target_value(&ev))
                />
                <button class="button button--secondary" type="submit" disabled=move || busy.get()>
                    "Redeem"
                </button>
            </form>
        </section>
    }
}

#[component]
fn InvitationRow(invitation: Invitation) -> impl IntoView {
    let status = invitation_status_label(&invitation);
    let expires = display_date(invitation.expires_at.as_deref());
    let reward = invitation.reward_points;
    let code = invitation.invite_code;
    view! {
        <tr>
            <td>
                <code>{code}</code>
            </td>
            <td>{status}</td>
            <td>{expires}</td>
            <td>{reward}</td>
        </tr>
    }
}
