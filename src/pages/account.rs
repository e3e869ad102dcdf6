//! Emailed-link pages: verify an address, ask for a reset link, and set a
//! new password from one.
//!
//! The verify and reset pages are reachable signed in or not; the token in
//! the link is the only credential they use.

#[cfg(test)]
#[path = "account_test.rs"]
mod account_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_params_map, use_query_map};

use crate::context::use_app_handle;
use crate::net::types::{Acknowledgement, PasswordReset};
use crate::pages::register::looks_like_email;
use crate::routes::{FORGOT_PASSWORD_PATH, LOGIN_PATH};

const VERIFIED: &str = "Email verified. You can sign in now.";
const RESET_SENT: &str = "If that address has an account, a reset link is on its way.";
const PASSWORD_CHANGED: &str = "Password updated. Sign in with the new one.";

/// Server message when present, otherwise the page's own wording.
pub(crate) fn acknowledgement_text(ack: &Acknowledgement, fallback: &str) -> String {
    ack.message.as_deref().map(str::trim).filter(|m| !m.is_empty()).unwrap_or(fallback).to_owned()
}

pub(crate) fn validate_reset_email(email: &str) -> Result<String, &'static str> {
    let email = email.trim();
    if !looks_like_email(email) {
        return Err("Enter a valid email address.");
    }
    Ok(email.to_owned())
}

pub(crate) fn validate_password_reset(token: &str, password: &str, confirm: &str) -> Result<PasswordReset, &'static str> {
    let token = token.trim();
    if token.is_empty() {
        return Err("This reset link is missing its token. Request a new one.");
    }
    if password.is_empty() {
        return Err("Enter a new password.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(PasswordReset { token: token.to_owned(), new_password: password.to_owned() })
}

// =============================================================================
// VERIFY
// =============================================================================

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let app = use_app_handle();
    let params = use_params_map();
    let token = Memo::new(move |_| params.read().get("token").unwrap_or_default());
    let outcome = LocalResource::new(move || {
        let store = app.with_value(|app| app.session.clone());
        let token = token.get();
        async move { store.verify_email(&token).await }
    });

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Verify email"</h1>
                {move || match outcome.get() {
                    None => view! { <p class="login-message">"Verifying..."</p> }.into_any(),
                    Some(Ok(ack)) => {
                        view! { <p class="login-message">{acknowledgement_text(&ack, VERIFIED)}</p> }.into_any()
                    }
                    Some(Err(e)) => view! { <p class="page__error">{e.to_string()}</p> }.into_any(),
                }}
                <A href=LOGIN_PATH>"Go to sign in"</A>
            </div>
        </div>
    }
}

// =============================================================================
// FORGOT PASSWORD
// =============================================================================

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let app = use_app_handle();
    let email = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let address = match validate_reset_email(&email.get()) {
            Ok(address) => address,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Sending...".to_owned());

        let store = app.with_value(|app| app.session.clone());
        leptos::task::spawn_local(async move {
            match store.request_password_reset(&address).await {
                Ok(ack) => info.set(acknowledgement_text(&ack, RESET_SENT)),
                Err(e) => info.set(e.to_string()),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Reset password"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        autocomplete="email"
                        placeholder="Email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Send reset link"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <A href=LOGIN_PATH>"Back to sign in"</A>
            </div>
        </div>
    }
}

// =============================================================================
// RESET PASSWORD
// =============================================================================

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let app = use_app_handle();
    let query = use_query_map();
    let token = Memo::new(move |_| query.read().get("token").unwrap_or_default());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let done = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() || done.get() {
            return;
        }
        let reset = match validate_password_reset(&token.get(), &password.get(), &confirm.get()) {
            Ok(reset) => reset,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Saving...".to_owned());

        let store = app.with_value(|app| app.session.clone());
        leptos::task::spawn_local(async move {
            match store.reset_password(&reset.token, &reset.new_password).await {
                Ok(ack) => {
                    done.set(true);
                    info.set(acknowledgement_text(&ack, PASSWORD_CHANGED));
                }
                Err(e) => info.set(e.to_string()),
            }
            password.set(String::new());
            confirm.set(String::new());
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Choose a new password"</h1>
                <Show when=move || !done.get()>
                    <form class="login-form" on:submit=on_submit>
                        <input
                            class="login-input"
                            type="password"
                            autocomplete="new-password"
                            placeholder="New password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="password"
                            autocomplete="new-password"
                            placeholder="Confirm password"
                            prop:value=move || confirm.get()
                            on:input=move |ev| confirm.set(event_target_value(&ev))
                        />
                        <button class="login-button" type="submit" disabled=move || busy.get()>
                            "Save password"
                        </button>
                    </form>
                </Show>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-card__subtitle">
                    <A href=LOGIN_PATH>"Sign in"</A>
                    " or "
                    <A href=FORGOT_PASSWORD_PATH>"request another link"</A>
                </p>
            </div>
        </div>
    }
}
