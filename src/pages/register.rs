//! Registration page. A new account must verify its email before signing in,
//! so success shows the server's message instead of navigating.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::context::use_app_handle;
use crate::net::types::NewAccount;
use crate::routes::LOGIN_PATH;

const ACCOUNT_CREATED: &str = "Account created. Check your email to verify it, then sign in.";

pub(crate) fn validate_registration_input(
    username: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<NewAccount, &'static str> {
    let username = username.trim();
    let email = email.trim();
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err("Fill in username, email, and password.");
    }
    if !looks_like_email(email) {
        return Err("Enter a valid email address.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(NewAccount { username: username.to_owned(), email: email.to_owned(), password: password.to_owned() })
}

pub(crate) fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let app = use_app_handle();
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let created = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let account =
            match validate_registration_input(&username.get(), &email.get(), &password.get(), &confirm.get()) {
                Ok(account) => account,
                Err(message) => {
                    info.set(message.to_owned());
                    return;
                }
            };
        busy.set(true);
        info.set("Creating account...".to_owned());

        let store = app.with_value(|app| app.session.clone());
        leptos::task::spawn_local(async move {
            match store.register(&account).await {
                Ok(record) => {
                    created.set(true);
                    info.set(record.message.unwrap_or_else(|| ACCOUNT_CREATED.to_owned()));
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
                <h1>"Create account"</h1>
                <Show when=move || !created.get()>
                    <form class="login-form" on:submit=on_submit>
                        <input
                            class="login-input"
                            type="text"
                            autocomplete="username"
                            placeholder="Username"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="password"
                            autocomplete="new-password"
                            placeholder="Password"
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
                            "Register"
                        </button>
                    </form>
                </Show>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-card__subtitle">
                    "Already registered? "
                    <A href=LOGIN_PATH>"Sign in"</A>
                </p>
            </div>
        </div>
    }
}
