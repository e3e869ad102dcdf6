//! Root application component with routing, services, and the route guard.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::hooks::use_navigate;
use leptos_router::{
    NavigateOptions, ParamSegment, StaticSegment,
    components::{A, Redirect, Route, Router, Routes},
};

use crate::config::ClientConfig;
use crate::context::{AppContext, use_app_handle};
use crate::pages::account::{ForgotPasswordPage, ResetPasswordPage, VerifyEmailPage};
use crate::pages::certificates::{CertificateDetailPage, CertificatesPage, CreateCertificatePage, RenewCertificatePage};
use crate::pages::dashboard::DashboardPage;
use crate::pages::invitations::InvitationsPage;
use crate::pages::login::LoginPage;
use crate::pages::payments::{PayCertificatePage, PaymentOrderPage, PaymentReturnPage};
use crate::pages::register::RegisterPage;
use crate::routes::{CERTIFICATES_PATH, INVITATIONS_PATH, LANDING_PATH, LOGIN_PATH, REGISTER_PATH};
use crate::util::guard::install_route_guard;

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Certdesk"/>

        <Router>
            <GuardedShell/>
        </Router>
    }
}

/// Builds the services inside the router (the redirect hook needs
/// `use_navigate`) and holds every route back until the guard approves it.
#[component]
fn GuardedShell() -> impl IntoView {
    let navigate = use_navigate();
    let config = ClientConfig::default();

    let redirect = {
        let navigate = navigate.clone();
        move |path: &str| navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() })
    };
    let app = AppContext::for_current_target(config.clone(), redirect);
    let approved = install_route_guard(app.guard.clone(), config, navigate);
    app.provide();

    view! {
        <NavBar/>
        <main class="page">
            <Show
                when=move || approved.get()
                fallback=|| view! { <p class="page__status">"Loading..."</p> }
            >
                <Routes fallback=|| view! { <Redirect path=LANDING_PATH/> }>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                    <Route path=StaticSegment("reset-password") view=ResetPasswordPage/>
                    <Route path=(StaticSegment("verify"), ParamSegment("token")) view=VerifyEmailPage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=StaticSegment("certificates") view=CertificatesPage/>
                    <Route
                        path=(StaticSegment("certificates"), StaticSegment("create"))
                        view=CreateCertificatePage
                    />
                    <Route
                        path=(StaticSegment("certificates"), ParamSegment("id"), StaticSegment("renew"))
                        view=RenewCertificatePage
                    />
                    <Route
                        path=(StaticSegment("certificates"), ParamSegment("id"), StaticSegment("pay"))
                        view=PayCertificatePage
                    />
                    <Route path=(StaticSegment("certificates"), ParamSegment("id")) view=CertificateDetailPage/>
                    <Route path=StaticSegment("invitations") view=InvitationsPage/>
                    <Route
                        path=(StaticSegment("payment"), StaticSegment("orders"), ParamSegment("order_id"))
                        view=PaymentOrderPage
                    />
                    <Route path=(StaticSegment("payment"), StaticSegment("return")) view=PaymentReturnPage/>
                </Routes>
            </Show>
        </main>
    }
}

#[component]
fn NavBar() -> impl IntoView {
    let app = use_app_handle();
    let session = app.with_value(|app| app.session.session().state());
    let login_path = app.with_value(|app| app.config.login_path.clone());
    let navigate = use_navigate();

    let on_logout = move |_: leptos::ev::MouseEvent| {
        app.with_value(|app| app.session.logout());
        navigate(&login_path, NavigateOptions::default());
    };

    view! {
        <nav class="nav">
            <A href=LANDING_PATH attr:class="nav__brand">"Certdesk"</A>
            <Show
                when=move || session.get().is_authenticated()
                fallback=|| {
                    view! {
                        <A href=LOGIN_PATH attr:class="nav__link">"Sign in"</A>
                        <A href=REGISTER_PATH attr:class="nav__link">"Register"</A>
                    }
                }
            >
                <A href=CERTIFICATES_PATH attr:class="nav__link">"Certificates"</A>
                <A href=INVITATIONS_PATH attr:class="nav__link">"Invitations"</A>
                <span class="nav__user">
                    {move || session.get().user().map(|u| u.username.clone()).unwrap_or_default()}
                </span>
                <button class="nav__logout" on:click=on_logout.clone()>"Sign out"</button>
            </Show>
        </nav>
    }
}
