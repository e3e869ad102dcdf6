//! Composition root for the client services.
//!
//! SYSTEM CONTEXT
//! ==============
//! Builds the session, gateway, stores, and guard once per app and wires the
//! gateway's unauthorized event to `Session::clear` plus a redirect to the
//! login route. Views reach the result through [`use_app`].

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::rc::Rc;

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::net::gateway::Gateway;
use crate::net::transport::Transport;
use crate::state::session::Session;
use crate::store::certs::CertStore;
use crate::store::invitations::InvitationStore;
use crate::store::payments::PaymentStore;
use crate::store::session::SessionStore;
use crate::util::guard::NavigationGuard;
use crate::util::storage::TokenSlot;

/// Everything the views need, cheap to clone.
#[derive(Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    pub session: SessionStore,
    pub certs: CertStore,
    pub invitations: InvitationStore,
    pub payments: PaymentStore,
    pub guard: NavigationGuard,
}

impl AppContext {
    /// Wire the services over an explicit transport and token slot.
    ///
    /// `redirect` receives the login path when the backend revokes the
    /// session.
    pub fn new(
        transport: Rc<dyn Transport>,
        slot: Rc<dyn TokenSlot>,
        config: ClientConfig,
        redirect: impl Fn(&str) + 'static,
    ) -> Self {
        let session = Session::new(slot);
        let gateway = Gateway::new(transport, config.clone())
            .with_token_source({
                let session = session.clone();
                move || session.token()
            })
            .on_unauthorized({
                let session = session.clone();
                let login_path = config.login_path.clone();
                move || {
                    session.clear();
                    redirect(&login_path);
                }
            });

        let store = SessionStore::new(session, gateway.clone());
        Self {
            config,
            certs: CertStore::new(gateway.clone()),
            invitations: InvitationStore::new(gateway.clone()),
            payments: PaymentStore::new(gateway),
            guard: NavigationGuard::new(store.clone()),
            session: store,
        }
    }

    /// Wire the services for the current build target: `fetch` and
    /// `localStorage` in the browser, offline stand-ins elsewhere.
    pub fn for_current_target(config: ClientConfig, redirect: impl Fn(&str) + 'static) -> Self {
        #[cfg(feature = "csr")]
        {
            let transport = Rc::new(crate::net::transport::BrowserTransport::new(config.request_timeout_ms));
            let slot = Rc::new(crate::util::storage::LocalStorageSlot::new(&config.token_key));
            Self::new(transport, slot, config, redirect)
        }
        #[cfg(not(feature = "csr"))]
        {
            let transport = Rc::new(crate::net::transport::OfflineTransport);
            let slot = Rc::new(crate::util::storage::MemorySlot::default());
            Self::new(transport, slot, config, redirect)
        }
    }

    /// Make this context available to descendant views.
    pub fn provide(self) {
        provide_context(StoredValue::new_local(self));
    }
}

/// Arena handle to the provided [`AppContext`]. It is `Copy` and `Send`, so
/// it can move into view closures that must be.
pub type AppHandle = StoredValue<AppContext, LocalStorage>;

/// Fetch the handle provided by the app shell.
pub fn use_app_handle() -> AppHandle {
    expect_context::<AppHandle>()
}

/// Fetch a clone of the [`AppContext`] provided by the app shell.
pub fn use_app() -> AppContext {
    use_app_handle().get_value()
}
