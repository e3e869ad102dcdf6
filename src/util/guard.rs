//! Navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route transition is checked here. The first check rehydrates the
//! session from the stored token; after that the decision is a pure function
//! of the route's requirement and `is_authenticated`.
//!
//! The rehydration flag is owned by [`NavigationGuard`] rather than hidden in
//! a closure, so tests can observe and reset it.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::cell::RefCell;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};
use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::config::ClientConfig;
use crate::routes::AppRoute;
use crate::store::session::SessionStore;

/// What a route demands of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    RequiresAuth,
    GuestOnly,
    Open,
}

/// Outcome of one navigation check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    RedirectToLogin,
    RedirectToLanding,
}

/// The guard's decision table.
#[must_use]
pub fn decide(access: RouteAccess, authenticated: bool) -> GuardDecision {
    match (access, authenticated) {
        (RouteAccess::RequiresAuth, false) => GuardDecision::RedirectToLogin,
        (RouteAccess::GuestOnly, true) => GuardDecision::RedirectToLanding,
        (RouteAccess::RequiresAuth, true) | (RouteAccess::GuestOnly, false) | (RouteAccess::Open, _) => {
            GuardDecision::Proceed
        }
    }
}

/// Path to navigate to for a redirect decision.
#[must_use]
pub fn redirect_target(decision: GuardDecision, config: &ClientConfig) -> Option<&str> {
    match decision {
        GuardDecision::Proceed => None,
        GuardDecision::RedirectToLogin => Some(&config.login_path),
        GuardDecision::RedirectToLanding => Some(&config.landing_path),
    }
}

enum Rehydration {
    Pending,
    InFlight(Shared<LocalBoxFuture<'static, ()>>),
    Done,
}

/// Route guard with its process-lifetime rehydration state.
#[derive(Clone)]
pub struct NavigationGuard {
    store: SessionStore,
    rehydration: Rc<RefCell<Rehydration>>,
}

impl NavigationGuard {
    pub fn new(store: SessionStore) -> Self {
        Self { store, rehydration: Rc::new(RefCell::new(Rehydration::Pending)) }
    }

    #[must_use]
    pub fn is_rehydrated(&self) -> bool {
        matches!(*self.rehydration.borrow(), Rehydration::Done)
    }

    /// Forget that rehydration happened; the next check runs it again.
    pub fn reset(&self) {
        *self.rehydration.borrow_mut() = Rehydration::Pending;
    }

    /// Decide whether navigation to `path` may proceed.
    pub async fn check_path(&self, path: &str) -> GuardDecision {
        self.check(AppRoute::from_path(path).access()).await
    }

    /// Decide whether navigation to a route with `access` may proceed.
    pub async fn check(&self, access: RouteAccess) -> GuardDecision {
        self.ensure_rehydrated().await;
        decide(access, self.store.session().is_authenticated())
    }

    async fn ensure_rehydrated(&self) {
        let in_flight = {
            let mut state = self.rehydration.borrow_mut();
            let existing = match &*state {
                Rehydration::Done => return,
                Rehydration::InFlight(task) => Some(task.clone()),
                Rehydration::Pending => None,
            };
            match existing {
                Some(task) => task,
                None => {
                    let store = self.store.clone();
                    let task = async move {
                        // Treated as signed out.
                        if let Err(err) = store.load_user().await {
                            leptos::logging::warn!("ignoring rehydration failure: {err}");
                        }
                    }
                    .boxed_local()
                    .shared();
                    *state = Rehydration::InFlight(task.clone());
                    task
                }
            }
        };
        in_flight.await;
        let mut state = self.rehydration.borrow_mut();
        if matches!(*state, Rehydration::InFlight(_)) {
            *state = Rehydration::Done;
        }
    }
}

/// Run the guard on every pathname change and redirect when it says so.
///
/// Returns a signal that is `true` only while the current path has been
/// approved, so protected views never render before the check finishes.
pub fn install_route_guard<F>(guard: NavigationGuard, config: ClientConfig, navigate: F) -> ReadSignal<bool>
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let location = leptos_router::hooks::use_location();
    let approved = RwSignal::new(false);
    let latest = Rc::new(std::cell::Cell::new(0_u64));

    Effect::new(move || {
        let path = location.pathname.get();
        let ticket = latest.get() + 1;
        latest.set(ticket);
        approved.set(false);

        let guard = guard.clone();
        let config = config.clone();
        let navigate = navigate.clone();
        let latest = Rc::clone(&latest);
        leptos::task::spawn_local(async move {
            let decision = guard.check_path(&path).await;
            if latest.get() != ticket {
                return;
            }
            match redirect_target(decision, &config) {
                Some(target) => navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() }),
                None => approved.set(true),
            }
        });
    });

    approved.read_only()
}
