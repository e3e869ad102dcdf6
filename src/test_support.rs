//! Scripted transport and helpers shared by the async store tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::future::LocalBoxFuture;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::context::AppContext;
use crate::net::gateway::Gateway;
use crate::net::transport::{ApiRequest, RawResponse, Transport, TransportFailure};
use crate::util::storage::MemorySlot;

/// Transport that answers from a queue and records what was sent.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<RawResponse, TransportFailure>>>,
    requests: RefCell<Vec<ApiRequest>>,
    yield_first: Cell<bool>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Make every call suspend once before answering, so joined futures are
    /// all in flight together.
    pub(crate) fn yielding(self: &Rc<Self>) -> Rc<Self> {
        self.yield_first.set(true);
        Rc::clone(self)
    }

    pub(crate) fn reply(&self, status: u16, body: &Value) {
        self.reply_raw(status, &body.to_string());
    }

    pub(crate) fn reply_raw(&self, status: u16, body: &str) {
        self.replies
            .borrow_mut()
            .push_back(Ok(RawResponse { status, body: body.to_owned() }));
    }

    pub(crate) fn fail(&self, failure: TransportFailure) {
        self.replies.borrow_mut().push_back(Err(failure));
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn paths(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|req| req.url.trim_start_matches(API_BASE).to_owned())
            .collect()
    }
}

impl Transport for ScriptedTransport {
    fn dispatch(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<RawResponse, TransportFailure>> {
        self.requests.borrow_mut().push(request);
        let reply = self
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportFailure::Network("no scripted reply".to_owned())));
        let yield_first = self.yield_first.get();
        Box::pin(async move {
            if yield_first {
                YieldOnce::default().await;
            }
            reply
        })
    }
}

pub(crate) const API_BASE: &str = "https://api.test/api";

pub(crate) fn test_config() -> ClientConfig {
    ClientConfig { api_base_url: API_BASE.to_owned(), ..ClientConfig::default() }
}

pub(crate) fn gateway_over(transport: &Rc<ScriptedTransport>) -> Gateway {
    let transport: Rc<dyn Transport> = Rc::clone(transport) as Rc<dyn Transport>;
    Gateway::new(transport, test_config())
}

/// Fully wired services over a scripted transport and an in-memory slot.
pub(crate) struct Harness {
    pub(crate) slot: MemorySlot,
    pub(crate) app: AppContext,
    pub(crate) redirects: Rc<RefCell<Vec<String>>>,
}

pub(crate) fn harness(transport: &Rc<ScriptedTransport>, stored_token: Option<&str>) -> Harness {
    let slot = stored_token.map_or_else(MemorySlot::default, MemorySlot::with_token);
    let redirects = Rc::new(RefCell::new(Vec::new()));
    let app = AppContext::new(
        Rc::clone(transport) as Rc<dyn Transport>,
        Rc::new(slot.clone()),
        test_config(),
        {
            let redirects = Rc::clone(&redirects);
            move |path: &str| redirects.borrow_mut().push(path.to_owned())
        },
    );
    Harness { slot, app, redirects }
}

pub(crate) fn user_json(id: &str) -> Value {
    serde_json::json!({ "id": id, "username": format!("user-{id}"), "email": format!("{id}@example.com") })
}

pub(crate) fn cert_json(id: u32, expiry: &str) -> Value {
    serde_json::json!({ "id": id, "domains": format!("{id}.example.com"), "expiry_date": expiry })
}

/// Future that returns `Pending` once, then completes.
#[derive(Default)]
pub(crate) struct YieldOnce {
    yielded: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}
