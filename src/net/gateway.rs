//! Transport gateway: token injection, response classification, and the
//! force-logout event.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both stores talk to the backend only through a [`Gateway`]. The gateway
//! reads the session token through a callback at dispatch time and reports a
//! revoked session through a second callback; the composition root wires the
//! latter to `Session::clear` and a redirect to the login route, so this
//! module never depends on routing.
//!
//! FORCE-LOGOUT RULE
//! =================
//! A 401 fires the hook only when the request carried a token that is still
//! the current one after the response arrives. The first hook clears the
//! session, so concurrent 401s against the same token fire it once, and
//! unauthenticated requests never fire it. The auth endpoints go out through
//! the `*_anonymous` calls, which never carry a token, so a bad login by a
//! signed-in user cannot force a logout either.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{GatewayError, classify_status, is_success};
use super::transport::{ApiRequest, Method, Transport};
use crate::config::ClientConfig;

type TokenSource = Rc<dyn Fn() -> Option<String>>;
type UnauthorizedHook = Rc<dyn Fn()>;

/// Whether a call attaches the session token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Bearer {
    Session,
    Omit,
}

/// Shared handle for issuing API calls. Cloning is cheap.
#[derive(Clone)]
pub struct Gateway {
    transport: Rc<dyn Transport>,
    config: Rc<ClientConfig>,
    token: TokenSource,
    on_unauthorized: UnauthorizedHook,
}

impl Gateway {
    pub fn new(transport: Rc<dyn Transport>, config: ClientConfig) -> Self {
        Self {
            transport,
            config: Rc::new(config),
            token: Rc::new(|| None),
            on_unauthorized: Rc::new(|| {}),
        }
    }

    /// Read the bearer token from `source` on every outgoing call.
    #[must_use]
    pub fn with_token_source(mut self, source: impl Fn() -> Option<String> + 'static) -> Self {
        self.token = Rc::new(source);
        self
    }

    /// Run `hook` when the backend revokes the current session.
    #[must_use]
    pub fn on_unauthorized(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Rc::new(hook);
        self
    }

    /// Send a request and return the decoded JSON payload.
    ///
    /// # Errors
    ///
    /// Returns the classified [`GatewayError`] for any failure.
    pub async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, GatewayError> {
        let body = body.map(encode_body).transpose()?;
        let text = self.exchange(method, path, body, Bearer::Session).await?;
        decode(&text)
    }

    /// `GET path`, decoding the payload as `T`.
    ///
    /// # Errors
    ///
    /// Returns the classified [`GatewayError`] for any failure.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let text = self.exchange(Method::Get, path, None, Bearer::Session).await?;
        decode(&text)
    }

    /// `GET path` without the session token.
    ///
    /// # Errors
    ///
    /// Returns the classified [`GatewayError`] for any failure.
    pub async fn get_anonymous<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let text = self.exchange(Method::Get, path, None, Bearer::Omit).await?;
        decode(&text)
    }

    /// `POST path` with a JSON `body`, decoding the payload as `T`.
    ///
    /// # Errors
    ///
    /// Returns the classified [`GatewayError`] for any failure.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        let text = self.exchange(Method::Post, path, Some(body), Bearer::Session).await?;
        decode(&text)
    }

    /// `POST path` without the session token.
    ///
    /// # Errors
    ///
    /// Returns the classified [`GatewayError`] for any failure.
    pub async fn post_anonymous<B, T>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        let text = self.exchange(Method::Post, path, Some(body), Bearer::Omit).await?;
        decode(&text)
    }

    async fn exchange(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        attach: Bearer,
    ) -> Result<String, GatewayError> {
        let url = self.config.endpoint(path)?;
        let bearer = match attach {
            Bearer::Session => (self.token)().filter(|token| !token.is_empty()),
            Bearer::Omit => None,
        };
        let request = ApiRequest { method, url, bearer: bearer.clone(), body };

        let response = match self.transport.dispatch(request).await {
            Ok(response) => response,
            Err(failure) => {
                leptos::logging::warn!("{} {path} failed without response: {failure:?}", method.as_str());
                return Err(failure.into());
            }
        };
        if is_success(response.status) {
            return Ok(response.body);
        }

        let err = classify_status(response.status, &response.body);
        if err == GatewayError::Unauthorized {
            self.signal_unauthorized(bearer.as_deref());
        }
        leptos::logging::warn!("{} {path} -> {}: {err}", method.as_str(), response.status);
        Err(err)
    }

    fn signal_unauthorized(&self, sent: Option<&str>) {
        let Some(sent) = sent else {
            return;
        };
        if (self.token)().as_deref() == Some(sent) {
            leptos::logging::warn!("session token rejected by server; forcing logout");
            (self.on_unauthorized)();
        }
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<String, GatewayError> {
    serde_json::to_string(body).map_err(|err| {
        leptos::logging::warn!("request body not serializable: {err}");
        GatewayError::ClientMisconfigured
    })
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, GatewayError> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|err| {
        leptos::logging::warn!("unexpected response payload: {err}");
        GatewayError::ServerFault
    })
}
