//! Raw HTTP transport seam beneath the gateway.
//!
//! Browser (`csr`): real HTTP calls via `gloo-net`, raced against a
//! `gloo-timers` deadline.
//! Native builds: [`OfflineTransport`], which fails every call as
//! unreachable since the API is only meaningful from the browser.

use futures::future::LocalBoxFuture;

use super::error::GatewayError;

/// HTTP verbs used by the certificate API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// A fully resolved outbound request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Bearer token to attach, if the session has one.
    pub bearer: Option<String>,
    /// Serialized JSON body.
    pub body: Option<String>,
}

/// Status and body text of a response that arrived.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Why no response was obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportFailure {
    /// The request could not be constructed.
    Build(String),
    /// The request was sent but the network failed.
    Network(String),
    /// The overall request deadline elapsed.
    TimedOut,
}

impl From<TransportFailure> for GatewayError {
    fn from(failure: TransportFailure) -> Self {
        match failure {
            TransportFailure::Build(_) => Self::ClientMisconfigured,
            TransportFailure::Network(_) | TransportFailure::TimedOut => Self::Unreachable,
        }
    }
}

/// Something that can carry an [`ApiRequest`] to the backend.
pub trait Transport {
    fn dispatch(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<RawResponse, TransportFailure>>;
}

/// Transport for environments without `fetch`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineTransport;

impl Transport for OfflineTransport {
    fn dispatch(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<RawResponse, TransportFailure>> {
        Box::pin(async move {
            Err(TransportFailure::Network(format!(
                "{} {} is not available outside the browser",
                request.method.as_str(),
                request.url
            )))
        })
    }
}

/// Browser `fetch` transport with a per-request deadline.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug)]
pub struct BrowserTransport {
    timeout_ms: u32,
}

#[cfg(feature = "csr")]
impl BrowserTransport {
    #[must_use]
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

#[cfg(feature = "csr")]
impl Transport for BrowserTransport {
    fn dispatch(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<RawResponse, TransportFailure>> {
        use futures::future::{Either, select};

        let timeout_ms = self.timeout_ms;
        Box::pin(async move {
            let call = Box::pin(fetch(request));
            let deadline = Box::pin(gloo_timers::future::TimeoutFuture::new(timeout_ms));
            match select(call, deadline).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => Err(TransportFailure::TimedOut),
            }
        })
    }
}

#[cfg(feature = "csr")]
async fn fetch(request: ApiRequest) -> Result<RawResponse, TransportFailure> {
    use gloo_net::http::Request;

    let builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
    };
    let mut builder = builder.header("Accept", "application/json");
    if let Some(token) = &request.bearer {
        builder = builder.header("Authorization", &format!("Bearer {token}"));
    }
    let prepared = match request.body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(body)
            .map_err(|e| TransportFailure::Build(e.to_string()))?,
        None => builder.build().map_err(|e| TransportFailure::Build(e.to_string()))?,
    };
    let resp = prepared
        .send()
        .await
        .map_err(|e| TransportFailure::Network(e.to_string()))?;
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| TransportFailure::Network(e.to_string()))?;
    Ok(RawResponse { status, body })
}
