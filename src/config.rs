//! Client configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! Values are baked in at build time. `CERTDESK_API_BASE_URL` and
//! `CERTDESK_REQUEST_TIMEOUT_MS` override the defaults when set in the
//! environment of the `cargo leptos build` that produces the WASM bundle.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::net::error::GatewayError;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 10_000;
const DEFAULT_TOKEN_KEY: &str = "token";

/// Runtime settings shared by the gateway, session slot, and router.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend API root, without a trailing slash (e.g. `https://host/api`).
    pub api_base_url: String,
    /// Overall per-request deadline enforced by the browser transport.
    pub request_timeout_ms: u32,
    /// `localStorage` key holding the bearer token.
    pub token_key: String,
    /// Route used for unauthenticated redirects.
    pub login_path: String,
    /// Route used when a signed-in user hits a guest-only page.
    pub landing_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("CERTDESK_API_BASE_URL")
                .unwrap_or(DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_owned(),
            request_timeout_ms: parse_timeout(option_env!("CERTDESK_REQUEST_TIMEOUT_MS")),
            token_key: DEFAULT_TOKEN_KEY.to_owned(),
            login_path: crate::routes::LOGIN_PATH.to_owned(),
            landing_path: crate::routes::LANDING_PATH.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Build the absolute URL for an API `path` such as `/certs/7`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ClientMisconfigured`] when the base URL is not
    /// an absolute http(s) URL or the path is not rooted.
    pub fn endpoint(&self, path: &str) -> Result<String, GatewayError> {
        let base = self.api_base_url.trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://") || base.starts_with('/')) {
            return Err(GatewayError::ClientMisconfigured);
        }
        if !path.starts_with('/') || path.contains(char::is_whitespace) {
            return Err(GatewayError::ClientMisconfigured);
        }
        Ok(format!("{base}{path}"))
    }
}

fn parse_timeout(raw: Option<&str>) -> u32 {
    match raw.map(|value| value.trim().parse::<u32>()) {
        Some(Ok(ms)) if ms > 0 => ms,
        _ => DEFAULT_REQUEST_TIMEOUT_MS,
    }
}
