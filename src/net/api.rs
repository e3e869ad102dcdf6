//! Typed calls for each backend endpoint.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns the gateway's classified error unchanged; mapping to
//! auth-specific failures happens in `store::session`.
//!
//! The account endpoints (login, register, verify, password reset) are sent
//! without the session token.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::json;

use super::error::GatewayError;
use super::gateway::Gateway;
use super::types::{
    Acknowledgement, Certificate, CertificateRequest, Credentials, Invitation, InvitationStats, InviteCode,
    LoginResponse, NewAccount, PasswordReset, PasswordResetRequest, PaymentLink, PaymentOrder, PaymentRequest,
    RegistrationRecord, User,
};

pub const LOGIN_ENDPOINT: &str = "/auth/login";
pub const REGISTER_ENDPOINT: &str = "/auth/register";
pub const ME_ENDPOINT: &str = "/auth/me";
pub const FORGOT_PASSWORD_ENDPOINT: &str = "/auth/forgot-password";
pub const RESET_PASSWORD_ENDPOINT: &str = "/auth/reset-password";
pub const CERTS_ENDPOINT: &str = "/certs";
pub const CREATE_INVITATION_ENDPOINT: &str = "/invitation/create";
pub const ACCEPT_INVITATION_ENDPOINT: &str = "/invitation/accept";
pub const LIST_INVITATIONS_ENDPOINT: &str = "/invitation/list";
pub const INVITATION_STATS_ENDPOINT: &str = "/invitation/stats";
pub const CREATE_PAYMENT_ENDPOINT: &str = "/payment/create";

fn certificate_endpoint(id: &str) -> String {
    format!("{CERTS_ENDPOINT}/{}", encode_segment(id))
}

fn renew_endpoint(id: &str) -> String {
    format!("{CERTS_ENDPOINT}/{}/renew", encode_segment(id))
}

fn verify_endpoint(token: &str) -> String {
    format!("/auth/verify/{}", encode_segment(token))
}

fn order_endpoint(order_id: &str) -> String {
    format!("/payment/order/{}", encode_segment(order_id))
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

/// `POST /auth/login`.
///
/// # Errors
///
/// Returns the classified gateway error.
pub async fn login(gateway: &Gateway, credentials: &Credentials) -> Result<LoginResponse, GatewayError> {
    gateway.post_anonymous(LOGIN_ENDPOINT, credentials).await
}

/// `POST /auth/register`.
///
/// # Errors
///
/// Returns the classified gateway error.
pub async fn register(gateway: &Gateway, account: &NewAccount) -> Result<RegistrationRecord, GatewayError> {
    gateway.post_anonymous(REGISTER_ENDPOINT, account).await
}

/// `GET /auth/me`.
///
/// # Errors
///
/// Returns the classified gateway error.
pub async fn fetch_current_user(gateway: &Gateway) -> Result<User, GatewayError> {
    gateway.get(ME_ENDPOINT).await
}

/// `GET /auth/verify/{token}`.
///
/// # Errors
///
/// Returns the classified gateway error.
pub async fn verify_email(gateway: &Gateway, token: &str) -> Result<Acknowledgement, GatewayError> {
    gateway.get_anonymous(&verify_endpoint(token)).await
}

/// `POST /auth/forgot-password`.
///
/// # Errors
///
/// Returns the classified gateway error.
pub async fn request_password_reset(gateway: &Gateway, email: &str) -> Result<Acknowledgement, GatewayError> {
    let body = PasswordResetRequest { email: email.to_owned() };
    gateway.post_anonymous(FORGOT_PASSWORD_ENDPOINT, &body).await
}

/// `POST /auth/reset-password`.
///
/// # Errors
///
/// Returns the classified gateway error.
pub async fn reset_password(gateway: &Gateway, reset: &PasswordReset) -> Result<Acknowledgement, GatewayError> {
    gateway.post_anonymous(RESET_PASSWORD_ENDPOINT, reset).await
}

/// `GET /certs`, newest first as ordered by the server.
///
/// # Errors
///
/// Returns the classified gateway error.
pub async fn list_certificates(gateway: &Gateway) -> Result<Vec<Certificate>, GatewayError> {
    gateway.get(CERTS_ENDPOINT).await
}

/// `POST /certs`.
///
/// # Errors
///
/// Returns the classified gateway error.
pub async fn create_certificate(gateway: &Gateway, request: &CertificateRequest) -> Result<Certificate, GatewayError> {
    gateway.post(CERTS_ENDPOINT, request).await
}

/// `POST /certs/{id}/renew`.
///
/// # Errors
///
/// Returns the classified gateway error.
pub async fn renew_certificate(gateway: &Gateway, id: &str) -> Result<Certificate, GatewayError> {
    gateway.post(&renew_endpoint(id), &json!({})).await
}

/// `GET /certs/{id}`.
///
/// # Errors
///
/// Returns the classified gateway error.
pub async fn fetch_certificate(gateway: &Gateway, id: &str) -> Result<Certificate, GatewayError> {
    gateway.get(&certificate_endpoint(id)).await
}

/// `POST /invitation/create`.
///
/// # Errors
///
/// Returns the classified gateway error.
pub async fn create_invitation(gateway: &Gateway) -> Result<Invitation, GatewayError> {
    gateway.post(CREATE_INVITATION_ENDPOINT, &json!({})).await
}

/// `POST /invitation/accept`.
///
/// # Errors
///
/// Returns the classified gateway error.
pub async fn accept_invitation(gateway: &Gateway, invite_code: &str) -> Result<Invitation, GatewayError> {
    let body = InviteCode { invite_code: invite_code.to_owned() };
    gateway.post(ACCEPT_INVITATION_ENDPOINT, &body).await
}

/// `GET /invitation/list`, newest first.
///
/// # Errors
///
/// Returns the classified gateway error.
pub async fn list_invitations(gateway: &Gateway) -> Result<Vec<Invitation>, GatewayError> {
    gateway.get(LIST_INVITATIONS_ENDPOINT).await
}

/// `GET /invitation/stats`.
///
/// # Errors
///
/// Returns the classified gateway error.
pub async fn invitation_stats(gateway: &Gateway) -> Result<InvitationStats, GatewayError> {
    gateway.get(INVITATION_STATS_ENDPOINT).await
}

/// `POST /payment/create`.
///
/// # Errors
///
/// Returns the classified gateway error.
pub async fn create_payment(gateway: &Gateway, request: &PaymentRequest) -> Result<PaymentLink, GatewayError> {
    gateway.post(CREATE_PAYMENT_ENDPOINT, request).await
}

/// `GET /payment/order/{order_id}`.
///
/// # Errors
///
/// Returns the classified gateway error; an unknown order is `NotFound`.
pub async fn fetch_order(gateway: &Gateway, order_id: &str) -> Result<PaymentOrder, GatewayError> {
    gateway.get(&order_endpoint(order_id)).await
}
