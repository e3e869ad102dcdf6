//! Route table and per-route access requirements.
//!
//! Every path resolves to exactly one [`AppRoute`], and every route declares
//! exactly one [`RouteAccess`], so the guard always has an answer.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::util::guard::RouteAccess;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const FORGOT_PASSWORD_PATH: &str = "/forgot-password";
/// Target of the emailed reset link; the token travels as `?token=`.
pub const RESET_PASSWORD_PATH: &str = "/reset-password";
/// Prefix of the emailed verification link, `/verify/{token}`.
pub const VERIFY_PATH: &str = "/verify";
pub const LANDING_PATH: &str = "/dashboard";
pub const CERTIFICATES_PATH: &str = "/certificates";
pub const CREATE_CERTIFICATE_PATH: &str = "/certificates/create";
pub const INVITATIONS_PATH: &str = "/invitations";
pub const PAYMENT_ORDERS_PATH: &str = "/payment/orders";
/// Where the payment provider sends the browser back, with `?out_trade_no=`.
pub const PAYMENT_RETURN_PATH: &str = "/payment/return";

/// A navigable view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppRoute {
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    VerifyEmail(String),
    Dashboard,
    Certificates,
    CreateCertificate,
    CertificateDetail(String),
    RenewCertificate(String),
    PayCertificate(String),
    Invitations,
    PaymentOrder(String),
    PaymentReturn,
    /// Unknown path; the router redirects it to the landing page.
    Fallback,
}

impl AppRoute {
    /// Resolve a location pathname (query and fragment are ignored).
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["forgot-password"] => Self::ForgotPassword,
            ["reset-password"] => Self::ResetPassword,
            ["verify", token] => Self::VerifyEmail((*token).to_owned()),
            ["dashboard"] => Self::Dashboard,
            ["certificates"] => Self::Certificates,
            ["certificates", "create"] => Self::CreateCertificate,
            ["certificates", id] => Self::CertificateDetail((*id).to_owned()),
            ["certificates", id, "renew"] => Self::RenewCertificate((*id).to_owned()),
            ["certificates", id, "pay"] => Self::PayCertificate((*id).to_owned()),
            ["invitations"] => Self::Invitations,
            ["payment", "return"] => Self::PaymentReturn,
            ["payment", "orders", order_id] => Self::PaymentOrder((*order_id).to_owned()),
            _ => Self::Fallback,
        }
    }

    /// Account recovery and verification links are open to everyone; a
    /// signed-in user following an emailed link must not lose its token.
    #[must_use]
    pub fn access(&self) -> RouteAccess {
        match self {
            Self::Login | Self::Register | Self::ForgotPassword => RouteAccess::GuestOnly,
            Self::ResetPassword | Self::VerifyEmail(_) | Self::Fallback => RouteAccess::Open,
            Self::Dashboard
            | Self::Certificates
            | Self::CreateCertificate
            | Self::CertificateDetail(_)
            | Self::RenewCertificate(_)
            | Self::PayCertificate(_)
            | Self::Invitations
            | Self::PaymentOrder(_)
            | Self::PaymentReturn => RouteAccess::RequiresAuth,
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => LOGIN_PATH.to_owned(),
            Self::Register => REGISTER_PATH.to_owned(),
            Self::ForgotPassword => FORGOT_PASSWORD_PATH.to_owned(),
            Self::ResetPassword => RESET_PASSWORD_PATH.to_owned(),
            Self::VerifyEmail(token) => format!("{VERIFY_PATH}/{token}"),
            Self::Dashboard | Self::Fallback => LANDING_PATH.to_owned(),
            Self::Certificates => CERTIFICATES_PATH.to_owned(),
            Self::CreateCertificate => CREATE_CERTIFICATE_PATH.to_owned(),
            Self::CertificateDetail(id) => format!("{CERTIFICATES_PATH}/{id}"),
            Self::RenewCertificate(id) => format!("{CERTIFICATES_PATH}/{id}/renew"),
            Self::PayCertificate(id) => format!("{CERTIFICATES_PATH}/{id}/pay"),
            Self::Invitations => INVITATIONS_PATH.to_owned(),
            Self::PaymentOrder(order_id) => format!("{PAYMENT_ORDERS_PATH}/{order_id}"),
            Self::PaymentReturn => PAYMENT_RETURN_PATH.to_owned(),
        }
    }
}
