//! Session store: login, registration, logout, and rehydration.
//!
//! ERROR HANDLING
//! ==============
//! Gateway errors pass through unchanged except for two auth-specific
//! mappings: a 401 on login is `InvalidCredentials`, and a conflict on
//! registration is `AccountExists`. A failed login or rehydration always
//! leaves the session fully cleared.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::api;
use crate::net::error::GatewayError;
use crate::net::gateway::Gateway;
use crate::net::types::{Acknowledgement, Credentials, LoginResponse, NewAccount, PasswordReset, RegistrationRecord, User};
use crate::state::session::Session;

/// Failure of an auth operation, ready for display.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid username or password.")]
    InvalidCredentials,
    #[error("An account with that username or email already exists.")]
    AccountExists,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

fn login_error(err: GatewayError) -> AuthError {
    match err {
        GatewayError::Unauthorized => AuthError::InvalidCredentials,
        other => AuthError::Gateway(other),
    }
}

fn register_error(err: GatewayError) -> AuthError {
    match err {
        GatewayError::Conflict => AuthError::AccountExists,
        other => AuthError::Gateway(other),
    }
}

/// Auth actions over the shared [`Session`].
#[derive(Clone)]
pub struct SessionStore {
    session: Session,
    gateway: Gateway,
}

impl SessionStore {
    pub fn new(session: Session, gateway: Gateway) -> Self {
        Self { session, gateway }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Exchange credentials for a token and user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on a 401, otherwise the
    /// gateway error. The session is cleared on every failure.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        match api::login(&self.gateway, credentials).await {
            Ok(LoginResponse { token, user }) if !token.is_empty() => {
                self.session.set_token(Some(token));
                self.session.set_user(Some(user.clone()));
                leptos::logging::log!("signed in as {}", user.username);
                Ok(user)
            }
            Ok(_) => {
                self.session.clear();
                leptos::logging::warn!("login response carried no token");
                Err(AuthError::Gateway(GatewayError::ServerFault))
            }
            Err(err) => {
                self.session.clear();
                Err(login_error(err))
            }
        }
    }

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AccountExists`] on a conflict, otherwise the gateway
    /// error.
    pub async fn register(&self, account: &NewAccount) -> Result<RegistrationRecord, AuthError> {
        api::register(&self.gateway, account).await.map_err(register_error)
    }

    pub fn logout(&self) {
        self.session.clear();
        leptos::logging::log!("signed out");
    }

    /// Rebuild the session from the durable token slot.
    ///
    /// Returns `Ok(None)` without touching state when no token is stored.
    ///
    /// # Errors
    ///
    /// Returns the gateway error from `/auth/me`; the session (token
    /// included) is cleared first.
    pub async fn load_user(&self) -> Result<Option<User>, AuthError> {
        let Some(token) = self.session.stored_token() else {
            return Ok(None);
        };
        self.session.set_token(Some(token));
        match api::fetch_current_user(&self.gateway).await {
            Ok(user) => {
                self.session.set_user(Some(user.clone()));
                Ok(Some(user))
            }
            Err(err) => {
                self.session.clear();
                leptos::logging::warn!("session rehydration failed: {err}");
                Err(err.into())
            }
        }
    }

    /// Confirm an email address with the token from the verification mail.
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn verify_email(&self, token: &str) -> Result<Acknowledgement, AuthError> {
        Ok(api::verify_email(&self.gateway, token).await?)
    }

    /// Ask the backend to mail a password reset link.
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn request_password_reset(&self, email: &str) -> Result<Acknowledgement, AuthError> {
        Ok(api::request_password_reset(&self.gateway, email).await?)
    }

    /// Set a new password using a reset token.
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<Acknowledgement, AuthError> {
        let reset = PasswordReset { token: token.to_owned(), new_password: new_password.to_owned() };
        Ok(api::reset_password(&self.gateway, &reset).await?)
    }
}
