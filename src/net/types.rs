//! Request and response DTOs for the certificate API.
//!
//! DESIGN
//! ======
//! Only the fields the client reasons about are typed. Everything else the
//! backend sends is kept in a flattened `extra` map so nothing is lost when a
//! record is stored and re-rendered.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Authenticated account as returned by `/auth/login` and `/auth/me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Backend user id (string or integer on the wire).
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Response of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Response of `POST /auth/register`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Generic `{ "message": ... }` acknowledgement used by the account endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /auth/forgot-password`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// Body of `POST /auth/reset-password`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordReset {
    pub token: String,
    pub new_password: String,
}

/// An issued certificate.
///
/// `id` is the merge key for the local collection; the remaining fields are
/// display data. List responses omit the PEM material, detail responses
/// include it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub domains: String,
    #[serde(default)]
    pub issue_date: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub free_expiry_date: Option<String>,
    /// `"active"` or `"expired"`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub can_renew: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Certificate {
    /// Whether the backend reported the certificate as expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.status.as_deref() == Some("expired")
    }
}

/// Body of `POST /certs`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CertificateRequest {
    /// Comma-separated domain list, e.g. `"a.com,www.a.com"`.
    pub domains: String,
}

/// An invite code owned by the signed-in user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub invite_code: String,
    /// `"pending"`, `"accepted"`, or `"expired"`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reward_points: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub accepted_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Invitation {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status.as_deref() == Some("pending")
    }
}

/// Counts over the invitations the user has issued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvitationStats {
    pub total: u32,
    pub accepted: u32,
    pub pending: u32,
    pub expired: u32,
    pub total_rewards: i64,
}

/// Body of `POST /invitation/accept`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InviteCode {
    pub invite_code: String,
}

/// Supported payment providers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Alipay,
    Wechat,
}

impl PaymentMethod {
    pub const ALL: [Self; 2] = [Self::Alipay, Self::Wechat];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alipay => "alipay",
            Self::Wechat => "wechat",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Alipay => "Alipay",
            Self::Wechat => "WeChat Pay",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.as_str() == raw)
    }
}

/// Body of `POST /payment/create`. Without `amount` the server charges its
/// default price.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaymentRequest {
    #[serde(serialize_with = "serialize_id")]
    pub cert_id: String,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// Response of `POST /payment/create`: where to send the user to pay.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PaymentLink {
    pub order_id: String,
    pub payment_url: String,
    #[serde(default)]
    pub amount: f64,
}

/// A payment order as reported by `GET /payment/order/{order_id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub order_id: String,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub cert_id: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub payment_method: Option<String>,
    /// `"pending"`, `"paid"`, `"failed"`, or `"cancelled"`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub paid_at: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PaymentOrder {
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.status.as_deref() == Some("paid")
    }

    /// Still waiting on the provider.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.status.as_deref(), None | Some("pending"))
    }
}

/// Numeric ids go back out as JSON numbers, anything else as a string.
fn serialize_id<S>(id: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id.parse::<u64>() {
        Ok(n) => serializer.serialize_u64(n),
        Err(_) => serializer.serialize_str(id),
    }
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(id) => Ok(Some(id)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!("invalid id: {other}"))),
    }
}

/// Accept ids serialized either as strings or as integers.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) if !id.is_empty() => Ok(id),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("invalid id: {other}"))),
    }
}
