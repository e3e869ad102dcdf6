//! Networking modules for the certificate REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` carries raw requests, `gateway` injects the session token and
//! classifies responses, `error` owns the status taxonomy, `api` names the
//! endpoints, and `types` defines the wire schema.

pub mod api;
pub mod error;
pub mod gateway;
pub mod transport;
pub mod types;
