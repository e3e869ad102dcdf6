//! Async actions that synchronize local state with the backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views call these; they call `net::api` through the shared gateway and
//! apply the results to the containers in `state`.

pub mod certs;
pub mod invitations;
pub mod payments;
pub mod session;
