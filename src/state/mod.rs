//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`session`, `certs`, `invitations`, `payments`)
//! so each container owns its invariants and views depend on small focused
//! models.

pub mod certs;
pub mod invitations;
pub mod payments;
pub mod session;
