//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Pages own form state and call into the stores on `AppContext`. They show
//! store errors through `Display` and never look at status codes.

pub mod account;
pub mod certificates;
pub mod dashboard;
pub mod invitations;
pub mod login;
pub mod payments;
pub mod register;
