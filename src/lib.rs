//! # certdesk
//!
//! Leptos + WASM client for a certificate-issuance backend.
//!
//! The crate is split into the HTTP gateway (`net`), plain state containers
//! (`state`), the stores that drive them (`store`), the navigation guard
//! (`util::guard`), and thin route-level pages (`pages`). `context` wires the
//! services together once per app.

pub mod app;
pub mod config;
pub mod context;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod store;
pub mod util;

#[cfg(test)]
pub(crate) mod test_support;

/// WASM entry point: install logging and mount the app into `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        leptos::logging::warn!("console logger unavailable: {err}");
    }
    leptos::mount::mount_to_body(app::App);
}
