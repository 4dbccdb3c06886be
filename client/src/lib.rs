//! # client
//!
//! Leptos + WASM browser client for LabDesk, the laboratory equipment
//! management system.
//!
//! This crate owns everything browser-specific: the root `App` with its
//! router and route guard, the login page and section shell, reactive auth
//! and toast state, the `gloo-net` transport backend and `localStorage`
//! persistence. Requests, envelopes, the session and the route table live in
//! `labkit`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
