//! # client
//!
//! Leptos + WASM frontend for MiChat. Rendered on the server by the axum
//! host (`ssr` feature) and hydrated in the browser (`hydrate` feature).
//!
//! The route table, theme state and navigation panel logic live in `state`
//! and are plain Rust; `components` and `pages` bind them to Leptos views.
//! `net` talks to the access backend through the host.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point for the hydrate bundle.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger unavailable: {e}");
    }
    leptos::mount::hydrate_body(app::App);
}
