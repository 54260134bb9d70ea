//! Weekmonth Web – Leptos components for the week/month date picker.

pub mod app;
pub mod components;

/// Entry-point called from the WASM bundle to mount the demo app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
