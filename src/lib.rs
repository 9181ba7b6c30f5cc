pub mod app;
pub mod components;
pub mod config;
pub mod context;
pub mod error;
pub mod gateway;
pub mod messages;
pub mod models;
pub mod pages;
pub mod router;
pub mod session;
pub mod toast;
pub mod ui;
pub mod utils;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;

    utils::panic_hook::init();
    leptos::mount_to_body(App);
}
