//! Tab Organizer - Chrome Extension for organizing open tabs
//! Built with Rust + WASM + Yew

pub mod dispatch;
pub mod domain;
pub mod host;
pub mod operations;
pub mod share;
pub mod snapshot;
pub mod tab_data;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the grouping key extractor for JavaScript access
#[wasm_bindgen]
pub fn domain_of(url: &str) -> String {
    domain::domain_of(url)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
