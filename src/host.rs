//! Seam to the browser's tab/window API.
//!
//! `TabHost` is the narrow waist every action goes through: the popup uses
//! `ChromeHost` (a wasm-bindgen bridge into `chrome.tabs` /
//! `chrome.windows` via `js/host.js`), tests use an in-memory fake.

use std::fmt;

use wasm_bindgen::prelude::*;

use crate::tab_data::{TabInfo, WindowInfo};

/// A host tab/window call went wrong.
#[derive(Debug)]
pub enum HostError {
    /// The host rejected the call (tab already closed, window gone, ...).
    Call(String),
    /// The host replied with something we could not decode.
    Decode(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Call(msg) => write!(f, "host call failed: {}", msg),
            HostError::Decode(msg) => write!(f, "host reply was malformed: {}", msg),
        }
    }
}

impl std::error::Error for HostError {}

/// The host tab/window operations this extension needs.
///
/// All methods are single host calls; multi-step flows (reorder, merge)
/// are composed by the dispatcher on top of `move_tab`.
#[allow(async_fn_in_trait)]
pub trait TabHost {
    /// All open tabs, optionally restricted to one window, in the host's
    /// query order.
    async fn query_tabs(&self, window_id: Option<i32>) -> Result<Vec<TabInfo>, HostError>;

    /// All open windows.
    async fn query_windows(&self) -> Result<Vec<WindowInfo>, HostError>;

    /// The window the popup was invoked from.
    async fn current_window(&self) -> Result<WindowInfo, HostError>;

    /// Make a tab the active tab of its window.
    async fn activate_tab(&self, tab_id: i32) -> Result<(), HostError>;

    /// Bring a window to the foreground.
    async fn focus_window(&self, window_id: i32) -> Result<(), HostError>;

    /// Move a tab to `index` (-1 appends), optionally into another window.
    async fn move_tab(&self, tab_id: i32, window_id: Option<i32>, index: i32)
        -> Result<(), HostError>;

    /// Close tabs by id.
    async fn remove_tabs(&self, tab_ids: &[i32]) -> Result<(), HostError>;
}

#[wasm_bindgen(module = "/js/host.js")]
extern "C" {
    #[wasm_bindgen(catch, js_name = queryTabs)]
    async fn js_query_tabs(window_id: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = queryWindows)]
    async fn js_query_windows() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = currentWindow)]
    async fn js_current_window() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = activateTab)]
    async fn js_activate_tab(tab_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = focusWindow)]
    async fn js_focus_window(window_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = moveTab)]
    async fn js_move_tab(tab_id: i32, window_id: JsValue, index: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = removeTabs)]
    async fn js_remove_tabs(tab_ids: JsValue) -> Result<(), JsValue>;
}

fn call_error(err: JsValue) -> HostError {
    HostError::Call(format!("{:?}", err))
}

fn decode_error(err: serde_wasm_bindgen::Error) -> HostError {
    HostError::Decode(err.to_string())
}

fn optional_id(id: Option<i32>) -> JsValue {
    match id {
        Some(id) => JsValue::from(id),
        None => JsValue::NULL,
    }
}

/// The real browser, reached through the `js/host.js` bridge.
pub struct ChromeHost;

impl TabHost for ChromeHost {
    async fn query_tabs(&self, window_id: Option<i32>) -> Result<Vec<TabInfo>, HostError> {
        let reply = js_query_tabs(optional_id(window_id)).await.map_err(call_error)?;
        serde_wasm_bindgen::from_value(reply).map_err(decode_error)
    }

    async fn query_windows(&self) -> Result<Vec<WindowInfo>, HostError> {
        let reply = js_query_windows().await.map_err(call_error)?;
        serde_wasm_bindgen::from_value(reply).map_err(decode_error)
    }

    async fn current_window(&self) -> Result<WindowInfo, HostError> {
        let reply = js_current_window().await.map_err(call_error)?;
        serde_wasm_bindgen::from_value(reply).map_err(decode_error)
    }

    async fn activate_tab(&self, tab_id: i32) -> Result<(), HostError> {
        js_activate_tab(tab_id).await.map_err(call_error)
    }

    async fn focus_window(&self, window_id: i32) -> Result<(), HostError> {
        js_focus_window(window_id).await.map_err(call_error)
    }

    async fn move_tab(
        &self,
        tab_id: i32,
        window_id: Option<i32>,
        index: i32,
    ) -> Result<(), HostError> {
        js_move_tab(tab_id, optional_id(window_id), index)
            .await
            .map_err(call_error)
    }

    async fn remove_tabs(&self, tab_ids: &[i32]) -> Result<(), HostError> {
        let ids = serde_wasm_bindgen::to_value(tab_ids)
            .map_err(|e| HostError::Decode(e.to_string()))?;
        js_remove_tabs(ids).await.map_err(call_error)
    }
}
