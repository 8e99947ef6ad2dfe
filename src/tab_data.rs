//! Data structures mirroring the Chrome tab and window objects.

use serde::{Deserialize, Serialize};

/// A browser tab as returned by `chrome.tabs.query`.
///
/// Field names on the wire are camelCase (`windowId`, `favIconUrl`).
/// `url` and `title` default to empty strings because Chrome omits them
/// for tabs the extension has no access to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    pub window_id: i32,
    #[serde(default)]
    pub fav_icon_url: Option<String>,
}

impl TabInfo {
    pub fn new(id: i32, url: String, title: String, window_id: i32) -> TabInfo {
        TabInfo {
            id,
            url,
            title,
            window_id,
            fav_icon_url: None,
        }
    }
}

/// A browser window as returned by `chrome.windows.getAll`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowInfo {
    pub id: i32,
    #[serde(default)]
    pub focused: bool,
}
