//! Outbound sharing: text blocks and share-target links.

use urlencoding::encode;

use crate::tab_data::TabInfo;

/// Slack's app_redirect target for the message composer.
const SLACK_APP_ID: &str = "A027XN5PBA3";

/// External services tabs can be shared to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    Email,
    WhatsApp,
    Slack,
    Discord,
}

/// The shareable text block: one `title: url` line per tab, blank-line
/// separated.
pub fn share_block(tabs: &[TabInfo]) -> String {
    tabs.iter()
        .map(|tab| format!("{}: {}", tab.title, tab.url))
        .collect::<Vec<String>>()
        .join("\n\n")
}

/// The clipboard block for "copy links": bare URLs, one per line.
pub fn copy_block(tabs: &[TabInfo]) -> String {
    tabs.iter()
        .map(|tab| tab.url.clone())
        .collect::<Vec<String>>()
        .join("\n")
}

impl ShareTarget {
    pub fn label(&self) -> &'static str {
        match self {
            ShareTarget::Email => "Email",
            ShareTarget::WhatsApp => "WhatsApp",
            ShareTarget::Slack => "Slack",
            ShareTarget::Discord => "Discord",
        }
    }

    /// Build the link that opens this target with the tabs pre-filled.
    ///
    /// Discord has no share URL scheme, so it returns `None` and the
    /// caller falls back to copying the block to the clipboard.
    pub fn link(&self, tabs: &[TabInfo]) -> Option<String> {
        let text = share_block(tabs);
        match self {
            ShareTarget::Email => Some(format!(
                "mailto:?subject={}&body={}",
                encode("Shared Tabs"),
                encode(&text)
            )),
            ShareTarget::WhatsApp => Some(format!("https://wa.me/?text={}", encode(&text))),
            ShareTarget::Slack => Some(format!(
                "https://slack.com/app_redirect?app={}&tab=messages&text={}",
                SLACK_APP_ID,
                encode(&text)
            )),
            ShareTarget::Discord => None,
        }
    }
}
