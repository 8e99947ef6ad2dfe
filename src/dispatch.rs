//! User-intent dispatch against the host tab/window API.
//!
//! Every action is one try-at-the-boundary: host failures come back as
//! `ActionError` for the UI to surface, nothing is retried, and partial
//! progress is never rolled back. Multi-step operations (organize, merge,
//! duplicate removal, bulk close) take a busy guard so two of them can
//! never interleave host calls.

use std::cell::Cell;
use std::fmt;

use crate::host::{HostError, TabHost};
use crate::operations::{find_duplicates, plan_merge, plan_reorder};
use crate::snapshot::Snapshot;
use crate::tab_data::TabInfo;

/// Why a user action did not complete.
#[derive(Debug)]
pub enum ActionError {
    /// A host tab/window call rejected.
    Host(HostError),
    /// Another multi-step operation is still in flight.
    Busy,
    /// A selection-dependent action was invoked with nothing selected.
    EmptySelection,
    /// Writing to the clipboard rejected.
    Clipboard(String),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Host(err) => write!(f, "{}", err),
            ActionError::Busy => write!(f, "another tab operation is still running"),
            ActionError::EmptySelection => write!(f, "no tabs selected"),
            ActionError::Clipboard(msg) => write!(f, "clipboard write failed: {}", msg),
        }
    }
}

impl std::error::Error for ActionError {}

impl From<HostError> for ActionError {
    fn from(err: HostError) -> Self {
        ActionError::Host(err)
    }
}

/// Resets the busy flag when the owning operation finishes, on success or
/// failure alike.
struct BusyGuard<'a>(&'a Cell<bool>);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Translates user intents into host calls.
///
/// The caller reloads the snapshot after every mutating action; the
/// dispatcher itself holds no tab state beyond the busy flag.
pub struct Dispatcher<H: TabHost> {
    host: H,
    busy: Cell<bool>,
}

impl<H: TabHost> Dispatcher<H> {
    pub fn new(host: H) -> Self {
        Dispatcher {
            host,
            busy: Cell::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    fn begin(&self) -> Result<BusyGuard<'_>, ActionError> {
        if self.busy.replace(true) {
            return Err(ActionError::Busy);
        }
        Ok(BusyGuard(&self.busy))
    }

    /// Full reload: current window, all windows, all tabs, in that order.
    /// Returns a fresh snapshot; the previous one only contributes the
    /// search query and the still-live part of the selection.
    pub async fn reload(&self, previous: &Snapshot) -> Result<Snapshot, ActionError> {
        let current = self.host.current_window().await?;
        let windows = self.host.query_windows().await?;
        let tabs = self.host.query_tabs(None).await?;
        log::debug!("reloaded {} tabs across {} windows", tabs.len(), windows.len());
        Ok(Snapshot::rebuild(tabs, windows, current.id, previous))
    }

    /// Jump to a tab: activate it and focus its window.
    pub async fn activate(&self, tab: &TabInfo) -> Result<(), ActionError> {
        self.host.activate_tab(tab.id).await?;
        self.host.focus_window(tab.window_id).await?;
        Ok(())
    }

    /// Close the given tabs. Returns how many were closed.
    pub async fn close_tabs(&self, tabs: &[TabInfo]) -> Result<usize, ActionError> {
        if tabs.is_empty() {
            return Err(ActionError::EmptySelection);
        }
        let _guard = self.begin()?;

        let ids: Vec<i32> = tabs.iter().map(|tab| tab.id).collect();
        log::info!("closing {} tab(s)", ids.len());
        self.host.remove_tabs(&ids).await?;
        Ok(ids.len())
    }

    /// Close every later occurrence of an already-open URL. Returns how
    /// many duplicates were closed (zero when there were none).
    pub async fn remove_duplicates(
        &self,
        tabs: &[TabInfo],
        current_window_only: bool,
        current_window_id: i32,
    ) -> Result<usize, ActionError> {
        let _guard = self.begin()?;

        let duplicates = find_duplicates(tabs, current_window_only, current_window_id);
        if duplicates.is_empty() {
            return Ok(0);
        }

        let ids: Vec<i32> = duplicates.iter().map(|tab| tab.id).collect();
        log::info!("removing {} duplicate tab(s)", ids.len());
        self.host.remove_tabs(&ids).await?;
        Ok(ids.len())
    }

    /// Reorder the current window so tabs sharing a domain sit together.
    /// Returns how many tabs were placed.
    pub async fn organize_by_domain(&self) -> Result<usize, ActionError> {
        let _guard = self.begin()?;

        let current = self.host.current_window().await?;
        let tabs = self.host.query_tabs(Some(current.id)).await?;
        let plan = plan_reorder(&tabs);

        log::info!("organizing {} tab(s) by domain in window {}", plan.len(), current.id);
        for (index, tab_id) in plan.iter().enumerate() {
            self.host.move_tab(*tab_id, None, index as i32).await?;
        }
        Ok(plan.len())
    }

    /// Move every tab outside `target_window_id` to its end, in original
    /// cross-window order. Returns how many tabs migrated.
    pub async fn merge_into(
        &self,
        tabs: &[TabInfo],
        target_window_id: i32,
    ) -> Result<usize, ActionError> {
        let _guard = self.begin()?;

        let plan = plan_merge(tabs, target_window_id);
        log::info!("merging {} tab(s) into window {}", plan.len(), target_window_id);
        for tab in &plan {
            self.host.move_tab(tab.id, Some(target_window_id), -1).await?;
        }
        Ok(plan.len())
    }
}
