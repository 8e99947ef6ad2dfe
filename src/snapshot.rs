//! In-memory snapshot of the browser's tabs, windows, and UI selection.
//!
//! The snapshot is replaced wholesale on every reload; nothing merges into
//! a stale copy. Engine functions in `operations` receive slices out of
//! this state and never read it ambiently.

use std::collections::{HashMap, HashSet};

use crate::operations::{filter_tabs, group_by_window_then_domain, window_display_name, WindowGroup};
use crate::tab_data::{TabInfo, WindowInfo};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// All open tabs, in host query order. This order is authoritative for
    /// grouping, duplicate detection, and merge planning.
    pub tabs: Vec<TabInfo>,
    pub windows: HashMap<i32, WindowInfo>,
    pub current_window_id: i32,
    /// Ids of user-selected tabs.
    pub selected: HashSet<i32>,
    /// Current search filter, lowercase-normalized.
    pub search_query: String,
}

impl Snapshot {
    /// Build a fresh snapshot from a host reload, carrying over the search
    /// query and whatever part of the previous selection still exists.
    /// Selection ids whose tabs have gone are pruned here, so stale ids
    /// never survive a reload.
    pub fn rebuild(
        tabs: Vec<TabInfo>,
        windows: Vec<WindowInfo>,
        current_window_id: i32,
        previous: &Snapshot,
    ) -> Snapshot {
        let live_ids: HashSet<i32> = tabs.iter().map(|tab| tab.id).collect();
        let selected = previous
            .selected
            .iter()
            .copied()
            .filter(|id| live_ids.contains(id))
            .collect();

        Snapshot {
            tabs,
            windows: windows.into_iter().map(|win| (win.id, win)).collect(),
            current_window_id,
            selected,
            search_query: previous.search_query.clone(),
        }
    }

    /// Store a new search query, lowercased once here so the filter itself
    /// never re-normalizes.
    pub fn set_query(&mut self, query: &str) {
        self.search_query = query.to_lowercase();
    }

    /// Tabs matching the current search query, in host order.
    pub fn filtered(&self) -> Vec<TabInfo> {
        filter_tabs(&self.tabs, &self.search_query)
    }

    /// The selected tabs, in host order.
    pub fn selected_tabs(&self) -> Vec<TabInfo> {
        self.tabs
            .iter()
            .filter(|tab| self.selected.contains(&tab.id))
            .cloned()
            .collect()
    }

    pub fn toggle_selected(&mut self, tab_id: i32) {
        if !self.selected.remove(&tab_id) {
            self.selected.insert(tab_id);
        }
    }

    /// Select every tab the current filter shows.
    pub fn select_all_matching(&mut self) {
        for tab in self.filtered() {
            self.selected.insert(tab.id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// All known window ids, ascending.
    pub fn known_window_ids(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = self.windows.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Window ids ordered for display: current first, rest ascending.
    pub fn sorted_window_ids(&self) -> Vec<i32> {
        let mut ids = self.known_window_ids();
        ids.sort_unstable_by_key(|&id| (id != self.current_window_id, id));
        ids
    }

    /// Display label for one window, numbered against the full window set.
    pub fn window_label(&self, window_id: i32) -> String {
        window_display_name(window_id, &self.known_window_ids(), self.current_window_id)
    }

    /// Tabs of one window, in host order.
    pub fn tabs_in_window(&self, window_id: i32) -> Vec<TabInfo> {
        self.tabs
            .iter()
            .filter(|tab| tab.window_id == window_id)
            .cloned()
            .collect()
    }

    /// The render-ready tree: filtered tabs grouped by window then domain.
    /// Window labels come from the full window set, not the filtered view.
    pub fn grouped(&self) -> Vec<WindowGroup> {
        group_by_window_then_domain(
            &self.filtered(),
            &self.known_window_ids(),
            self.current_window_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(id: i32, url: &str, title: &str, window_id: i32) -> TabInfo {
        TabInfo::new(id, url.to_string(), title.to_string(), window_id)
    }

    fn window(id: i32) -> WindowInfo {
        WindowInfo { id, focused: false }
    }

    fn snapshot_with(tabs: Vec<TabInfo>, window_ids: &[i32], current: i32) -> Snapshot {
        Snapshot::rebuild(
            tabs,
            window_ids.iter().map(|&id| window(id)).collect(),
            current,
            &Snapshot::default(),
        )
    }

    #[test]
    fn test_rebuild_prunes_stale_selection() {
        let mut snap = snapshot_with(
            vec![tab(1, "https://a.com", "a", 1), tab(2, "https://b.com", "b", 1)],
            &[1],
            1,
        );
        snap.toggle_selected(1);
        snap.toggle_selected(2);

        // Tab 2 disappeared between reloads
        let rebuilt = Snapshot::rebuild(
            vec![tab(1, "https://a.com", "a", 1)],
            vec![window(1)],
            1,
            &snap,
        );

        assert!(rebuilt.selected.contains(&1));
        assert!(!rebuilt.selected.contains(&2));
    }

    #[test]
    fn test_rebuild_keeps_search_query() {
        let mut snap = snapshot_with(vec![], &[1], 1);
        snap.set_query("Rust");

        let rebuilt = Snapshot::rebuild(vec![], vec![window(1)], 1, &snap);
        assert_eq!(rebuilt.search_query, "rust");
    }

    #[test]
    fn test_set_query_lowercases() {
        let mut snap = Snapshot::default();
        snap.set_query("GitHub");
        assert_eq!(snap.search_query, "github");
    }

    #[test]
    fn test_select_all_matching_respects_filter() {
        let mut snap = snapshot_with(
            vec![
                tab(1, "https://github.com", "GitHub", 1),
                tab(2, "https://google.com", "Google", 1),
            ],
            &[1],
            1,
        );
        snap.set_query("github");
        snap.select_all_matching();

        assert!(snap.selected.contains(&1));
        assert!(!snap.selected.contains(&2));
    }

    #[test]
    fn test_toggle_selected_round_trips() {
        let mut snap = snapshot_with(vec![tab(1, "https://a.com", "a", 1)], &[1], 1);
        snap.toggle_selected(1);
        assert!(snap.selected.contains(&1));
        snap.toggle_selected(1);
        assert!(!snap.selected.contains(&1));
    }

    #[test]
    fn test_sorted_window_ids_current_first() {
        let snap = snapshot_with(vec![], &[2, 5, 9], 5);
        assert_eq!(snap.sorted_window_ids(), vec![5, 2, 9]);
    }

    #[test]
    fn test_grouped_numbering_survives_filter() {
        // Window 2's tabs are filtered out, but window 5 keeps the number
        // it has in the full window set.
        let snap = {
            let mut s = snapshot_with(
                vec![
                    tab(1, "https://aaa.com", "aaa", 2),
                    tab(2, "https://bbb.com", "bbb", 5),
                ],
                &[1, 2, 5],
                1,
            );
            s.set_query("bbb");
            s
        };

        let groups = snap.grouped();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].window_id, 5);
        // Full ordering is [1 (current), 2, 5] so window 5 is #3 even
        // though it is the only one visible.
        assert_eq!(groups[0].label, "Window #3");
    }

    #[test]
    fn test_selected_tabs_in_host_order() {
        let mut snap = snapshot_with(
            vec![
                tab(3, "https://a.com", "a", 1),
                tab(1, "https://b.com", "b", 1),
                tab(2, "https://c.com", "c", 1),
            ],
            &[1],
            1,
        );
        snap.toggle_selected(2);
        snap.toggle_selected(3);

        let ids: Vec<i32> = snap.selected_tabs().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }
}
