//! Tab organization engine: search filtering, window/domain grouping,
//! duplicate detection, and reorder/merge planning.
//!
//! Everything here is a pure function over `TabInfo` slices. Callers own
//! the state; nothing reads ambient globals or talks to the browser.

use std::collections::{HashMap, HashSet};

use crate::domain::domain_of;
use crate::tab_data::TabInfo;

/// Tabs sharing one domain inside one window, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainGroup {
    pub domain: String,
    pub tabs: Vec<TabInfo>,
}

/// One window's worth of grouped tabs, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowGroup {
    pub window_id: i32,
    pub label: String,
    pub domains: Vec<DomainGroup>,
}

impl WindowGroup {
    pub fn tab_count(&self) -> usize {
        self.domains.iter().map(|group| group.tabs.len()).sum()
    }
}

/// Stable substring filter over lowercased title or URL.
///
/// `query` must already be lowercased (the snapshot normalizes it once per
/// input event). The empty query matches every tab. Input order is
/// preserved.
pub fn filter_tabs(tabs: &[TabInfo], query: &str) -> Vec<TabInfo> {
    tabs.iter()
        .filter(|tab| {
            tab.title.to_lowercase().contains(query) || tab.url.to_lowercase().contains(query)
        })
        .cloned()
        .collect()
}

/// User-facing name for a window.
///
/// The current window is always "Window #1 (Current)". Every other window
/// is numbered by its position in the current-first-then-ascending
/// ordering of ALL known window ids — not just the windows that survive
/// the active search filter. Numbering therefore stays stable while the
/// user types.
pub fn window_display_name(window_id: i32, all_window_ids: &[i32], current_window_id: i32) -> String {
    if window_id == current_window_id {
        return "Window #1 (Current)".to_string();
    }

    let mut ordered: Vec<i32> = all_window_ids.to_vec();
    ordered.sort_unstable_by_key(|&id| (id != current_window_id, id));

    match ordered.iter().position(|&id| id == window_id) {
        Some(index) => format!("Window #{}", index + 1),
        // A window the snapshot has no record of; label by raw id.
        None => format!("Window #{}", window_id),
    }
}

/// Partition tabs by window, then by domain within each window.
///
/// Window buckets are ordered current-first, then ascending by id. Domains
/// and tabs keep first-seen order — stable bucketing, not a sort. Every
/// input tab lands in exactly one leaf bucket.
pub fn group_by_window_then_domain(
    tabs: &[TabInfo],
    all_window_ids: &[i32],
    current_window_id: i32,
) -> Vec<WindowGroup> {
    let mut window_order: Vec<i32> = Vec::new();
    let mut window_buckets: HashMap<i32, Vec<TabInfo>> = HashMap::new();

    for tab in tabs {
        if !window_buckets.contains_key(&tab.window_id) {
            window_order.push(tab.window_id);
        }
        window_buckets.entry(tab.window_id).or_default().push(tab.clone());
    }

    window_order.sort_unstable_by_key(|&id| (id != current_window_id, id));

    window_order
        .into_iter()
        .map(|window_id| {
            let bucket = window_buckets.remove(&window_id).unwrap_or_default();
            WindowGroup {
                window_id,
                label: window_display_name(window_id, all_window_ids, current_window_id),
                domains: group_by_domain(&bucket),
            }
        })
        .collect()
}

/// Bucket one window's tabs by domain, preserving first-seen order of both
/// domains and tabs.
fn group_by_domain(tabs: &[TabInfo]) -> Vec<DomainGroup> {
    let mut domain_order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<TabInfo>> = HashMap::new();

    for tab in tabs {
        let domain = domain_of(&tab.url);
        if !buckets.contains_key(&domain) {
            domain_order.push(domain.clone());
        }
        buckets.entry(domain).or_default().push(tab.clone());
    }

    domain_order
        .into_iter()
        .map(|domain| {
            let tabs = buckets.remove(&domain).unwrap_or_default();
            DomainGroup { domain, tabs }
        })
        .collect()
}

/// Scan tabs in input order and return every later occurrence of an
/// already-seen URL — the tabs to close, first occurrence kept.
///
/// URL equality is the whole identity key; differing titles or windows do
/// not make two tabs distinct. With `current_window_only` the scan is
/// restricted to tabs of `current_window_id` first.
pub fn find_duplicates(
    tabs: &[TabInfo],
    current_window_only: bool,
    current_window_id: i32,
) -> Vec<TabInfo> {
    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut duplicates = Vec::new();

    for tab in tabs {
        if current_window_only && tab.window_id != current_window_id {
            continue;
        }
        if seen_urls.contains(&tab.url) {
            duplicates.push(tab.clone());
        } else {
            seen_urls.insert(tab.url.clone());
        }
    }

    duplicates
}

/// Target tab order for organizing one window by domain: tabs sharing a
/// domain become contiguous, domains ordered by first appearance, original
/// order kept within a domain.
///
/// The dispatcher applies this by moving the i-th id to index i. Each move
/// re-shifts the tabs behind it, but applying the moves in plan order
/// still converges on exactly this sequence.
pub fn plan_reorder(tabs_in_window: &[TabInfo]) -> Vec<i32> {
    group_by_domain(tabs_in_window)
        .into_iter()
        .flat_map(|group| group.tabs.into_iter().map(|tab| tab.id))
        .collect()
}

/// Every tab outside `target_window_id`, in original cross-window order.
///
/// The dispatcher appends each to the target window in this order, so the
/// target keeps its own tabs' relative order and migrated tabs interleave
/// exactly as the host reported them — not regrouped by source window.
pub fn plan_merge(tabs: &[TabInfo], target_window_id: i32) -> Vec<TabInfo> {
    tabs.iter()
        .filter(|tab| tab.window_id != target_window_id)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(id: i32, url: &str, title: &str, window_id: i32) -> TabInfo {
        TabInfo::new(id, url.to_string(), title.to_string(), window_id)
    }

    #[test]
    fn test_filter_empty_query_is_identity() {
        let tabs = vec![
            tab(1, "https://github.com/rust", "GitHub Rust", 1),
            tab(2, "https://www.google.com", "Google", 1),
        ];

        assert_eq!(filter_tabs(&tabs, ""), tabs);
    }

    #[test]
    fn test_filter_matches_title_or_url() {
        let tabs = vec![
            tab(1, "https://github.com/rust", "Rust repo", 1),
            tab(2, "https://www.google.com", "Search", 1),
            tab(3, "https://docs.rs", "Rust docs", 1),
        ];

        let hits = filter_tabs(&tabs, "rust");
        let ids: Vec<i32> = hits.iter().map(|t| t.id).collect();
        // id 1 matches both fields, id 3 matches title only; order preserved
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let tabs = vec![
            tab(1, "https://github.com", "GitHub", 1),
            tab(2, "https://www.google.com", "Google", 1),
            tab(3, "https://gitlab.com", "GitLab", 2),
        ];

        let once = filter_tabs(&tabs, "git");
        let twice = filter_tabs(&once, "git");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_window_display_name_current_is_one() {
        // Current window is #1 no matter how large its id is
        assert_eq!(window_display_name(900, &[3, 7, 900], 900), "Window #1 (Current)");
    }

    #[test]
    fn test_window_display_name_others_numbered_after_current() {
        let all = vec![3, 7, 900];
        assert_eq!(window_display_name(3, &all, 900), "Window #2");
        assert_eq!(window_display_name(7, &all, 900), "Window #3");
    }

    #[test]
    fn test_window_display_name_uses_full_window_set() {
        // Window 7's number comes from the full known-window list, so it
        // keeps its number even when a filter hides window 3's tabs.
        let all = vec![3, 7, 10];
        assert_eq!(window_display_name(7, &all, 10), "Window #3");
    }

    #[test]
    fn test_grouping_loses_nothing() {
        let tabs = vec![
            tab(1, "https://github.com/a", "a", 2),
            tab(2, "https://www.google.com", "g", 1),
            tab(3, "https://github.com/b", "b", 1),
            tab(4, "not a url", "junk", 2),
        ];

        let groups = group_by_window_then_domain(&tabs, &[1, 2], 1);

        let mut seen: Vec<i32> = groups
            .iter()
            .flat_map(|w| w.domains.iter())
            .flat_map(|d| d.tabs.iter().map(|t| t.id))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_grouping_current_window_first() {
        let tabs = vec![
            tab(1, "https://a.com", "a", 5),
            tab(2, "https://b.com", "b", 9),
            tab(3, "https://c.com", "c", 2),
        ];

        let groups = group_by_window_then_domain(&tabs, &[2, 5, 9], 9);
        let order: Vec<i32> = groups.iter().map(|w| w.window_id).collect();
        assert_eq!(order, vec![9, 2, 5]);
        assert_eq!(groups[0].label, "Window #1 (Current)");
    }

    #[test]
    fn test_grouping_domains_in_first_seen_order() {
        let tabs = vec![
            tab(1, "https://z.example", "z1", 1),
            tab(2, "https://a.example", "a1", 1),
            tab(3, "https://z.example/two", "z2", 1),
        ];

        let groups = group_by_window_then_domain(&tabs, &[1], 1);
        let domains: Vec<&str> = groups[0].domains.iter().map(|d| d.domain.as_str()).collect();
        // z.example appeared first; no alphabetical re-sort
        assert_eq!(domains, vec!["z.example", "a.example"]);

        let z_ids: Vec<i32> = groups[0].domains[0].tabs.iter().map(|t| t.id).collect();
        assert_eq!(z_ids, vec![1, 3]);
    }

    #[test]
    fn test_grouping_unparseable_urls_share_other_bucket() {
        let tabs = vec![
            tab(1, "about:blank", "blank", 1),
            tab(2, "garbage", "junk", 1),
        ];

        let groups = group_by_window_then_domain(&tabs, &[1], 1);
        assert_eq!(groups[0].domains.len(), 1);
        assert_eq!(groups[0].domains[0].domain, "other");
        assert_eq!(groups[0].tab_count(), 2);
    }

    #[test]
    fn test_find_duplicates_keeps_first_occurrence() {
        let tabs = vec![
            tab(1, "https://x.com", "A", 1),
            tab(2, "https://y.com", "B", 1),
            tab(3, "https://x.com", "C", 1),
        ];

        let dups = find_duplicates(&tabs, false, 1);
        let ids: Vec<i32> = dups.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_find_duplicates_all_unique_is_empty() {
        let tabs = vec![
            tab(1, "https://x.com", "A", 1),
            tab(2, "https://y.com", "B", 2),
        ];

        assert!(find_duplicates(&tabs, false, 1).is_empty());
    }

    #[test]
    fn test_find_duplicates_url_is_whole_identity() {
        // Same URL, different titles and windows: still duplicates
        let tabs = vec![
            tab(1, "https://x.com", "First", 1),
            tab(2, "https://x.com", "Second", 2),
            tab(3, "https://x.com", "Third", 1),
        ];

        let dups = find_duplicates(&tabs, false, 1);
        let ids: Vec<i32> = dups.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_find_duplicates_scoped_to_current_window() {
        let tabs = vec![
            tab(1, "https://x.com", "A", 1),
            tab(2, "https://x.com", "B", 2),
            tab(3, "https://x.com", "C", 1),
        ];

        let dups = find_duplicates(&tabs, true, 1);
        assert!(dups.iter().all(|t| t.window_id == 1));
        let ids: Vec<i32> = dups.iter().map(|t| t.id).collect();
        // Window 2's copy is out of scope; it neither counts as a
        // duplicate nor as a first occurrence.
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_plan_reorder_groups_by_first_appearance() {
        let tabs = vec![
            tab(10, "https://x.com/a", "a", 1),
            tab(11, "https://y.com/b", "b", 1),
            tab(12, "https://x.com/c", "c", 1),
        ];

        assert_eq!(plan_reorder(&tabs), vec![10, 12, 11]);
    }

    #[test]
    fn test_plan_reorder_already_grouped_is_identity() {
        let tabs = vec![
            tab(1, "https://x.com/a", "a", 1),
            tab(2, "https://x.com/b", "b", 1),
            tab(3, "https://y.com/c", "c", 1),
        ];

        assert_eq!(plan_reorder(&tabs), vec![1, 2, 3]);
    }

    #[test]
    fn test_plan_merge_keeps_cross_window_order() {
        let tabs = vec![
            tab(1, "https://a.com", "t1", 1),
            tab(2, "https://b.com", "t2", 2),
            tab(3, "https://c.com", "t3", 1),
            tab(4, "https://d.com", "t4", 2),
        ];

        let plan = plan_merge(&tabs, 1);
        let ids: Vec<i32> = plan.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn test_plan_merge_nothing_to_move() {
        let tabs = vec![tab(1, "https://a.com", "t1", 1)];
        assert!(plan_merge(&tabs, 1).is_empty());
    }
}
