//! Popup UI: search, selection, grouped tab tree, and the toolbar actions.

use std::collections::HashSet;

use patternfly_yew::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::dispatch::{ActionError, Dispatcher};
use crate::host::{ChromeHost, HostError};
use crate::share::{copy_block, share_block, ShareTarget};
use crate::snapshot::Snapshot;
use crate::tab_data::TabInfo;
use crate::ui::components::{DomainSection, TabRow, WindowSection};

/// A transient user-facing message.
#[derive(Clone, PartialEq)]
struct Notice {
    text: String,
    error: bool,
}

impl Notice {
    fn ok(text: impl Into<String>) -> Notice {
        Notice { text: text.into(), error: false }
    }

    fn err(text: impl Into<String>) -> Notice {
        Notice { text: text.into(), error: true }
    }
}

#[derive(Clone, PartialEq)]
enum Modal {
    None,
    Share(Vec<TabInfo>),
    Merge,
}

#[function_component(App)]
pub fn app() -> Html {
    let dispatcher = use_memo((), |_| Dispatcher::new(ChromeHost));
    let snapshot = use_state(Snapshot::default);
    let loading = use_state(|| true);
    let notice = use_state(|| None::<Notice>);
    let modal = use_state(|| Modal::None);
    let dup_menu_open = use_state(|| false);
    let all_collapsed = use_state(|| false);
    let collapsed_domains = use_state(HashSet::<String>::new);
    let collapsed_windows = use_state(HashSet::<i32>::new);

    // Initial load
    {
        let dispatcher = dispatcher.clone();
        let snapshot = snapshot.clone();
        let notice = notice.clone();
        let loading = loading.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                reload_snapshot(&dispatcher, &snapshot, &notice).await;
                loading.set(false);
            });
            || ()
        });
    }

    // Search input
    let on_search = {
        let snapshot = snapshot.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let mut fresh = (*snapshot).clone();
                fresh.set_query(&input.value());
                snapshot.set(fresh);
            }
        })
    };

    // Selection handlers
    let on_toggle_select = {
        let snapshot = snapshot.clone();
        Callback::from(move |tab_id: i32| {
            let mut fresh = (*snapshot).clone();
            fresh.toggle_selected(tab_id);
            snapshot.set(fresh);
        })
    };

    let on_select_all = {
        let snapshot = snapshot.clone();
        Callback::from(move |_: MouseEvent| {
            let mut fresh = (*snapshot).clone();
            fresh.select_all_matching();
            snapshot.set(fresh);
        })
    };

    let on_clear_selection = {
        let snapshot = snapshot.clone();
        Callback::from(move |_: MouseEvent| {
            let mut fresh = (*snapshot).clone();
            fresh.clear_selection();
            snapshot.set(fresh);
        })
    };

    // Jump to a tab
    let on_activate = {
        let dispatcher = dispatcher.clone();
        let notice = notice.clone();
        Callback::from(move |tab: TabInfo| {
            let dispatcher = dispatcher.clone();
            let notice = notice.clone();
            spawn_local(async move {
                if let Err(err) = dispatcher.activate(&tab).await {
                    log::warn!("activate failed: {}", err);
                    notice.set(Some(Notice::err("Failed to switch tab")));
                }
            });
        })
    };

    // Copy a single tab's URL
    let on_copy_tab = {
        let notice = notice.clone();
        Callback::from(move |tab: TabInfo| {
            let notice = notice.clone();
            spawn_local(async move {
                match copy_to_clipboard(&copy_block(&[tab])).await {
                    Ok(()) => notice.set(Some(Notice::ok("Links copied!"))),
                    Err(err) => {
                        log::warn!("{}", err);
                        notice.set(Some(Notice::err("Failed to copy links")));
                    }
                }
            });
        })
    };

    // Close an arbitrary batch of tabs, then reload
    let close_tabs = {
        let dispatcher = dispatcher.clone();
        let snapshot = snapshot.clone();
        let notice = notice.clone();
        let loading = loading.clone();
        move |tabs: Vec<TabInfo>| {
            let dispatcher = dispatcher.clone();
            let snapshot = snapshot.clone();
            let notice = notice.clone();
            let loading = loading.clone();
            loading.set(true);
            spawn_local(async move {
                match dispatcher.close_tabs(&tabs).await {
                    Ok(_) => {
                        notice.set(Some(Notice::ok("Tabs closed successfully")));
                        reload_snapshot(&dispatcher, &snapshot, &notice).await;
                    }
                    Err(err) => {
                        log::warn!("close failed: {}", err);
                        notice.set(Some(Notice::err(err.to_string())));
                    }
                }
                loading.set(false);
            });
        }
    };

    let on_close_tab = {
        let close_tabs = close_tabs.clone();
        Callback::from(move |tab: TabInfo| close_tabs(vec![tab]))
    };

    let on_close_selected = {
        let close_tabs = close_tabs.clone();
        let snapshot = snapshot.clone();
        Callback::from(move |_: MouseEvent| close_tabs(snapshot.selected_tabs()))
    };

    let on_copy_selected = {
        let snapshot = snapshot.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| {
            let selected = snapshot.selected_tabs();
            if selected.is_empty() {
                notice.set(Some(Notice::err(ActionError::EmptySelection.to_string())));
                return;
            }
            let notice = notice.clone();
            spawn_local(async move {
                match copy_to_clipboard(&copy_block(&selected)).await {
                    Ok(()) => notice.set(Some(Notice::ok("Links copied!"))),
                    Err(err) => {
                        log::warn!("{}", err);
                        notice.set(Some(Notice::err("Failed to copy links")));
                    }
                }
            });
        })
    };

    let on_share_selected = {
        let snapshot = snapshot.clone();
        let notice = notice.clone();
        let modal = modal.clone();
        Callback::from(move |_: MouseEvent| {
            let selected = snapshot.selected_tabs();
            if selected.is_empty() {
                notice.set(Some(Notice::err("No tabs to share")));
                return;
            }
            modal.set(Modal::Share(selected));
        })
    };

    // Organize the current window by domain
    let on_organize = {
        let dispatcher = dispatcher.clone();
        let snapshot = snapshot.clone();
        let notice = notice.clone();
        let loading = loading.clone();
        Callback::from(move |_: MouseEvent| {
            let dispatcher = dispatcher.clone();
            let snapshot = snapshot.clone();
            let notice = notice.clone();
            let loading = loading.clone();
            loading.set(true);
            spawn_local(async move {
                match dispatcher.organize_by_domain().await {
                    Ok(_) => {
                        notice.set(Some(Notice::ok("Tabs organized by domain")));
                        reload_snapshot(&dispatcher, &snapshot, &notice).await;
                    }
                    Err(err) => {
                        log::warn!("organize failed: {}", err);
                        notice.set(Some(Notice::err("Failed to organize tabs")));
                    }
                }
                loading.set(false);
            });
        })
    };

    // Duplicate removal, scoped to the current window or all windows
    let make_dedup = {
        let dispatcher = dispatcher.clone();
        let snapshot = snapshot.clone();
        let notice = notice.clone();
        let loading = loading.clone();
        let dup_menu_open = dup_menu_open.clone();
        move |current_only: bool| {
            let dispatcher = dispatcher.clone();
            let snapshot = snapshot.clone();
            let notice = notice.clone();
            let loading = loading.clone();
            let dup_menu_open = dup_menu_open.clone();
            Callback::from(move |_: MouseEvent| {
                let dispatcher = dispatcher.clone();
                let snapshot = snapshot.clone();
                let notice = notice.clone();
                let loading = loading.clone();
                dup_menu_open.set(false);
                loading.set(true);
                spawn_local(async move {
                    let tabs = snapshot.tabs.clone();
                    let current = snapshot.current_window_id;
                    match dispatcher.remove_duplicates(&tabs, current_only, current).await {
                        Ok(0) => notice.set(Some(Notice::ok("No duplicate tabs found"))),
                        Ok(count) => {
                            notice.set(Some(Notice::ok(format!(
                                "Removed {} duplicate tab(s)",
                                count
                            ))));
                            reload_snapshot(&dispatcher, &snapshot, &notice).await;
                        }
                        Err(err) => {
                            log::warn!("dedup failed: {}", err);
                            notice.set(Some(Notice::err("Failed to remove duplicates")));
                        }
                    }
                    loading.set(false);
                });
            })
        }
    };

    let on_dup_menu_toggle = {
        let dup_menu_open = dup_menu_open.clone();
        Callback::from(move |_: MouseEvent| dup_menu_open.set(!*dup_menu_open))
    };

    // Merge windows
    let on_merge_open = {
        let modal = modal.clone();
        Callback::from(move |_: MouseEvent| modal.set(Modal::Merge))
    };

    let on_merge_into = {
        let dispatcher = dispatcher.clone();
        let snapshot = snapshot.clone();
        let notice = notice.clone();
        let loading = loading.clone();
        let modal = modal.clone();
        Callback::from(move |target_window_id: i32| {
            let dispatcher = dispatcher.clone();
            let snapshot = snapshot.clone();
            let notice = notice.clone();
            let loading = loading.clone();
            modal.set(Modal::None);
            loading.set(true);
            spawn_local(async move {
                let tabs = snapshot.tabs.clone();
                match dispatcher.merge_into(&tabs, target_window_id).await {
                    Ok(_) => {
                        notice.set(Some(Notice::ok("Windows merged successfully")));
                        reload_snapshot(&dispatcher, &snapshot, &notice).await;
                    }
                    Err(err) => {
                        log::warn!("merge failed: {}", err);
                        notice.set(Some(Notice::err("Failed to merge windows")));
                    }
                }
                loading.set(false);
            });
        })
    };

    // Share modal: one button per target
    let make_share_button = {
        let modal = modal.clone();
        let notice = notice.clone();
        move |target: ShareTarget, tabs: Vec<TabInfo>| {
            let modal = modal.clone();
            let notice = notice.clone();
            Callback::from(move |_: MouseEvent| {
                let tabs = tabs.clone();
                let modal = modal.clone();
                let notice = notice.clone();
                match target.link(&tabs) {
                    Some(url) => {
                        modal.set(Modal::None);
                        match open_external(&url) {
                            Ok(()) => notice.set(Some(Notice::ok(format!(
                                "Opening {}...",
                                target.label()
                            )))),
                            Err(err) => {
                                log::warn!("share failed: {}", err);
                                notice.set(Some(Notice::err("Failed to open share target")));
                            }
                        }
                    }
                    // No share URL scheme; copy the block instead
                    None => spawn_local(async move {
                        match copy_to_clipboard(&share_block(&tabs)).await {
                            Ok(()) => {
                                modal.set(Modal::None);
                                notice.set(Some(Notice::ok(
                                    "Links copied for Discord! Paste them in Discord.",
                                )));
                            }
                            Err(err) => {
                                log::warn!("{}", err);
                                notice.set(Some(Notice::err("Failed to copy links")));
                            }
                        }
                    }),
                }
            })
        }
    };

    let on_modal_close = {
        let modal = modal.clone();
        Callback::from(move |_: MouseEvent| modal.set(Modal::None))
    };

    let on_dismiss_notice = {
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| notice.set(None))
    };

    // Collapse handling: the global flag flips everything, individual
    // toggles are tracked as exceptions to it.
    let on_toggle_all = {
        let all_collapsed = all_collapsed.clone();
        let collapsed_domains = collapsed_domains.clone();
        Callback::from(move |_: MouseEvent| {
            all_collapsed.set(!*all_collapsed);
            collapsed_domains.set(HashSet::new());
        })
    };

    let is_busy = *loading;
    let groups = snapshot.grouped();
    let visible_count: usize = groups.iter().map(|w| w.tab_count()).sum();
    let selected_count = snapshot.selected.len();

    html! {
        <div class="popup">
            <h1 class="popup-title">{"Tab Organizer"}</h1>

            if let Some(current) = (*notice).clone() {
                <div class="notice-row">
                    <Alert
                        r#type={if current.error { AlertType::Danger } else { AlertType::Success }}
                        title={current.text.clone()}
                        inline={true}
                    >
                    </Alert>
                    <button class="notice-dismiss" onclick={on_dismiss_notice}>{"✕"}</button>
                </div>
            }

            <input
                class="search-input"
                type="text"
                placeholder="Search tabs by title or URL..."
                oninput={on_search}
            />

            if selected_count > 0 {
                <div class="selection-bar">
                    <span class="selection-count">
                        {format!("{} tab{} selected", selected_count, if selected_count == 1 { "" } else { "s" })}
                    </span>
                    <button class="selection-action" onclick={on_copy_selected}>{"Copy"}</button>
                    <button class="selection-action" onclick={on_share_selected}>{"Share"}</button>
                    <button class="selection-action selection-action-close" onclick={on_close_selected}>
                        {"Close Selected"}
                    </button>
                    <button class="selection-action" onclick={on_clear_selection}>{"Clear"}</button>
                </div>
            }

            <div class="toolbar">
                <Button onclick={on_select_all} disabled={is_busy} variant={ButtonVariant::Secondary}>
                    {"Select All"}
                </Button>
                <Button onclick={on_organize} disabled={is_busy} variant={ButtonVariant::Secondary}>
                    {"Organize by Domain"}
                </Button>
                <Button onclick={on_merge_open} disabled={is_busy} variant={ButtonVariant::Secondary}>
                    {"Merge Windows"}
                </Button>
                <Button onclick={on_dup_menu_toggle} disabled={is_busy} variant={ButtonVariant::Secondary}>
                    {"Remove Duplicates"}
                </Button>
                <Button onclick={on_toggle_all} variant={ButtonVariant::Secondary}>
                    {if *all_collapsed { "Expand All" } else { "Collapse All" }}
                </Button>
            </div>

            if *dup_menu_open {
                <div class="dup-menu">
                    <Button onclick={make_dedup(true)} variant={ButtonVariant::Secondary} block={true}>
                        {"In this window"}
                    </Button>
                    <Button onclick={make_dedup(false)} variant={ButtonVariant::Secondary} block={true}>
                        {"Across all windows"}
                    </Button>
                </div>
            }

            if is_busy {
                <div class="loading">
                    <Spinner />
                </div>
            }

            <div class="tabs-container">
                {for groups.iter().map(|window_group| {
                    let window_id = window_group.window_id;
                    let window_collapsed = collapsed_windows.contains(&window_id);
                    let on_toggle_window = {
                        let collapsed_windows = collapsed_windows.clone();
                        Callback::from(move |_| {
                            let mut set = (*collapsed_windows).clone();
                            if !set.remove(&window_id) {
                                set.insert(window_id);
                            }
                            collapsed_windows.set(set);
                        })
                    };

                    html! {
                        <WindowSection
                            key={window_id}
                            label={window_group.label.clone()}
                            count={window_group.tab_count()}
                            collapsed={window_collapsed}
                            on_toggle={on_toggle_window}
                        >
                            {for window_group.domains.iter().map(|domain_group| {
                                let domain_key = format!("{}:{}", window_id, domain_group.domain);
                                let collapsed = *all_collapsed != collapsed_domains.contains(&domain_key);
                                let on_toggle_domain = {
                                    let collapsed_domains = collapsed_domains.clone();
                                    let domain_key = domain_key.clone();
                                    Callback::from(move |_| {
                                        let mut set = (*collapsed_domains).clone();
                                        if !set.remove(&domain_key) {
                                            set.insert(domain_key.clone());
                                        }
                                        collapsed_domains.set(set);
                                    })
                                };
                                let on_share_domain = {
                                    let modal = modal.clone();
                                    let tabs = domain_group.tabs.clone();
                                    Callback::from(move |_| modal.set(Modal::Share(tabs.clone())))
                                };
                                let on_close_domain = {
                                    let close_tabs = close_tabs.clone();
                                    let tabs = domain_group.tabs.clone();
                                    Callback::from(move |_| close_tabs(tabs.clone()))
                                };

                                html! {
                                    <DomainSection
                                        key={domain_key.clone()}
                                        domain={domain_group.domain.clone()}
                                        count={domain_group.tabs.len()}
                                        collapsed={collapsed}
                                        on_toggle={on_toggle_domain}
                                        on_share={on_share_domain}
                                        on_close_all={on_close_domain}
                                    >
                                        {for domain_group.tabs.iter().map(|tab| html! {
                                            <TabRow
                                                key={tab.id}
                                                tab={tab.clone()}
                                                selected={snapshot.selected.contains(&tab.id)}
                                                on_toggle={on_toggle_select.clone()}
                                                on_activate={on_activate.clone()}
                                                on_copy={on_copy_tab.clone()}
                                                on_close={on_close_tab.clone()}
                                            />
                                        })}
                                    </DomainSection>
                                }
                            })}
                        </WindowSection>
                    }
                })}

                if visible_count == 0 && !is_busy {
                    <p class="empty-message">
                        {if snapshot.search_query.is_empty() {
                            "No tabs found"
                        } else {
                            "No tabs match your search"
                        }}
                    </p>
                }
            </div>

            {match (*modal).clone() {
                Modal::Share(tabs) => html! {
                    <div class="modal-backdrop">
                        <div class="modal">
                            <div class="modal-header">
                                <h2>{format!("Share {} tab(s)", tabs.len())}</h2>
                                <button class="modal-close" onclick={on_modal_close.clone()}>{"✕"}</button>
                            </div>
                            <div class="modal-body">
                                {for [
                                    ShareTarget::Email,
                                    ShareTarget::WhatsApp,
                                    ShareTarget::Slack,
                                    ShareTarget::Discord,
                                ].into_iter().map(|target| html! {
                                    <Button
                                        onclick={make_share_button(target, tabs.clone())}
                                        variant={ButtonVariant::Secondary}
                                        block={true}
                                    >
                                        {target.label()}
                                    </Button>
                                })}
                            </div>
                        </div>
                    </div>
                },
                Modal::Merge => html! {
                    <div class="modal-backdrop">
                        <div class="modal">
                            <div class="modal-header">
                                <h2>{"Merge all tabs into..."}</h2>
                                <button class="modal-close" onclick={on_modal_close.clone()}>{"✕"}</button>
                            </div>
                            <div class="modal-body">
                                {for snapshot.sorted_window_ids().into_iter().map(|window_id| {
                                    let onclick = {
                                        let on_merge_into = on_merge_into.clone();
                                        Callback::from(move |_: MouseEvent| on_merge_into.emit(window_id))
                                    };
                                    html! {
                                        <Button onclick={onclick} variant={ButtonVariant::Secondary} block={true}>
                                            {format!(
                                                "{} — {} tabs",
                                                snapshot.window_label(window_id),
                                                snapshot.tabs_in_window(window_id).len()
                                            )}
                                        </Button>
                                    }
                                })}
                            </div>
                        </div>
                    </div>
                },
                Modal::None => html! {},
            }}

            <p class="popup-footer">{"Tab Organizer v0.1.0"}</p>
        </div>
    }
}

// Helper functions

/// Replace the snapshot with a fresh host reload; on failure keep the old
/// snapshot and surface the error.
async fn reload_snapshot(
    dispatcher: &Dispatcher<ChromeHost>,
    snapshot: &UseStateHandle<Snapshot>,
    notice: &UseStateHandle<Option<Notice>>,
) {
    match dispatcher.reload(snapshot).await {
        Ok(fresh) => snapshot.set(fresh),
        Err(err) => {
            log::warn!("reload failed: {}", err);
            notice.set(Some(Notice::err("Failed to load tabs")));
        }
    }
}

async fn copy_to_clipboard(text: &str) -> Result<(), ActionError> {
    let window = web_sys::window()
        .ok_or_else(|| ActionError::Clipboard("no window object".to_string()))?;
    JsFuture::from(window.navigator().clipboard().write_text(text))
        .await
        .map_err(|err| ActionError::Clipboard(format!("{:?}", err)))?;
    Ok(())
}

fn open_external(url: &str) -> Result<(), ActionError> {
    let window = web_sys::window()
        .ok_or_else(|| ActionError::Host(HostError::Call("no window object".to_string())))?;
    window
        .open_with_url(url)
        .map_err(|err| ActionError::Host(HostError::Call(format!("{:?}", err))))?;
    Ok(())
}
