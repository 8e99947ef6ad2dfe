//! Reusable pieces of the grouped tab list.

use yew::prelude::*;

use crate::tab_data::TabInfo;

#[derive(Properties, PartialEq)]
pub struct TabRowProps {
    pub tab: TabInfo,
    pub selected: bool,
    pub on_toggle: Callback<i32>,
    pub on_activate: Callback<TabInfo>,
    pub on_copy: Callback<TabInfo>,
    pub on_close: Callback<TabInfo>,
}

/// One tab line: selection checkbox, favicon, title, copy/close actions.
/// The whole row activates the tab; the controls stop the click from
/// bubbling into that.
#[function_component(TabRow)]
pub fn tab_row(props: &TabRowProps) -> Html {
    let row_class = if props.selected {
        "tab-row tab-row-selected"
    } else {
        "tab-row"
    };

    let on_row_click = {
        let on_activate = props.on_activate.clone();
        let tab = props.tab.clone();
        Callback::from(move |_| on_activate.emit(tab.clone()))
    };

    let on_checkbox = {
        let on_toggle = props.on_toggle.clone();
        let tab_id = props.tab.id;
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_toggle.emit(tab_id);
        })
    };

    let on_copy_click = {
        let on_copy = props.on_copy.clone();
        let tab = props.tab.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_copy.emit(tab.clone());
        })
    };

    let on_close_click = {
        let on_close = props.on_close.clone();
        let tab = props.tab.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(tab.clone());
        })
    };

    html! {
        <div class={row_class} onclick={on_row_click}>
            <input
                type="checkbox"
                class="tab-checkbox"
                checked={props.selected}
                onclick={on_checkbox}
            />
            if let Some(src) = &props.tab.fav_icon_url {
                <img class="tab-favicon" src={src.clone()} alt="" />
            } else {
                <span class="tab-favicon tab-favicon-placeholder"></span>
            }
            <span class="tab-title">{&props.tab.title}</span>
            <span class="tab-actions">
                <button class="tab-action" onclick={on_copy_click}>{"Copy"}</button>
                <button class="tab-action tab-action-close" onclick={on_close_click}>{"✕"}</button>
            </span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DomainSectionProps {
    pub domain: String,
    pub count: usize,
    pub collapsed: bool,
    pub on_toggle: Callback<()>,
    pub on_share: Callback<()>,
    pub on_close_all: Callback<()>,
    pub children: Children,
}

/// A collapsible domain bucket with share/close-all actions in its header.
#[function_component(DomainSection)]
pub fn domain_section(props: &DomainSectionProps) -> Html {
    let on_toggle = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_: MouseEvent| on_toggle.emit(()))
    };
    let on_share = {
        let on_share = props.on_share.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_share.emit(());
        })
    };
    let on_close_all = {
        let on_close_all = props.on_close_all.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close_all.emit(());
        })
    };

    html! {
        <div class="domain-section">
            <div class="domain-header">
                <button class="group-toggle" onclick={on_toggle}>
                    {if props.collapsed { "+" } else { "−" }}
                </button>
                <h3 class="domain-title">{format!("{} ({})", props.domain, props.count)}</h3>
                <span class="domain-actions">
                    <button class="domain-action" onclick={on_share}>{"Share"}</button>
                    <button class="domain-action domain-action-close" onclick={on_close_all}>{"Close All"}</button>
                </span>
            </div>
            if !props.collapsed {
                <div class="domain-content">
                    {props.children.clone()}
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct WindowSectionProps {
    pub label: String,
    pub count: usize,
    pub collapsed: bool,
    pub on_toggle: Callback<()>,
    pub children: Children,
}

/// A collapsible window card holding that window's domain sections.
#[function_component(WindowSection)]
pub fn window_section(props: &WindowSectionProps) -> Html {
    let on_toggle = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_: MouseEvent| on_toggle.emit(()))
    };

    html! {
        <div class="window-section">
            <div class="window-header">
                <button class="group-toggle" onclick={on_toggle}>
                    {if props.collapsed { "+" } else { "−" }}
                </button>
                <h2 class="window-title">
                    {&props.label}
                    <span class="window-count">{format!(" ({} tabs)", props.count)}</span>
                </h2>
            </div>
            if !props.collapsed {
                <div class="window-content">
                    {props.children.clone()}
                </div>
            }
        </div>
    }
}
