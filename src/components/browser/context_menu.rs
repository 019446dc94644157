//! Right-click menu for a single entry.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::interaction::ContextMenu as MenuState;
use crate::core::MenuAction;
use crate::models::EntryKind;

stylance::import_crate_style!(css, "src/components/browser/overlay.module.css");

#[component]
pub fn ContextMenu() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let menu = Memo::new(move |_| ctx.browser.with(|b| b.ui().menu().clone()));

    let choose = move |action: MenuAction| {
        move |ev: leptos::ev::MouseEvent| {
            // handled here, not by the click-outside listener
            ev.stop_propagation();
            ctx.run(move |s| async move { s.run_menu_action(action).await });
        }
    };

    move || {
        let MenuState::Visible { target, anchor } = menu.get() else {
            return None;
        };
        let can_download = target.kind == EntryKind::File;
        Some(view! {
            <ul
                class=css::menu
                role="menu"
                data-context-menu=""
                style:left=format!("{}px", anchor.x)
                style:top=format!("{}px", anchor.y)
                on:contextmenu=|ev: leptos::ev::MouseEvent| ev.prevent_default()
            >
                <li class=css::menuHeader>{target.name}</li>
                {can_download.then(|| view! {
                    <li>
                        <button class=css::menuItem role="menuitem" on:click=choose(MenuAction::Download)>
                            <span class=css::menuIcon><Icon icon=ic::DOWNLOAD /></span>
                            "Download"
                        </button>
                    </li>
                })}
                <li>
                    <button
                        class=format!("{} {}", css::menuItem, css::danger)
                        role="menuitem"
                        on:click=choose(MenuAction::Delete)
                    >
                        <span class=css::menuIcon><Icon icon=ic::TRASH /></span>
                        "Delete"
                    </button>
                </li>
            </ul>
        })
    }
}
