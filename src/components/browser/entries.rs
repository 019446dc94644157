//! Folder and file tiles for the current listing.

use icondata::Icon as IconData;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::ListingView;
use crate::core::zoom_pan::Point;
use crate::models::{EntryKind, is_image_name};

stylance::import_crate_style!(css, "src/components/browser/entries.module.css");

fn icon_for(name: &str, kind: EntryKind) -> IconData {
    match kind {
        EntryKind::Folder => ic::FOLDER,
        EntryKind::File if is_image_name(name) => ic::FILE_IMAGE,
        EntryKind::File => ic::FILE,
    }
}

#[component]
pub fn EntryGrid() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let view_state = Memo::new(move |_| ctx.browser.with(|b| b.view().clone()));

    move || match view_state.get() {
        ListingView::Loading => view! {
            <p class=css::placeholder>"Loading…"</p>
        }
        .into_any(),
        ListingView::Failed(message) => view! {
            <div class=css::failed role="alert">
                <p>{message}</p>
                <button
                    class=css::retry
                    on:click=move |_| ctx.run(|s| async move { s.reload().await })
                >
                    "Retry"
                </button>
            </div>
        }
        .into_any(),
        ListingView::Ready(listing) if listing.is_empty() => view! {
            <p class=css::placeholder>"This folder is empty"</p>
        }
        .into_any(),
        ListingView::Ready(listing) => {
            let folders = listing
                .folders
                .into_iter()
                .map(|name| view! { <EntryTile name=name kind=EntryKind::Folder /> })
                .collect_view();
            let files = listing
                .files
                .into_iter()
                .map(|name| view! { <EntryTile name=name kind=EntryKind::File /> })
                .collect_view();
            view! {
                <section class=css::section>
                    <h3 class=css::sectionTitle>"Folders"</h3>
                    <div class=css::grid role="list">{folders}</div>
                </section>
                <section class=css::section>
                    <h3 class=css::sectionTitle>"Files"</h3>
                    <div class=css::grid role="list">{files}</div>
                </section>
            }
            .into_any()
        }
    }
}

#[component]
fn EntryTile(name: String, kind: EntryKind) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let is_image = kind == EntryKind::File && is_image_name(&name);
    let thumbnail = {
        let name = name.clone();
        Memo::new(move |_| {
            if is_image {
                ctx.browser.with(|b| b.thumbnail(&name))
            } else {
                None
            }
        })
    };

    let on_click = {
        let name = name.clone();
        move |_: leptos::ev::MouseEvent| {
            let name = name.clone();
            match kind {
                EntryKind::Folder => ctx.run(move |s| async move { s.open_folder(&name).await }),
                EntryKind::File if is_image => {
                    ctx.run(move |s| async move { s.open_preview(&name).await })
                }
                EntryKind::File => {}
            }
        }
    };

    let on_context_menu = {
        let name = name.clone();
        move |ev: leptos::ev::MouseEvent| {
            ev.prevent_default();
            let anchor = Point::new(ev.client_x() as f64, ev.client_y() as f64);
            ctx.browser
                .update(|b| b.ui_mut().open_menu(name.clone(), kind, anchor));
        }
    };

    let icon = icon_for(&name, kind);
    let label = format!("{}: {}", kind.label(), name);
    let title = name.clone();
    let tile_class = match kind {
        EntryKind::Folder => format!("{} {}", css::tile, css::folder),
        EntryKind::File => format!("{} {}", css::tile, css::file),
    };

    view! {
        <div
            class=tile_class
            role="listitem"
            tabindex="0"
            aria-label=label
            title=title
            on:click=on_click
            on:contextmenu=on_context_menu
        >
            <div class=css::visual>
                {move || match thumbnail.get() {
                    Some(url) => view! {
                        <img class=css::thumbnail src=url alt="" draggable="false" />
                    }
                    .into_any(),
                    None => view! {
                        <span class=css::icon aria-hidden="true"><Icon icon=icon /></span>
                    }
                    .into_any(),
                }}
            </div>
            <span class=css::name>{name}</span>
        </div>
    }
}
