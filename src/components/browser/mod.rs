//! File browser UI components.
//!
//! Components:
//! - [`Dashboard`] - Root view: toolbar, path bar, entries and overlays
//! - [`Toolbar`] - Back, title, new folder, upload, user and sign out
//! - [`PathBar`] - Breadcrumb of the current path
//! - [`EntryGrid`] - Folders and files with thumbnails
//! - [`ContextMenu`], [`FolderDialog`], [`PreviewModal`] - Overlays

mod context_menu;
mod entries;
mod folder_dialog;
mod pathbar;
mod preview;
mod toolbar;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent};

use crate::app::AppContext;
use crate::core::interaction::Bounds;
use crate::core::zoom_pan::Point;
use crate::utils::dom::{self, ListenerGuard};

pub use context_menu::ContextMenu;
pub use entries::EntryGrid;
pub use folder_dialog::FolderDialog;
pub use pathbar::PathBar;
pub use preview::PreviewModal;
pub use toolbar::Toolbar;

stylance::import_crate_style!(css, "src/components/browser/dashboard.module.css");

/// Selector of the rendered context menu, used for click-outside checks.
pub(crate) const MENU_SELECTOR: &str = "[data-context-menu]";

/// Selector of the previewed image, used to tell where a drag was released.
pub(crate) const PREVIEW_IMAGE_SELECTOR: &str = "[data-preview-image]";

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    ctx.run(|s| async move { s.start().await });
    use_document_listeners(ctx);

    let notice = Memo::new(move |_| ctx.browser.with(|b| b.notice().map(str::to_string)));

    view! {
        <div class=css::dashboard>
            <Toolbar />
            <PathBar />
            {move || notice.get().map(|message| view! {
                <div class=css::notice role="alert">
                    <span>{message}</span>
                    <button
                        class=css::noticeDismiss
                        on:click=move |_| ctx.browser.update(|b| b.dismiss_notice())
                        title="Dismiss"
                    >
                        "×"
                    </button>
                </div>
            })}
            <main class=css::content>
                <EntryGrid />
            </main>
            <ContextMenu />
            <FolderDialog />
            <PreviewModal />
        </div>
    }
}

/// Keeps document-level listeners in sync with what the browser state asks
/// for: a click-outside handler while the context menu is shown and
/// pointer move/up handlers while a preview drag is active.
fn use_document_listeners(ctx: AppContext) {
    let wanted = Memo::new(move |_| ctx.browser.with(|b| b.ui().listeners()));
    let click_outside = StoredValue::new_local(None::<ListenerGuard>);
    let drag = StoredValue::new_local(Vec::<ListenerGuard>::new());

    Effect::new(move |_| {
        let wanted = wanted.get();

        click_outside.update_value(|guard| match (wanted.click_outside, guard.is_some()) {
            (true, false) => {
                *guard = ListenerGuard::document("click", move |ev| on_document_click(ctx, ev));
            }
            (false, true) => *guard = None,
            _ => {}
        });

        drag.update_value(|guards| match (wanted.drag, guards.is_empty()) {
            (true, true) => {
                guards.extend(ListenerGuard::document("pointermove", move |ev| {
                    let at = pointer(&ev);
                    ctx.browser.update(|b| {
                        if let Some(zoom) = b.ui_mut().zoom_mut() {
                            zoom.pointer_move(at);
                        }
                    });
                }));
                guards.extend(ListenerGuard::document("pointerup", move |ev| {
                    let on_image = released_on(&ev, PREVIEW_IMAGE_SELECTOR);
                    ctx.browser.update(|b| {
                        if let Some(zoom) = b.ui_mut().zoom_mut() {
                            zoom.pointer_up(on_image);
                        }
                    });
                }));
            }
            (false, false) => guards.clear(),
            _ => {}
        });
    });
}

fn on_document_click(ctx: AppContext, ev: Event) {
    let at = pointer(&ev);
    let bounds = dom::document()
        .and_then(|d| d.query_selector(MENU_SELECTOR).ok().flatten())
        .map(|menu| {
            let rect = menu.get_bounding_client_rect();
            Bounds {
                left: rect.left(),
                top: rect.top(),
                width: rect.width(),
                height: rect.height(),
            }
        });
    ctx.browser.update(|b| {
        b.ui_mut().click_at(at, bounds);
    });
}

fn released_on(ev: &Event, selector: &str) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
        .is_some()
}

/// Client coordinates of a mouse or pointer event.
pub(crate) fn pointer(ev: &Event) -> Point {
    ev.dyn_ref::<MouseEvent>()
        .map(|m| Point::new(m.client_x() as f64, m.client_y() as f64))
        .unwrap_or_default()
}
