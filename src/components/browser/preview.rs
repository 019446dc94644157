//! Full-size image preview with click-to-zoom and drag-to-pan.
//!
//! Pointer-down on the zoomed image starts a drag; the move/up handlers are
//! document listeners installed by the dashboard while the drag lasts, so the
//! pan continues when the pointer leaves the image.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::PreviewStatus;
use crate::core::zoom_pan::Transform;

use super::pointer;

stylance::import_crate_style!(css, "src/components/browser/overlay.module.css");

#[component]
pub fn PreviewModal() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let name = Memo::new(move |_| {
        ctx.browser
            .with(|b| b.ui().preview().map(|p| p.key().name.clone()))
    });
    let url = Memo::new(move |_| ctx.browser.with(|b| b.preview_url()));
    let status = Memo::new(move |_| ctx.browser.with(|b| b.preview_status()));
    let transform = Memo::new(move |_| {
        ctx.browser.with(|b| {
            b.ui()
                .preview()
                .map(|p| p.zoom().transform())
                .unwrap_or(Transform::IDENTITY)
        })
    });
    let zoomed = Memo::new(move |_| transform.with(|t| *t != Transform::IDENTITY));
    let dragging = Memo::new(move |_| {
        ctx.browser
            .with(|b| b.ui().preview().is_some_and(|p| p.zoom().is_dragging()))
    });

    let close = move || ctx.browser.update(|b| b.close_preview());

    // take keyboard focus so Escape closes the preview
    let backdrop_ref = NodeRef::<leptos::html::Div>::new();
    Effect::new(move |_| {
        if let Some(backdrop) = backdrop_ref.get() {
            let _ = backdrop.focus();
        }
    });

    let on_image_click = move |_: leptos::ev::MouseEvent| {
        ctx.browser.update(|b| {
            if let Some(zoom) = b.ui_mut().zoom_mut() {
                zoom.click();
            }
        });
    };

    let on_pointer_down = move |ev: leptos::ev::PointerEvent| {
        // no native image drag
        ev.prevent_default();
        let at = pointer(&ev);
        ctx.browser.update(|b| {
            if let Some(zoom) = b.ui_mut().zoom_mut() {
                zoom.pointer_down(at);
            }
        });
    };

    let image_class = move || {
        if dragging.get() {
            format!("{} {}", css::previewImage, css::grabbing)
        } else if zoomed.get() {
            format!("{} {}", css::previewImage, css::zoomed)
        } else {
            css::previewImage.to_string()
        }
    };

    view! {
        <Show when=move || name.with(Option::is_some)>
            <div
                node_ref=backdrop_ref
                class=format!("{} {}", css::backdrop, css::previewBackdrop)
                tabindex="-1"
                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                    if ev.key() == "Escape" {
                        close();
                    }
                }
            >
                <div class=css::previewHeader>
                    <span class=css::previewName>{move || name.get().unwrap_or_default()}</span>
                    <button class=css::previewClose on:click=move |_| close() title="Close">
                        <Icon icon=ic::CLOSE />
                    </button>
                </div>
                <div class=css::previewStage>
                    {move || match (url.get(), status.get()) {
                        (Some(src), _) => view! {
                            <img
                                class=image_class
                                src=src
                                alt=move || name.get().unwrap_or_default()
                                draggable="false"
                                data-preview-image=""
                                style:transform=move || transform.get().to_css()
                                on:click=on_image_click
                                on:pointerdown=on_pointer_down
                            />
                        }
                        .into_any(),
                        (None, Some(PreviewStatus::Failed)) => view! {
                            <p class=css::previewMessage>"Preview unavailable"</p>
                        }
                        .into_any(),
                        _ => view! {
                            <p class=css::previewMessage>"Loading preview…"</p>
                        }
                        .into_any(),
                    }}
                </div>
            </div>
        </Show>
    }
}
