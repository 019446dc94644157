//! Dashboard toolbar.
//!
//! Contains the back button, current folder title, folder/upload actions and
//! the signed-in user.

use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::APP_NAME;
use crate::models::LocalFile;

stylance::import_crate_style!(css, "src/components/browser/dashboard.module.css");

#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let can_go_back = Memo::new(move |_| ctx.browser.with(|b| b.can_go_back()));
    let title = Memo::new(move |_| {
        ctx.browser.with(|b| {
            b.current_path()
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| APP_NAME.to_string())
        })
    });
    let uploading = Memo::new(move |_| ctx.browser.with(|b| b.uploads_in_flight()));

    let on_back = move |_: leptos::ev::MouseEvent| {
        ctx.run(|s| async move { s.go_back().await });
    };

    let on_new_folder = move |_: leptos::ev::MouseEvent| {
        ctx.browser.update(|b| b.ui_mut().open_dialog());
    };

    view! {
        <header class=css::toolbar>
            <div class=css::navButtons>
                <button
                    class=css::toolButton
                    on:click=on_back
                    disabled=move || !can_go_back.get()
                    title="Back"
                >
                    <Icon icon=ic::BACK />
                </button>
            </div>

            <div class=css::title>
                <span class=css::titleIcon><Icon icon=ic::CLOUD /></span>
                <span class=css::titleLabel>{move || title.get()}</span>
            </div>

            <div class=css::actionButtons>
                {move || (uploading.get() > 0).then(|| view! {
                    <span class=css::uploadBadge>"Uploading…"</span>
                })}
                <button class=css::toolButton on:click=on_new_folder title="New folder">
                    <Icon icon=ic::FOLDER_PLUS />
                </button>
                <UploadButton />
                <UserMenu />
            </div>
        </header>
    }
}

/// File picker feeding one upload batch per selection.
#[component]
fn UploadButton() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let on_pick = move |_: leptos::ev::MouseEvent| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let picked: Vec<File> = input
            .files()
            .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
            .unwrap_or_default();
        // same file can be picked again
        input.set_value("");
        let origin = ctx.browser.with_untracked(|b| b.current_path().clone());

        ctx.run(move |s| async move { s.upload_selection(origin, picked, read_file).await });
    };

    view! {
        <button class=css::toolButton on:click=on_pick title="Upload files">
            <Icon icon=ic::UPLOAD />
        </button>
        <input
            node_ref=input_ref
            class=css::hiddenInput
            type="file"
            multiple=true
            on:change=on_change
        />
    }
}

/// Reads a picked file into memory. The error is the file's name.
async fn read_file(file: File) -> Result<LocalFile, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| file.name())?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(LocalFile::new(file.name(), file.type_(), bytes))
}

#[component]
fn UserMenu() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    view! {
        <div class=css::user>
            <span class=css::userIcon><Icon icon=ic::USER /></span>
            <span class=css::userName>
                {move || ctx.username.get().unwrap_or_default()}
            </span>
            <button
                class=css::toolButton
                on:click=move |_| ctx.sign_out()
                title="Sign out"
            >
                <Icon icon=ic::SIGN_OUT />
            </button>
        </div>
    }
}
