//! Create-folder dialog.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::core::FolderDialog as DialogState;

stylance::import_crate_style!(css, "src/components/browser/overlay.module.css");

#[component]
pub fn FolderDialog() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let dialog = Memo::new(move |_| ctx.browser.with(|b| b.ui().dialog().clone()));

    let is_open = Memo::new(move |_| dialog.with(DialogState::is_open));
    let draft = Memo::new(move |_| match dialog.get() {
        DialogState::Open { draft, .. } => draft,
        DialogState::Closed => String::new(),
    });
    let error = Memo::new(move |_| match dialog.get() {
        DialogState::Open { error, .. } => error,
        DialogState::Closed => None,
    });
    let submitting = Memo::new(move |_| {
        matches!(dialog.get(), DialogState::Open { submitting: true, .. })
    });

    let input_ref = NodeRef::<leptos::html::Input>::new();
    // focus the name field whenever the dialog opens
    Effect::new(move |_| {
        if is_open.get()
            && let Some(input) = input_ref.get()
        {
            let _ = input.focus();
        }
    });

    let submit = move || ctx.run(|s| async move { s.create_folder().await });
    let cancel = move || ctx.browser.update(|b| b.ui_mut().cancel_dialog());

    view! {
        <Show when=move || is_open.get()>
            <div class=css::backdrop on:click=move |_| cancel()>
                <form
                    class=css::dialog
                    role="dialog"
                    aria-label="New folder"
                    on:click=|ev: leptos::ev::MouseEvent| ev.stop_propagation()
                    on:submit=move |ev: leptos::ev::SubmitEvent| {
                        ev.prevent_default();
                        submit();
                    }
                >
                    <h2 class=css::dialogTitle>"New folder"</h2>
                    <input
                        node_ref=input_ref
                        class=css::dialogInput
                        type="text"
                        placeholder="Folder name"
                        prop:value=move || draft.get()
                        disabled=move || submitting.get()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            ctx.browser.update(|b| b.ui_mut().set_draft(value));
                        }
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Escape" {
                                cancel();
                            }
                        }
                    />
                    {move || error.get().map(|message| view! {
                        <p class=css::dialogError role="alert">{message}</p>
                    })}
                    <div class=css::dialogActions>
                        <button type="button" class=css::secondary on:click=move |_| cancel()>
                            "Cancel"
                        </button>
                        <button type="submit" class=css::primary disabled=move || submitting.get()>
                            {move || if submitting.get() { "Creating…" } else { "Create" }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
