//! Root application module.
//!
//! Contains the main App component, AppContext definition, and
//! application-level setup logic following Leptos conventions.

use std::future::Future;
use std::sync::Arc;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::Dashboard;
use crate::core::{FileBrowser, Session};
use crate::utils::{ObjectUrlStore, WebHost, WebSession, WebTransport, dom};

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// This context is provided at the root of the component tree and can be
/// accessed from any child component using `use_context::<AppContext>()`.
///
/// The browser state lives in a single signal; every backend operation goes
/// through the [`WebSession`] stored next to it, which writes its results
/// back into that signal.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// File browser state (path, listing, previews, menus).
    pub browser: RwSignal<FileBrowser>,

    /// Display name of the signed-in user, read once at mount.
    pub username: Signal<Option<String>>,

    session: StoredValue<WebSession>,
}

impl AppContext {
    pub fn new() -> Self {
        let browser = RwSignal::new(FileBrowser::new(Arc::new(ObjectUrlStore)));
        let session = Session::new(WebTransport::default(), browser, WebHost);
        let username = dom::stored_credential().map(|c| c.username().to_string());
        Self {
            browser,
            username: Signal::stored(username),
            session: StoredValue::new(session),
        }
    }

    /// Runs one session operation on the local executor.
    ///
    /// ```ignore
    /// ctx.run(move |s| async move { s.open_folder(&name).await });
    /// ```
    pub fn run<F, Fut>(&self, op: F)
    where
        F: FnOnce(WebSession) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        let session = self.session.get_value();
        spawn_local(op(session));
    }

    /// Forgets the credential and leaves for the login page.
    pub fn sign_out(&self) {
        tracing::info!("signing out");
        dom::clear_credential();
        dom::redirect_to_login();
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Wraps the app in an ErrorBoundary for graceful error handling
/// - Renders the Dashboard
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    background: #f4f6fb;
                    color: #1f2937;
                    font-family: system-ui, sans-serif;
                ">
                    <div style="max-width: 600px; text-align: center;">
                        <h1 style="color: #dc2626; margin-bottom: 1rem;">
                            "Something went wrong"
                        </h1>
                        <p style="color: #6b7280; margin-bottom: 2rem;">
                            "An unexpected error occurred. Please try reloading the page."
                        </p>
                        <details style="
                            text-align: left;
                            background: #ffffff;
                            padding: 1rem;
                            border-radius: 6px;
                            margin-bottom: 1rem;
                        ">
                            <summary style="cursor: pointer; color: #6b7280;">
                                "Error details"
                            </summary>
                            <ul style="
                                margin: 1rem 0 0 0;
                                padding-left: 1.5rem;
                                color: #dc2626;
                                font-size: 0.9rem;
                            ">
                                {move || errors.get()
                                    .into_iter()
                                    .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                    .collect::<Vec<_>>()
                                }
                            </ul>
                        </details>
                        <button
                            on:click=move |_| {
                                if let Some(window) = dom::window() {
                                    let _ = window.location().reload();
                                }
                            }
                            style="
                                background: #2563eb;
                                color: white;
                                border: none;
                                padding: 0.75rem 2rem;
                                border-radius: 6px;
                                cursor: pointer;
                                font-size: 1rem;
                            "
                        >
                            "Reload Page"
                        </button>
                    </div>
                </div>
            }
        >
            <Dashboard />
        </ErrorBoundary>
    }
}
