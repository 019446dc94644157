//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Document, Event, HtmlAnchorElement, Storage, Url, Window};

use crate::config::{LOGIN_URL, storage};
use crate::core::error::BrowserError;
use crate::models::{Credential, DownloadedFile};
use crate::utils::fetch::bytes_to_blob;

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

#[inline]
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Get localStorage.
#[inline]
pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

// =============================================================================
// Credential
// =============================================================================

/// Reads the credential the login flow left in localStorage.
pub fn stored_credential() -> Option<Credential> {
    let store = local_storage()?;
    Credential::from_parts(
        store.get_item(storage::TOKEN_KEY).ok().flatten(),
        store.get_item(storage::USERNAME_KEY).ok().flatten(),
    )
}

/// Forgets the stored credential.
pub fn clear_credential() {
    if let Some(store) = local_storage() {
        let _ = store.remove_item(storage::TOKEN_KEY);
        let _ = store.remove_item(storage::USERNAME_KEY);
    }
}

/// Leaves the app for the login page.
pub fn redirect_to_login() {
    if let Some(window) = window()
        && let Err(e) = window.location().set_href(LOGIN_URL)
    {
        tracing::error!("redirect to {} failed: {:?}", LOGIN_URL, e);
    }
}

// =============================================================================
// Downloads
// =============================================================================

/// Offers `file` to the user through a temporary object URL and a clicked
/// anchor. The URL is revoked once the click has been dispatched.
pub fn trigger_download(file: &DownloadedFile) -> Result<(), BrowserError> {
    let failed = |what: &str| BrowserError::Transport(format!("could not save file ({what})"));

    let document = document().ok_or_else(|| failed("no document"))?;
    let blob = bytes_to_blob(&file.bytes, &file.mime).map_err(|_| failed("blob"))?;
    let url = Url::create_object_url_with_blob(&blob).map_err(|_| failed("object url"))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| failed("anchor"))?
        .unchecked_into();
    anchor.set_href(&url);
    anchor.set_download(&file.filename);
    anchor.click();

    Timeout::new(0, move || {
        let _ = Url::revoke_object_url(&url);
    })
    .forget();
    Ok(())
}

// =============================================================================
// Document listeners
// =============================================================================

/// A document-level event listener, removed when dropped.
pub struct ListenerGuard {
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl ListenerGuard {
    /// Subscribes `handler` to `event` on the document.
    pub fn document(event: &'static str, handler: impl FnMut(Event) + 'static) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        document()?
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .ok()?;
        Some(Self { event, closure })
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(document) = document() {
            let _ = document
                .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen_test::*;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn dispatch(name: &str) {
        let event = Event::new(name).unwrap();
        document().unwrap().dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_listener_removed_on_drop() {
        let hits = Rc::new(Cell::new(0));
        let guard = {
            let hits = hits.clone();
            ListenerGuard::document("nebula-test", move |_| hits.set(hits.get() + 1)).unwrap()
        };
        dispatch("nebula-test");
        drop(guard);
        dispatch("nebula-test");
        assert_eq!(hits.get(), 1);
    }

    #[wasm_bindgen_test]
    fn test_credential_round_trip() {
        let store = local_storage().unwrap();
        store.set_item(storage::TOKEN_KEY, "abc").unwrap();
        store.set_item(storage::USERNAME_KEY, "amy").unwrap();
        let credential = stored_credential().unwrap();
        assert_eq!(credential.username(), "amy");

        clear_credential();
        assert!(stored_credential().is_none());
    }
}
