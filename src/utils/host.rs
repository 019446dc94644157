//! Browser bindings for the session driver.

use leptos::prelude::*;

use crate::core::{BrowserError, BrowserStore, FileBrowser, Host, Session};
use crate::models::{Credential, DownloadedFile};
use crate::utils::dom;
use crate::utils::fetch::WebTransport;

/// Session wired to the real backend, localStorage and the page.
pub type WebSession = Session<WebTransport, RwSignal<FileBrowser>, WebHost>;

impl BrowserStore for RwSignal<FileBrowser> {
    fn with_browser<R>(&self, f: impl FnOnce(&FileBrowser) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }

    fn with_browser_mut<R>(&self, f: impl FnOnce(&mut FileBrowser) -> R) -> Option<R> {
        self.try_update(f)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct WebHost;

impl Host for WebHost {
    fn credential(&self) -> Option<Credential> {
        dom::stored_credential()
    }

    fn redirect_to_login(&self) {
        dom::redirect_to_login();
    }

    fn save_file(&self, file: DownloadedFile) -> Result<(), BrowserError> {
        tracing::info!("saving '{}' ({} bytes)", file.filename, file.bytes.len());
        dom::trigger_download(&file)
    }
}
