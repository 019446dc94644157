//! Async driver connecting [`FileBrowser`] to the backend.
//!
//! Each public method is one user intent. It reads the credential, mutates
//! the browser state through a [`BrowserStore`], awaits the backend and feeds
//! the result back. Nothing is held across an `.await` except owned request
//! data, so overlapping intents interleave freely on the single-threaded
//! executor; [`FileBrowser`]'s ticket check decides which results survive.

use crate::core::browser::{Applied, FileBrowser, ListTicket};
use crate::core::client::{RemoteDirectoryClient, Transport};
use crate::core::error::BrowserError;
use crate::core::interaction::MenuAction;
use crate::core::preview_cache::PreviewKey;
use crate::models::{Credential, DownloadedFile, LocalFile, RemotePath};

/// Shared handle to the browser state.
///
/// Both methods return `None` once the state has been disposed (the view
/// unmounted); pending work then stops quietly.
pub trait BrowserStore: Clone + 'static {
    fn with_browser<R>(&self, f: impl FnOnce(&FileBrowser) -> R) -> Option<R>;
    fn with_browser_mut<R>(&self, f: impl FnOnce(&mut FileBrowser) -> R) -> Option<R>;
}

/// Environment services owned by collaborators outside the browser.
pub trait Host: Clone + 'static {
    /// Current credential, re-read on every call.
    fn credential(&self) -> Option<Credential>;
    /// Hands control to the authentication flow.
    fn redirect_to_login(&self);
    /// Offers downloaded bytes to the user as a file.
    fn save_file(&self, file: DownloadedFile) -> Result<(), BrowserError>;
}

#[derive(Clone)]
pub struct Session<T, S, H> {
    transport: T,
    store: S,
    host: H,
}

impl<T, S, H> Session<T, S, H>
where
    T: Transport + Clone + 'static,
    S: BrowserStore,
    H: Host,
{
    pub fn new(transport: T, store: S, host: H) -> Self {
        Self {
            transport,
            store,
            host,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Initial load of the current folder.
    pub async fn start(&self) {
        self.reload().await;
    }

    pub async fn reload(&self) {
        let Some(credential) = self.credential() else {
            return;
        };
        if let Some(ticket) = self.store.with_browser_mut(FileBrowser::refresh) {
            self.fetch_listing(&credential, ticket).await;
        }
    }

    pub async fn open_folder(&self, name: &str) {
        let Some(credential) = self.credential() else {
            return;
        };
        if let Some(ticket) = self.store.with_browser_mut(|b| b.navigate_into(name)) {
            self.fetch_listing(&credential, ticket).await;
        }
    }

    pub async fn go_back(&self) {
        let Some(credential) = self.credential() else {
            return;
        };
        if let Some(Some(ticket)) = self.store.with_browser_mut(FileBrowser::go_back) {
            self.fetch_listing(&credential, ticket).await;
        }
    }

    pub async fn jump_to(&self, path: RemotePath) {
        let Some(credential) = self.credential() else {
            return;
        };
        if let Some(Some(ticket)) = self.store.with_browser_mut(|b| b.navigate_to(path)) {
            self.fetch_listing(&credential, ticket).await;
        }
    }

    async fn fetch_listing(&self, credential: &Credential, ticket: ListTicket) {
        let client = RemoteDirectoryClient::new(&self.transport, credential);
        let result = client.list(ticket.path()).await;
        match self
            .store
            .with_browser_mut(|b| b.apply_listing(&ticket, result))
        {
            Some(Applied::Listing(keys)) => self.load_previews(credential, keys).await,
            Some(Applied::AuthRequired) => self.host.redirect_to_login(),
            _ => {}
        }
    }

    /// Fetches thumbnails one after another, stopping as soon as the folder
    /// they belong to is no longer displayed, even if the user has since
    /// come back to it.
    pub async fn load_previews(&self, credential: &Credential, keys: Vec<PreviewKey>) {
        let Some(generation) = self.store.with_browser(FileBrowser::preview_generation) else {
            return;
        };
        let client = RemoteDirectoryClient::new(&self.transport, credential);
        for key in keys {
            let wanted = self
                .store
                .with_browser(|b| b.previews_wanted_for(&key.path, generation))
                .unwrap_or(false);
            if !wanted {
                tracing::debug!("skipping remaining previews of '{}'", key.path);
                break;
            }
            let result = client.fetch_preview_blob(&key.target()).await;
            if self.watch_auth(&result) {
                return;
            }
            self.store
                .with_browser_mut(|b| b.apply_preview(&key, result));
        }
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Submits the create-folder dialog.
    pub async fn create_folder(&self) {
        let Some(credential) = self.credential() else {
            return;
        };
        let Some(Some((path, name))) = self.store.with_browser_mut(FileBrowser::submit_folder)
        else {
            return;
        };
        let client = RemoteDirectoryClient::new(&self.transport, &credential);
        let result = client.create_folder(&path, &name).await;
        self.watch_auth(&result);
        if let Some(Some(ticket)) = self.store.with_browser_mut(|b| b.finish_folder(result)) {
            self.fetch_listing(&credential, ticket).await;
        }
    }

    /// Runs the context-menu action on the recorded target.
    pub async fn run_menu_action(&self, action: MenuAction) {
        let Some(credential) = self.credential() else {
            self.store.with_browser_mut(|b| b.ui_mut().hide_menu());
            return;
        };
        let Some(Some(target)) = self.store.with_browser_mut(|b| b.menu_action(action)) else {
            return;
        };
        let client = RemoteDirectoryClient::new(&self.transport, &credential);
        match action {
            MenuAction::Delete => {
                let result = client.delete_entry(&target).await;
                self.watch_auth(&result);
                if let Some(Some(ticket)) = self.store.with_browser_mut(|b| b.finish_delete(result)) {
                    self.fetch_listing(&credential, ticket).await;
                }
            }
            MenuAction::Download => {
                let result = client
                    .download(&target)
                    .await
                    .and_then(|file| self.host.save_file(file));
                self.watch_auth(&result);
                self.store
                    .with_browser_mut(|b| b.finish_download(result));
            }
        }
    }

    /// Reads a picked selection and uploads it as one batch into `origin`.
    ///
    /// `read` yields the file or, on failure, the name of the file that could
    /// not be read. One unreadable file aborts the whole batch with a single
    /// notice.
    pub async fn upload_selection<P, F, Fut>(&self, origin: RemotePath, picked: Vec<P>, read: F)
    where
        F: Fn(P) -> Fut,
        Fut: Future<Output = Result<LocalFile, String>>,
    {
        let mut files = Vec::with_capacity(picked.len());
        for item in picked {
            match read(item).await {
                Ok(file) => files.push(file),
                Err(name) => {
                    tracing::warn!("could not read '{}'; upload aborted", name);
                    self.store.with_browser_mut(|b| {
                        b.report_error(BrowserError::validation(format!("Could not read '{name}'")))
                    });
                    return;
                }
            }
        }
        self.upload(origin, files).await;
    }

    /// Uploads one batch into `origin`.
    pub async fn upload(&self, origin: RemotePath, files: Vec<LocalFile>) {
        let Some(credential) = self.credential() else {
            return;
        };
        let Some(Some(mut pending)) = self
            .store
            .with_browser_mut(|b| b.begin_upload(files, &origin))
        else {
            return;
        };
        tracing::info!(
            "upload #{}: {} file(s), {} bytes into '{}'",
            pending.id(),
            pending.file_count(),
            pending.total_bytes(),
            pending.origin()
        );
        let origin = pending.origin().clone();
        let files = pending.submit();
        let client = RemoteDirectoryClient::new(&self.transport, &credential);
        let result = client.upload(&origin, files).await;
        self.watch_auth(&result);
        let refresh = self
            .store
            .with_browser_mut(|b| b.finish_upload(&mut pending, result));
        tracing::info!("upload #{}: {:?}", pending.id(), pending.state());
        if let Some(Some(ticket)) = refresh {
            self.fetch_listing(&credential, ticket).await;
        }
    }

    /// Opens the preview modal for image `name`, fetching it if needed.
    pub async fn open_preview(&self, name: &str) {
        let Some(credential) = self.credential() else {
            return;
        };
        let Some(Some(key)) = self.store.with_browser_mut(|b| b.open_preview(name)) else {
            return;
        };
        let client = RemoteDirectoryClient::new(&self.transport, &credential);
        let result = client.fetch_preview_blob(&key.target()).await;
        if !self.watch_auth(&result) {
            self.store
                .with_browser_mut(|b| b.apply_preview(&key, result));
        }
    }

    // ------------------------------------------------------------------
    // Credential handling
    // ------------------------------------------------------------------

    /// Reads the credential, redirecting to login when there is none.
    fn credential(&self) -> Option<Credential> {
        let credential = self.host.credential();
        if credential.is_none() {
            tracing::info!("no credential; redirecting to login");
            self.require_login();
        }
        credential
    }

    /// Redirects when the backend rejected the credential. Returns `true` if
    /// it did.
    fn watch_auth<R>(&self, result: &Result<R, BrowserError>) -> bool {
        let rejected = result.as_ref().is_err_and(BrowserError::is_auth);
        if rejected {
            self.require_login();
        }
        rejected
    }

    fn require_login(&self) {
        self.store
            .with_browser_mut(|b| b.report_error(BrowserError::AuthRequired));
        self.host.redirect_to_login();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::sync::Arc;

    use super::*;
    use crate::config::endpoints;
    use crate::core::browser::ListingView;
    use crate::core::client::testing::{MockTransport, credential};
    use crate::core::client::RequestBody;
    use crate::core::error::FetchError;
    use crate::core::interaction::FolderDialog;
    use crate::core::preview_cache::testing::CountingStore;
    use crate::core::zoom_pan::Point;
    use crate::models::{DirectoryListing, EntryKind};
    use serde_json::json;

    #[derive(Clone)]
    struct TestStore(Rc<RefCell<FileBrowser>>);

    impl BrowserStore for TestStore {
        fn with_browser<R>(&self, f: impl FnOnce(&FileBrowser) -> R) -> Option<R> {
            Some(f(&self.0.borrow()))
        }

        fn with_browser_mut<R>(&self, f: impl FnOnce(&mut FileBrowser) -> R) -> Option<R> {
            Some(f(&mut self.0.borrow_mut()))
        }
    }

    #[derive(Clone)]
    struct TestHost {
        credential: Rc<RefCell<Option<Credential>>>,
        redirects: Rc<Cell<usize>>,
        saved: Rc<RefCell<Vec<DownloadedFile>>>,
    }

    impl Host for TestHost {
        fn credential(&self) -> Option<Credential> {
            self.credential.borrow().clone()
        }

        fn redirect_to_login(&self) {
            self.redirects.set(self.redirects.get() + 1);
        }

        fn save_file(&self, file: DownloadedFile) -> Result<(), BrowserError> {
            self.saved.borrow_mut().push(file);
            Ok(())
        }
    }

    type TestSession = Session<MockTransport, TestStore, TestHost>;

    fn session() -> (TestSession, MockTransport) {
        let transport = MockTransport::default();
        let store = TestStore(Rc::new(RefCell::new(FileBrowser::new(Arc::new(
            CountingStore::default(),
        )))));
        let host = TestHost {
            credential: Rc::new(RefCell::new(Some(credential()))),
            redirects: Rc::new(Cell::new(0)),
            saved: Rc::new(RefCell::new(Vec::new())),
        };
        (Session::new(transport.clone(), store, host), transport)
    }

    fn read<R>(session: &TestSession, f: impl FnOnce(&FileBrowser) -> R) -> R {
        session.store().with_browser(f).unwrap()
    }

    #[tokio::test]
    async fn test_start_lists_root_and_fetches_thumbnails() {
        let (session, transport) = session();
        transport
            .reply(200, r#"{"folders":["Docs"],"files":["a.png","b.txt"]}"#)
            .reply_bytes(200, "image/png", &[1, 2, 3]);

        session.start().await;

        assert_eq!(
            read(&session, |b| b.listing().cloned()),
            Some(DirectoryListing::new(["Docs"], ["a.png", "b.txt"]))
        );
        assert_eq!(transport.count(endpoints::PREVIEW), 1);
        assert_eq!(read(&session, |b| b.thumbnail("a.png")), Some("blob:1".to_string()));
    }

    #[tokio::test]
    async fn test_missing_credential_issues_no_requests() {
        let (session, transport) = session();
        *session.host().credential.borrow_mut() = None;

        session.start().await;
        session.open_folder("Docs").await;

        assert!(transport.requests.borrow().is_empty());
        assert_eq!(session.host().redirects.get(), 2);
        assert!(read(&session, FileBrowser::requires_auth));
    }

    #[tokio::test]
    async fn test_rejected_token_redirects() {
        let (session, transport) = session();
        transport.reply(401, "{}");
        session.start().await;
        assert_eq!(session.host().redirects.get(), 1);
        assert!(read(&session, FileBrowser::requires_auth));
    }

    #[tokio::test]
    async fn test_open_folder_then_back() {
        let (session, transport) = session();
        transport
            .reply(200, r#"{"folders":["Docs"],"files":[]}"#)
            .reply(200, r#"{"folders":[],"files":["cv.pdf"]}"#)
            .reply(200, r#"{"folders":["Docs"],"files":[]}"#);

        session.start().await;
        session.open_folder("Docs").await;
        assert_eq!(
            transport.last().unwrap().body,
            RequestBody::Json(json!({ "path": "Docs" }))
        );
        assert_eq!(read(&session, |b| b.history().len()), 1);

        session.go_back().await;
        assert!(read(&session, |b| b.current_path().is_root()));
        assert_eq!(transport.count(endpoints::LIST), 3);

        // nothing left to go back to: no request
        session.go_back().await;
        assert_eq!(transport.count(endpoints::LIST), 3);
    }

    #[tokio::test]
    async fn test_create_folder_lists_exactly_once() {
        let (session, transport) = session();
        session.store().with_browser_mut(|b| {
            b.ui_mut().open_dialog();
            b.ui_mut().set_draft("Photos");
        });
        transport.reply(201, "{}");

        session.create_folder().await;

        assert_eq!(transport.count(endpoints::CREATE_FOLDER), 1);
        assert_eq!(transport.count(endpoints::LIST), 1);
        assert_eq!(read(&session, |b| b.ui().dialog().clone()), FolderDialog::Closed);

        session.store().with_browser_mut(|b| b.ui_mut().open_dialog());
        assert_eq!(
            read(&session, |b| b.ui().dialog().clone()),
            FolderDialog::Open {
                draft: String::new(),
                error: None,
                submitting: false
            }
        );
    }

    #[tokio::test]
    async fn test_create_folder_conflict_no_refresh() {
        let (session, transport) = session();
        session.store().with_browser_mut(|b| {
            b.ui_mut().open_dialog();
            b.ui_mut().set_draft("Docs");
        });
        transport.reply(409, "{}");

        session.create_folder().await;

        assert_eq!(transport.count(endpoints::LIST), 0);
        assert!(read(&session, |b| b.ui().dialog().is_open()));
    }

    #[tokio::test]
    async fn test_delete_sends_child_path_and_refreshes() {
        let (session, transport) = session();
        transport
            .reply(200, r#"{"folders":["A"],"files":[]}"#)
            .reply(200, r#"{"folders":["Old"],"files":[]}"#)
            .reply(200, "{}")
            .reply(200, r#"{"folders":[],"files":[]}"#);
        session.start().await;
        session.open_folder("A").await;

        session.store().with_browser_mut(|b| {
            b.ui_mut()
                .open_menu("Old", EntryKind::Folder, Point::new(5.0, 5.0))
        });
        session.run_menu_action(MenuAction::Delete).await;

        let requests = transport.requests.borrow();
        let delete = requests
            .iter()
            .find(|r| r.endpoint == endpoints::DELETE)
            .unwrap();
        assert_eq!(delete.body, RequestBody::Json(json!({ "path": "A/Old" })));
        assert_eq!(requests.last().unwrap().endpoint, endpoints::LIST);
        drop(requests);
        assert!(!read(&session, |b| b.ui().menu().is_visible()));
        assert_eq!(
            read(&session, |b| b.listing().cloned()),
            Some(DirectoryListing::default())
        );
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_listing() {
        let (session, transport) = session();
        transport
            .reply(200, r#"{"folders":["Old"],"files":[]}"#)
            .fail(FetchError::NetworkError("offline".into()));
        session.start().await;
        session
            .store()
            .with_browser_mut(|b| b.ui_mut().open_menu("Old", EntryKind::Folder, Point::default()));

        session.run_menu_action(MenuAction::Delete).await;

        assert_eq!(transport.count(endpoints::LIST), 1);
        assert!(!read(&session, |b| b.ui().menu().is_visible()));
        assert!(matches!(read(&session, |b| b.view().clone()), ListingView::Ready(_)));
        assert!(read(&session, |b| b.notice().is_some()));
    }

    #[tokio::test]
    async fn test_download_saves_file() {
        let (session, transport) = session();
        transport.reply_bytes(200, "text/plain", b"hi");
        session
            .store()
            .with_browser_mut(|b| b.ui_mut().open_menu("a.txt", EntryKind::File, Point::default()));

        session.run_menu_action(MenuAction::Download).await;

        let saved = session.host().saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].filename, "a.txt");
        assert_eq!(transport.count(endpoints::LIST), 0);
    }

    #[tokio::test]
    async fn test_empty_upload_makes_no_calls() {
        let (session, transport) = session();
        session.upload(RemotePath::root(), Vec::new()).await;
        assert!(transport.requests.borrow().is_empty());
        assert_eq!(
            read(&session, |b| b.notice().map(str::to_string)),
            Some("Select at least one file to upload".to_string())
        );
    }

    #[tokio::test]
    async fn test_upload_refreshes_current_folder() {
        let (session, transport) = session();
        transport.reply(201, "{}");
        session
            .upload(
                RemotePath::root(),
                vec![
                    LocalFile::new("a.txt", "text/plain", b"a".to_vec()),
                    LocalFile::new("b.txt", "text/plain", b"b".to_vec()),
                ],
            )
            .await;
        assert_eq!(transport.count(endpoints::UPLOAD), 1);
        assert_eq!(transport.count(endpoints::LIST), 1);
        assert_eq!(read(&session, FileBrowser::uploads_in_flight), 0);
    }

    fn multipart_path(transport: &MockTransport) -> Option<String> {
        let requests = transport.requests.borrow();
        let upload = requests.iter().find(|r| r.endpoint == endpoints::UPLOAD)?;
        match &upload.body {
            RequestBody::Multipart { fields, .. } => fields
                .iter()
                .find(|(name, _)| *name == "path")
                .map(|(_, value)| value.clone()),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_upload_targets_folder_of_selection() {
        let (session, transport) = session();
        transport
            .reply(200, r#"{"folders":["B"],"files":[]}"#)
            .reply(200, r#"{"folders":[],"files":[]}"#)
            .reply(201, "{}");
        session.start().await;

        // picked at root, the user opens B while the file is being read
        let origin = read(&session, |b| b.current_path().clone());
        let nav = session.clone();
        session
            .upload_selection(origin, vec!["a.txt"], move |name| {
                let nav = nav.clone();
                async move {
                    nav.open_folder("B").await;
                    Ok(LocalFile::new(name, "text/plain", b"a".to_vec()))
                }
            })
            .await;

        assert_eq!(multipart_path(&transport), Some(String::new()));
        assert_eq!(read(&session, |b| b.current_path().display()), "B");
        // B is displayed, so the root upload does not trigger a listing
        assert_eq!(transport.count(endpoints::LIST), 2);
    }

    #[tokio::test]
    async fn test_unreadable_file_aborts_batch() {
        let (session, transport) = session();
        session
            .upload_selection(RemotePath::root(), vec!["a.txt", "big.iso"], |name| async move {
                if name == "big.iso" {
                    Err(name.to_string())
                } else {
                    Ok(LocalFile::new(name, "text/plain", b"a".to_vec()))
                }
            })
            .await;

        assert!(transport.requests.borrow().is_empty());
        assert_eq!(
            read(&session, |b| b.notice().map(str::to_string)),
            Some("Could not read 'big.iso'".to_string())
        );
        assert_eq!(read(&session, FileBrowser::uploads_in_flight), 0);
    }

    #[tokio::test]
    async fn test_open_preview_fetches_once() {
        let (session, transport) = session();
        transport
            .reply(200, r#"{"folders":[],"files":["a.png"]}"#)
            .fail(FetchError::Timeout)
            .reply_bytes(200, "image/png", &[9]);
        session.start().await;
        // thumbnail failed silently
        assert!(read(&session, |b| b.thumbnail("a.png")).is_none());
        assert!(read(&session, |b| b.notice().is_none()));

        session.open_preview("a.png").await;
        assert_eq!(transport.count(endpoints::PREVIEW), 2);
        assert!(read(&session, |b| b.preview_url()).is_some());

        // reopening reuses the cached blob
        session.store().with_browser_mut(FileBrowser::close_preview);
        session.open_preview("a.png").await;
        assert_eq!(transport.count(endpoints::PREVIEW), 2);
    }
}
