//! The file-browser state machine.
//!
//! [`FileBrowser`] owns the current path, the displayed listing and every
//! piece of transient UI state. It never performs I/O: operations that need
//! the backend hand out a request description (a [`ListTicket`], a target
//! path, a [`PendingUpload`]) and later accept the result through a matching
//! `apply_*`/`finish_*` call.
//!
//! # Staleness
//!
//! Every listing request carries a ticket made of the path it was issued for
//! and a sequence number. Only the most recently issued ticket may write the
//! listing; since every path change issues a new ticket, a response for a
//! folder that is no longer current is always discarded, and so is an older
//! response for the current folder that lost the race against a refresh.

use std::sync::Arc;

use crate::core::error::BrowserError;
use crate::core::interaction::{InteractionController, MenuAction};
use crate::core::path_model::PathModel;
use crate::core::preview_cache::{BlobStore, PreviewCache, PreviewKey, PreviewStatus};
use crate::core::upload::{PendingUpload, UploadCoordinator, UploadOutcome};
use crate::models::{DirectoryListing, LocalFile, PreviewBlob, RemotePath, is_image_name};

/// Identifies one listing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListTicket {
    path: RemotePath,
    seq: u64,
}

impl ListTicket {
    pub fn path(&self) -> &RemotePath {
        &self.path
    }
}

/// What the listing area shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListingView {
    Loading,
    Ready(DirectoryListing),
    Failed(String),
}

/// Result of [`FileBrowser::apply_listing`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Applied {
    /// Listing shown; the returned previews should be fetched.
    Listing(Vec<PreviewKey>),
    /// Error shown in place of the listing.
    Failed,
    /// Response was for an outdated request and was dropped.
    Stale,
    /// Credential rejected; the caller must redirect.
    AuthRequired,
}

pub struct FileBrowser {
    paths: PathModel,
    view: ListingView,
    notice: Option<String>,
    latest: ListTicket,
    previews: PreviewCache,
    uploads: UploadCoordinator,
    ui: InteractionController,
    auth_required: bool,
}

impl FileBrowser {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            paths: PathModel::new(),
            view: ListingView::Loading,
            notice: None,
            latest: ListTicket {
                path: RemotePath::root(),
                seq: 0,
            },
            previews: PreviewCache::new(store),
            uploads: UploadCoordinator::new(),
            ui: InteractionController::new(),
            auth_required: false,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn current_path(&self) -> &RemotePath {
        self.paths.current()
    }

    pub fn can_go_back(&self) -> bool {
        self.paths.can_go_back()
    }

    pub fn history(&self) -> &[RemotePath] {
        self.paths.history()
    }

    pub fn view(&self) -> &ListingView {
        &self.view
    }

    pub fn listing(&self) -> Option<&DirectoryListing> {
        match &self.view {
            ListingView::Ready(listing) => Some(listing),
            _ => None,
        }
    }

    /// Error banner for failed mutations, shown above the listing.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn ui(&self) -> &InteractionController {
        &self.ui
    }

    /// Direct access for purely local transitions (menu open/hide, dialog
    /// draft edits, zoom gestures).
    pub fn ui_mut(&mut self) -> &mut InteractionController {
        &mut self.ui
    }

    pub fn requires_auth(&self) -> bool {
        self.auth_required
    }

    pub fn uploads_in_flight(&self) -> usize {
        self.uploads.in_flight()
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Issues a listing request for the current path, keeping whatever is
    /// displayed until the response arrives.
    pub fn refresh(&mut self) -> ListTicket {
        if matches!(self.view, ListingView::Failed(_)) {
            self.view = ListingView::Loading;
        }
        self.issue()
    }

    pub fn navigate_into(&mut self, name: &str) -> ListTicket {
        self.paths.navigate_into(name);
        self.invalidate();
        self.issue()
    }

    /// Breadcrumb jump. `None` if `path` is already current.
    pub fn navigate_to(&mut self, path: RemotePath) -> Option<ListTicket> {
        self.paths.navigate_to(path)?;
        self.invalidate();
        Some(self.issue())
    }

    /// `None` (and no state change) when there is no history.
    pub fn go_back(&mut self) -> Option<ListTicket> {
        self.paths.go_back()?;
        self.invalidate();
        Some(self.issue())
    }

    /// Applies a listing response if `ticket` is still the latest request.
    pub fn apply_listing(
        &mut self,
        ticket: &ListTicket,
        result: Result<DirectoryListing, BrowserError>,
    ) -> Applied {
        if ticket != &self.latest || ticket.path != *self.paths.current() {
            tracing::debug!(
                "discarding stale listing for '{}' (#{}, latest #{})",
                ticket.path,
                ticket.seq,
                self.latest.seq
            );
            return Applied::Stale;
        }
        match result {
            Ok(listing) => {
                let keys = self.previews.request_listing(&ticket.path, &listing);
                self.view = ListingView::Ready(listing);
                Applied::Listing(keys)
            }
            Err(BrowserError::AuthRequired) => {
                self.auth_required = true;
                Applied::AuthRequired
            }
            Err(e) => {
                self.view = ListingView::Failed(e.user_message().unwrap_or_default());
                Applied::Failed
            }
        }
    }

    /// Drops listing and preview state of the old path before the new fetch.
    fn invalidate(&mut self) {
        self.view = ListingView::Loading;
        self.notice = None;
        self.previews.rescope(self.paths.current());
        self.ui.reset_for_navigation();
    }

    fn issue(&mut self) -> ListTicket {
        self.latest = ListTicket {
            path: self.paths.current().clone(),
            seq: self.latest.seq + 1,
        };
        self.latest.clone()
    }

    // ------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------

    /// Surfaces a mutation error without touching the listing.
    pub fn report_error(&mut self, err: BrowserError) {
        match err.user_message() {
            None => self.auth_required = true,
            Some(message) => self.notice = Some(message),
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // ------------------------------------------------------------------
    // Previews
    // ------------------------------------------------------------------

    pub fn apply_preview(
        &mut self,
        key: &PreviewKey,
        result: Result<PreviewBlob, BrowserError>,
    ) -> bool {
        self.previews.complete(key, result)
    }

    /// Generation of the preview cache; changes whenever the displayed
    /// folder does.
    pub fn preview_generation(&self) -> u64 {
        self.previews.generation()
    }

    /// Whether previews of `path`, requested under `generation`, are still
    /// wanted. A loop started before leaving and re-entering `path` is not.
    pub fn previews_wanted_for(&self, path: &RemotePath, generation: u64) -> bool {
        self.previews.scope() == path && self.previews.generation() == generation
    }

    /// Thumbnail URL for `name` in the current folder.
    pub fn thumbnail(&self, name: &str) -> Option<String> {
        self.previews
            .get(self.paths.current(), name)
            .map(|h| h.url().to_string())
    }

    /// Opens the preview modal for image `name`. Returns the key to fetch if
    /// the image is not cached or in flight yet.
    pub fn open_preview(&mut self, name: &str) -> Option<PreviewKey> {
        if !is_image_name(name) {
            return None;
        }
        let key = PreviewKey::new(self.paths.current().clone(), name);
        self.ui.open_preview(key.clone());
        self.previews.request(&key).then_some(key)
    }

    pub fn close_preview(&mut self) {
        self.ui.close_preview();
    }

    /// Image URL of the open preview, once loaded.
    pub fn preview_url(&self) -> Option<String> {
        let key = self.ui.preview()?.key();
        self.previews
            .get(&key.path, &key.name)
            .map(|h| h.url().to_string())
    }

    pub fn preview_status(&self) -> Option<PreviewStatus> {
        self.ui.preview().map(|p| self.previews.status(p.key()))
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Resolves a context-menu action to the full path of its target.
    pub fn menu_action(&mut self, action: MenuAction) -> Option<RemotePath> {
        let target = self.ui.choose(action)?;
        Some(self.paths.current().join(&target.name))
    }

    /// Applies a delete result; success refreshes the then-current path.
    pub fn finish_delete(&mut self, result: Result<(), BrowserError>) -> Option<ListTicket> {
        match result {
            Ok(()) => Some(self.refresh()),
            Err(e) => {
                self.report_error(e);
                None
            }
        }
    }

    pub fn finish_download(&mut self, result: Result<(), BrowserError>) {
        if let Err(e) = result {
            self.report_error(e);
        }
    }

    /// Validates the dialog draft. Returns the folder to create it in and the
    /// trimmed name.
    pub fn submit_folder(&mut self) -> Option<(RemotePath, String)> {
        let name = self.ui.submit_dialog()?;
        Some((self.paths.current().clone(), name))
    }

    /// Applies a create-folder result. Success closes the dialog and issues
    /// exactly one refresh; failure keeps the dialog open with the message.
    pub fn finish_folder(&mut self, result: Result<(), BrowserError>) -> Option<ListTicket> {
        match result {
            Ok(()) => {
                self.ui.finish_dialog(Ok(()));
                Some(self.refresh())
            }
            Err(e) => {
                match e.user_message() {
                    Some(message) => self.ui.finish_dialog(Err(message)),
                    None => {
                        self.ui.cancel_dialog();
                        self.auth_required = true;
                    }
                }
                None
            }
        }
    }

    /// Starts an upload batch into `origin`, the folder that was current when
    /// the files were picked. Empty selections surface a validation notice and
    /// return `None`.
    pub fn begin_upload(
        &mut self,
        files: Vec<LocalFile>,
        origin: &RemotePath,
    ) -> Option<PendingUpload> {
        match self.uploads.prepare(files, origin) {
            Ok(upload) => {
                self.notice = None;
                Some(upload)
            }
            Err(e) => {
                self.report_error(e);
                None
            }
        }
    }

    /// Applies an upload result. Refreshes only if the origin is still current.
    pub fn finish_upload(
        &mut self,
        upload: &mut PendingUpload,
        result: Result<(), BrowserError>,
    ) -> Option<ListTicket> {
        let current = self.paths.current().clone();
        match self.uploads.resolve(upload, result, &current) {
            UploadOutcome::Refresh(_) => Some(self.refresh()),
            UploadOutcome::Skipped => None,
            UploadOutcome::Failed(e) => {
                self.report_error(e);
                None
            }
        }
    }
}
