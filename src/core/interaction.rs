//! Ephemeral UI state: context menu, create-folder dialog, image preview.
//!
//! Nothing here talks to the backend. The controller only records what the
//! user is doing; [`crate::core::FileBrowser`] decides which backend calls
//! follow. Document-wide listeners are described by [`ListenerSet`] so the
//! view layer can subscribe exactly while a piece of state needs them.

use crate::core::client::validate_folder_name;
use crate::core::preview_cache::PreviewKey;
use crate::core::zoom_pan::{Point, ZoomPanSession};
use crate::models::EntryKind;

/// Entry a context menu was opened for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuTarget {
    pub name: String,
    pub kind: EntryKind,
}

/// Rendered rectangle of the menu, in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left
            && p.x <= self.left + self.width
            && p.y >= self.top
            && p.y <= self.top + self.height
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ContextMenu {
    #[default]
    Hidden,
    Visible { target: MenuTarget, anchor: Point },
}

impl ContextMenu {
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible { .. })
    }

    pub fn target(&self) -> Option<&MenuTarget> {
        match self {
            Self::Visible { target, .. } => Some(target),
            Self::Hidden => None,
        }
    }
}

/// Actions offered by the context menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Download,
    Delete,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FolderDialog {
    #[default]
    Closed,
    Open {
        draft: String,
        error: Option<String>,
        submitting: bool,
    },
}

impl FolderDialog {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

/// An open image preview and its gesture state.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewSession {
    key: PreviewKey,
    zoom: ZoomPanSession,
}

impl PreviewSession {
    pub fn key(&self) -> &PreviewKey {
        &self.key
    }

    pub fn zoom(&self) -> &ZoomPanSession {
        &self.zoom
    }
}

/// Document-level listeners the current state needs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListenerSet {
    /// Clicks anywhere, to hide the context menu when outside its bounds.
    pub click_outside: bool,
    /// Pointer move/up, while a preview drag is in progress.
    pub drag: bool,
}

#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    menu: ContextMenu,
    dialog: FolderDialog,
    preview: Option<PreviewSession>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listeners(&self) -> ListenerSet {
        ListenerSet {
            click_outside: self.menu.is_visible(),
            drag: self
                .preview
                .as_ref()
                .is_some_and(|p| p.zoom.is_dragging()),
        }
    }

    /// Drops state tied to the displayed folder (menu and preview).
    pub fn reset_for_navigation(&mut self) {
        self.menu = ContextMenu::Hidden;
        self.preview = None;
    }

    // ------------------------------------------------------------------
    // Context menu
    // ------------------------------------------------------------------

    pub fn menu(&self) -> &ContextMenu {
        &self.menu
    }

    pub fn open_menu(&mut self, name: impl Into<String>, kind: EntryKind, anchor: Point) {
        self.menu = ContextMenu::Visible {
            target: MenuTarget {
                name: name.into(),
                kind,
            },
            anchor,
        };
    }

    pub fn hide_menu(&mut self) {
        self.menu = ContextMenu::Hidden;
    }

    /// Handles a document click. Hides the menu unless the click landed inside
    /// `bounds`. Returns `true` if the menu was hidden.
    pub fn click_at(&mut self, at: Point, bounds: Option<Bounds>) -> bool {
        if !self.menu.is_visible() || bounds.is_some_and(|b| b.contains(at)) {
            return false;
        }
        self.menu = ContextMenu::Hidden;
        true
    }

    /// Picks a menu action. The menu is hidden whatever happens next; the
    /// recorded target is returned for the backend call.
    pub fn choose(&mut self, action: MenuAction) -> Option<MenuTarget> {
        let ContextMenu::Visible { target, .. } = std::mem::take(&mut self.menu) else {
            return None;
        };
        if action == MenuAction::Download && target.kind == EntryKind::Folder {
            return None;
        }
        Some(target)
    }

    // ------------------------------------------------------------------
    // Create-folder dialog
    // ------------------------------------------------------------------

    pub fn dialog(&self) -> &FolderDialog {
        &self.dialog
    }

    pub fn open_dialog(&mut self) {
        self.hide_menu();
        self.dialog = FolderDialog::Open {
            draft: String::new(),
            error: None,
            submitting: false,
        };
    }

    pub fn set_draft(&mut self, value: impl Into<String>) {
        if let FolderDialog::Open { draft, error, .. } = &mut self.dialog {
            *draft = value.into();
            *error = None;
        }
    }

    /// Validates the draft and marks the dialog as submitting.
    ///
    /// Returns the trimmed folder name to create, or `None` when the dialog is
    /// closed, already submitting, or the draft is invalid (the validation
    /// message is then shown in the dialog).
    pub fn submit_dialog(&mut self) -> Option<String> {
        let FolderDialog::Open {
            draft,
            error,
            submitting,
        } = &mut self.dialog
        else {
            return None;
        };
        if *submitting {
            return None;
        }
        match validate_folder_name(draft) {
            Ok(name) => {
                let name = name.to_string();
                *submitting = true;
                *error = None;
                Some(name)
            }
            Err(e) => {
                *error = e.user_message();
                None
            }
        }
    }

    /// Applies the backend result: success closes and clears the dialog,
    /// failure keeps it open with the error shown.
    pub fn finish_dialog(&mut self, result: Result<(), String>) {
        let FolderDialog::Open {
            error, submitting, ..
        } = &mut self.dialog
        else {
            return;
        };
        match result {
            Ok(()) => self.dialog = FolderDialog::Closed,
            Err(message) => {
                *error = Some(message);
                *submitting = false;
            }
        }
    }

    pub fn cancel_dialog(&mut self) {
        self.dialog = FolderDialog::Closed;
    }

    // ------------------------------------------------------------------
    // Preview session
    // ------------------------------------------------------------------

    pub fn preview(&self) -> Option<&PreviewSession> {
        self.preview.as_ref()
    }

    /// Opens (or replaces) the preview with a fresh gesture session.
    pub fn open_preview(&mut self, key: PreviewKey) {
        self.hide_menu();
        self.preview = Some(PreviewSession {
            key,
            zoom: ZoomPanSession::new(),
        });
    }

    /// Closes the preview, tearing down its gesture session.
    pub fn close_preview(&mut self) -> Option<PreviewKey> {
        self.preview.take().map(|p| p.key)
    }

    pub fn zoom_mut(&mut self) -> Option<&mut ZoomPanSession> {
        self.preview.as_mut().map(|p| &mut p.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RemotePath;

    fn bounds() -> Bounds {
        Bounds {
            left: 100.0,
            top: 100.0,
            width: 120.0,
            height: 60.0,
        }
    }

    #[test]
    fn test_menu_open_and_click_outside() {
        let mut ui = InteractionController::new();
        ui.open_menu("a.txt", EntryKind::File, Point::new(110.0, 110.0));
        assert!(ui.listeners().click_outside);

        // inside: stays open
        assert!(!ui.click_at(Point::new(150.0, 120.0), Some(bounds())));
        assert!(ui.menu().is_visible());

        // outside: hidden, listener no longer wanted
        assert!(ui.click_at(Point::new(10.0, 10.0), Some(bounds())));
        assert_eq!(ui.menu(), &ContextMenu::Hidden);
        assert!(!ui.listeners().click_outside);
    }

    #[test]
    fn test_click_without_bounds_hides() {
        let mut ui = InteractionController::new();
        ui.open_menu("Docs", EntryKind::Folder, Point::default());
        assert!(ui.click_at(Point::new(1.0, 1.0), None));
    }

    #[test]
    fn test_choose_returns_target_and_hides() {
        let mut ui = InteractionController::new();
        ui.open_menu("Old", EntryKind::Folder, Point::default());
        let target = ui.choose(MenuAction::Delete).unwrap();
        assert_eq!(target.name, "Old");
        assert_eq!(target.kind, EntryKind::Folder);
        assert!(!ui.menu().is_visible());
        assert_eq!(ui.choose(MenuAction::Delete), None);
    }

    #[test]
    fn test_download_of_folder_refused() {
        let mut ui = InteractionController::new();
        ui.open_menu("Docs", EntryKind::Folder, Point::default());
        assert_eq!(ui.choose(MenuAction::Download), None);
        assert!(!ui.menu().is_visible());
    }

    #[test]
    fn test_dialog_validation_stays_open() {
        let mut ui = InteractionController::new();
        ui.open_dialog();
        ui.set_draft("   ");
        assert_eq!(ui.submit_dialog(), None);
        match ui.dialog() {
            FolderDialog::Open { error, submitting, .. } => {
                assert!(error.is_some());
                assert!(!submitting);
            }
            FolderDialog::Closed => panic!("dialog closed on validation error"),
        }
    }

    #[test]
    fn test_dialog_success_closes_and_clears() {
        let mut ui = InteractionController::new();
        ui.open_dialog();
        ui.set_draft(" Photos ");
        assert_eq!(ui.submit_dialog().as_deref(), Some("Photos"));
        // double submit blocked while in flight
        assert_eq!(ui.submit_dialog(), None);

        ui.finish_dialog(Ok(()));
        assert_eq!(ui.dialog(), &FolderDialog::Closed);

        ui.open_dialog();
        assert_eq!(
            ui.dialog(),
            &FolderDialog::Open {
                draft: String::new(),
                error: None,
                submitting: false
            }
        );
    }

    #[test]
    fn test_dialog_failure_keeps_draft() {
        let mut ui = InteractionController::new();
        ui.open_dialog();
        ui.set_draft("Docs");
        ui.submit_dialog();
        ui.finish_dialog(Err("'Docs' already exists".to_string()));
        assert_eq!(
            ui.dialog(),
            &FolderDialog::Open {
                draft: "Docs".to_string(),
                error: Some("'Docs' already exists".to_string()),
                submitting: false
            }
        );
    }

    #[test]
    fn test_second_preview_resets_zoom() {
        let mut ui = InteractionController::new();
        ui.open_preview(PreviewKey::new(RemotePath::root(), "a.png"));
        let zoom = ui.zoom_mut().unwrap();
        zoom.click();
        zoom.pointer_down(Point::new(0.0, 0.0));
        zoom.pointer_move(Point::new(30.0, 20.0));
        assert!(ui.listeners().drag);

        ui.open_preview(PreviewKey::new(RemotePath::root(), "b.png"));
        let session = ui.preview().unwrap();
        assert_eq!(session.key().name, "b.png");
        assert_eq!(session.zoom(), &ZoomPanSession::new());
        assert!(!ui.listeners().drag);
    }

    #[test]
    fn test_close_preview_tears_down() {
        let mut ui = InteractionController::new();
        ui.open_preview(PreviewKey::new(RemotePath::root(), "a.png"));
        ui.zoom_mut().unwrap().click();
        let key = ui.close_preview().unwrap();
        assert_eq!(key.name, "a.png");
        assert!(ui.preview().is_none());
        assert!(ui.zoom_mut().is_none());
        assert_eq!(ui.listeners(), ListenerSet::default());
    }
}
