//! Browser-independent logic of the file browser.
//!
//! This module provides:
//! - [`FileBrowser`], the state machine behind the dashboard
//! - [`client::RemoteDirectoryClient`] over a pluggable [`client::Transport`]
//! - [`Session`], which drives both from user intents

mod browser;
pub mod client;
pub mod error;
pub mod interaction;
mod path_model;
pub mod preview_cache;
mod session;
mod upload;
pub mod zoom_pan;

pub use browser::{FileBrowser, ListingView};
pub use error::BrowserError;
pub use interaction::{FolderDialog, MenuAction};
pub use preview_cache::PreviewStatus;
pub use session::{BrowserStore, Host, Session};
