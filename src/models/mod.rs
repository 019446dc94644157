//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`RemotePath`] - Structured location in the remote store
//! - [`DirectoryListing`], [`EntryKind`] - Backend listing of one folder
//! - [`Credential`] - Bearer token and username from the login flow
//! - [`LocalFile`], [`DownloadedFile`], [`PreviewBlob`] - File payloads

mod credential;
mod file;
mod listing;
mod path;

pub use credential::Credential;
pub use file::{DownloadedFile, LocalFile, PreviewBlob};
pub use listing::{DirectoryListing, EntryKind, is_image_name};
pub use path::RemotePath;
