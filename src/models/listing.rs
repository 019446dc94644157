//! Directory listing types returned by the backend.

use serde::Deserialize;

use crate::config::IMAGE_EXTENSIONS;

/// Kind of a listed entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Folder,
}

impl EntryKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
        }
    }
}

/// Folders and files at one path.
///
/// Folder names are unique; the backend order is kept for display.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct DirectoryListing {
    pub folders: Vec<String>,
    pub files: Vec<String>,
}

impl DirectoryListing {
    pub fn new<F, G>(folders: F, files: G) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        G: IntoIterator,
        G::Item: Into<String>,
    {
        Self {
            folders: folders.into_iter().map(Into::into).collect(),
            files: files.into_iter().map(Into::into).collect(),
        }
        .normalized()
    }

    /// Drops duplicate folder names (first occurrence wins) and empty names.
    pub fn normalized(mut self) -> Self {
        let mut seen = std::collections::HashSet::new();
        self.folders
            .retain(|name| !name.is_empty() && seen.insert(name.clone()));
        self.files.retain(|name| !name.is_empty());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }

    /// File names that have a previewable image extension, in listing order.
    pub fn image_files(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .map(String::as_str)
            .filter(|name| is_image_name(name))
    }
}

/// Whether `name` ends in one of the previewable image extensions
/// (case-insensitive).
pub fn is_image_name(name: &str) -> bool {
    let Some((stem, ext)) = name.rsplit_once('.') else {
        return false;
    };
    !stem.is_empty()
        && IMAGE_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
}
