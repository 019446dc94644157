//! Image preview cache scoped to the displayed folder.
//!
//! Handles are acquired from a [`BlobStore`] when a fetch completes and are
//! released when the cache moves to another folder, when it is cleared, or
//! when it is dropped. Results that arrive for a folder the cache no longer
//! serves are discarded without ever acquiring a handle.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::core::error::BrowserError;
use crate::models::{DirectoryListing, PreviewBlob, RemotePath, is_image_name};

/// Locally owned decoded image (an object URL in the browser).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewHandle(String);

impl PreviewHandle {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

/// Turns preview bytes into handles and frees them again.
pub trait BlobStore: Send + Sync {
    fn acquire(&self, blob: &PreviewBlob) -> Option<PreviewHandle>;
    fn release(&self, handle: PreviewHandle);
}

/// Cache key: the folder a file was listed in plus its name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PreviewKey {
    pub path: RemotePath,
    pub name: String,
}

impl PreviewKey {
    pub fn new(path: RemotePath, name: impl Into<String>) -> Self {
        Self {
            path,
            name: name.into(),
        }
    }

    /// Full path of the image file.
    pub fn target(&self) -> RemotePath {
        self.path.join(&self.name)
    }
}

/// Observable state of one key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewStatus {
    Missing,
    Pending,
    Ready,
    Failed,
}

enum Slot {
    Pending,
    Ready(PreviewHandle),
    Failed,
}

pub struct PreviewCache {
    scope: RemotePath,
    /// Bumped on every scope change, so leaving a folder and coming back
    /// yields a new generation.
    generation: u64,
    slots: HashMap<String, Slot>,
    store: Arc<dyn BlobStore>,
}

impl PreviewCache {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            scope: RemotePath::root(),
            generation: 0,
            slots: HashMap::new(),
            store,
        }
    }

    /// Folder whose previews the cache currently holds.
    pub fn scope(&self) -> &RemotePath {
        &self.scope
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Moves the cache to `path`, releasing every entry of the previous folder
    /// (ready, failed or still pending).
    pub fn rescope(&mut self, path: &RemotePath) {
        if &self.scope != path {
            self.clear();
            self.scope = path.clone();
            self.generation += 1;
        }
    }

    /// Releases every handle and forgets all pending fetches.
    pub fn clear(&mut self) {
        let released = self
            .slots
            .drain()
            .filter_map(|(_, slot)| match slot {
                Slot::Ready(handle) => Some(handle),
                _ => None,
            })
            .map(|handle| self.store.release(handle))
            .count();
        if released > 0 {
            tracing::debug!("released {} previews of '{}'", released, self.scope);
        }
    }

    /// Marks every image of `listing` that has never been requested as pending
    /// and returns the keys the caller must fetch.
    ///
    /// Entries that already failed are left alone; they only retry on an
    /// explicit [`PreviewCache::request`].
    pub fn request_listing(&mut self, path: &RemotePath, listing: &DirectoryListing) -> Vec<PreviewKey> {
        self.rescope(path);
        let mut keys = Vec::new();
        for name in listing.image_files() {
            if !self.slots.contains_key(name) {
                self.slots.insert(name.to_string(), Slot::Pending);
                keys.push(PreviewKey::new(path.clone(), name));
            }
        }
        keys
    }

    /// Requests a single preview. Returns `true` if the caller must fetch it,
    /// `false` if it is already ready, already in flight, out of scope or not
    /// an image.
    pub fn request(&mut self, key: &PreviewKey) -> bool {
        if key.path != self.scope || !is_image_name(&key.name) {
            return false;
        }
        match self.slots.get(&key.name) {
            Some(Slot::Pending | Slot::Ready(_)) => false,
            Some(Slot::Failed) | None => {
                self.slots.insert(key.name.clone(), Slot::Pending);
                true
            }
        }
    }

    /// Stores the result of a fetch. Returns `true` if it was applied.
    ///
    /// Results for another folder, or for keys that are no longer pending,
    /// are dropped.
    pub fn complete(&mut self, key: &PreviewKey, result: Result<PreviewBlob, BrowserError>) -> bool {
        if key.path != self.scope {
            tracing::debug!("discarding preview '{}' of stale folder '{}'", key.name, key.path);
            return false;
        }
        let Some(slot) = self.slots.get_mut(&key.name) else {
            return false;
        };
        if !matches!(slot, Slot::Pending) {
            return false;
        }
        *slot = match result.map(|blob| self.store.acquire(&blob)) {
            Ok(Some(handle)) => Slot::Ready(handle),
            Ok(None) => Slot::Failed,
            Err(e) => {
                tracing::debug!("preview '{}' unavailable: {}", key.name, e);
                Slot::Failed
            }
        };
        true
    }

    /// Handle for `name` in `path`, if ready. Never crosses folders.
    pub fn get(&self, path: &RemotePath, name: &str) -> Option<&PreviewHandle> {
        if path != &self.scope {
            return None;
        }
        match self.slots.get(name)? {
            Slot::Ready(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn status(&self, key: &PreviewKey) -> PreviewStatus {
        if key.path != self.scope {
            return PreviewStatus::Missing;
        }
        match self.slots.get(&key.name) {
            None => PreviewStatus::Missing,
            Some(Slot::Pending) => PreviewStatus::Pending,
            Some(Slot::Ready(_)) => PreviewStatus::Ready,
            Some(Slot::Failed) => PreviewStatus::Failed,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

impl Drop for PreviewCache {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for PreviewCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewCache")
            .field("scope", &self.scope)
            .field("entries", &self.slots.len())
            .finish()
    }
}
