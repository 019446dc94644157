//! Batch uploads against the folder that was current at selection time.

use crate::core::error::BrowserError;
use crate::models::{LocalFile, RemotePath};

/// Lifecycle of one batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadState {
    Selected,
    InFlight,
    Succeeded,
    Failed,
}

/// A batch of local files plus the folder it targets.
#[derive(Debug)]
pub struct PendingUpload {
    id: u64,
    origin: RemotePath,
    files: Vec<LocalFile>,
    state: UploadState,
}

impl PendingUpload {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn origin(&self) -> &RemotePath {
        &self.origin
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(LocalFile::size).sum()
    }

    /// Moves the batch to in-flight and hands its files to the caller.
    pub fn submit(&mut self) -> Vec<LocalFile> {
        self.state = UploadState::InFlight;
        std::mem::take(&mut self.files)
    }
}

/// What the browser should do once a batch resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Success while the origin folder is still displayed.
    Refresh(RemotePath),
    /// Success after the user navigated away; nothing to refresh.
    Skipped,
    /// The batch failed; the listing is left untouched.
    Failed(BrowserError),
}

/// Creates and resolves upload batches. Never retries.
#[derive(Debug, Default)]
pub struct UploadCoordinator {
    next_id: u64,
    in_flight: Vec<u64>,
}

impl UploadCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a batch for `current`. Empty selections are rejected.
    pub fn prepare(
        &mut self,
        files: Vec<LocalFile>,
        current: &RemotePath,
    ) -> Result<PendingUpload, BrowserError> {
        if files.is_empty() {
            return Err(BrowserError::validation("Select at least one file to upload"));
        }
        self.next_id += 1;
        self.in_flight.push(self.next_id);
        Ok(PendingUpload {
            id: self.next_id,
            origin: current.clone(),
            files,
            state: UploadState::Selected,
        })
    }

    /// Records the backend result and decides on the refresh.
    ///
    /// A successful batch refreshes only if its origin is still `current`.
    pub fn resolve(
        &mut self,
        upload: &mut PendingUpload,
        result: Result<(), BrowserError>,
        current: &RemotePath,
    ) -> UploadOutcome {
        self.in_flight.retain(|id| *id != upload.id);
        match result {
            Ok(()) => {
                upload.state = UploadState::Succeeded;
                if &upload.origin == current {
                    UploadOutcome::Refresh(current.clone())
                } else {
                    tracing::info!(
                        "upload #{} into '{}' finished after navigating away",
                        upload.id,
                        upload.origin
                    );
                    UploadOutcome::Skipped
                }
            }
            Err(e) => {
                upload.state = UploadState::Failed;
                UploadOutcome::Failed(e)
            }
        }
    }

    /// Batches submitted and not yet resolved.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}
