//! Object URLs for preview images.

use web_sys::Url;

use crate::core::preview_cache::{BlobStore, PreviewHandle};
use crate::models::PreviewBlob;
use crate::utils::fetch::bytes_to_blob;

/// [`BlobStore`] backed by `URL.createObjectURL`.
///
/// Holds no JS values itself; handles are plain URL strings, so the store is
/// trivially `Send + Sync`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjectUrlStore;

impl BlobStore for ObjectUrlStore {
    fn acquire(&self, blob: &PreviewBlob) -> Option<PreviewHandle> {
        let js_blob = bytes_to_blob(&blob.bytes, &blob.mime)
            .inspect_err(|e| tracing::warn!("preview blob rejected: {:?}", e))
            .ok()?;
        Url::create_object_url_with_blob(&js_blob)
            .map(PreviewHandle::new)
            .ok()
    }

    fn release(&self, handle: PreviewHandle) {
        if Url::revoke_object_url(handle.url()).is_err() {
            tracing::debug!("revoking {} failed", handle.url());
        }
    }
}
