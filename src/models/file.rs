//! In-memory file payloads moving between the browser and the backend.

/// A local file picked for upload, already read into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl LocalFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Bytes of a downloaded file plus the name to save it under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadedFile {
    pub filename: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Raw image bytes returned by the preview endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewBlob {
    pub mime: String,
    pub bytes: Vec<u8>,
}
