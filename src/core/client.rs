//! Backend calls and response normalization.
//!
//! [`RemoteDirectoryClient`] builds one [`ApiRequest`] per operation, hands it to
//! a [`Transport`] and folds the raw [`ApiResponse`] into either a typed value or
//! a [`BrowserError`]. The transport only moves bytes; every status-code decision
//! lives here so it can be tested without a browser.

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::config::endpoints;
use crate::core::error::{BrowserError, FetchError};
use crate::models::{
    Credential, DirectoryListing, DownloadedFile, LocalFile, PreviewBlob, RemotePath,
    is_image_name,
};

/// HTTP method of a backend call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// Request payload.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// `multipart/form-data` with plain text fields and `file` parts.
    Multipart {
        fields: Vec<(&'static str, String)>,
        files: Vec<LocalFile>,
    },
}

/// Transport-agnostic description of one backend call.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: &'static str,
    pub query: Vec<(&'static str, String)>,
    /// Value of the `Authorization` header.
    pub authorization: String,
    pub body: RequestBody,
}

/// Raw backend reply.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// `message` or `error` field of a JSON error body, if any.
    fn server_message(&self) -> Option<String> {
        let value: serde_json::Value = self.json().ok()?;
        ["message", "error"]
            .iter()
            .find_map(|key| value.get(key)?.as_str().map(str::to_string))
            .filter(|msg| !msg.trim().is_empty())
    }
}

/// Moves an [`ApiRequest`] to the backend and returns whatever came back.
///
/// Implementations must not interpret status codes.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, FetchError>;
}

/// Typed, credential-bound view of the backend.
pub struct RemoteDirectoryClient<'a, T> {
    transport: &'a T,
    credential: &'a Credential,
}

impl<'a, T: Transport> RemoteDirectoryClient<'a, T> {
    pub fn new(transport: &'a T, credential: &'a Credential) -> Self {
        Self {
            transport,
            credential,
        }
    }

    /// Lists folders and files at `path`.
    pub async fn list(&self, path: &RemotePath) -> Result<DirectoryListing, BrowserError> {
        let request = self.request(
            Method::Post,
            endpoints::LIST,
            RequestBody::Json(json!({ "path": path.display() })),
        );
        let response = self.call(request, &subject(path)).await?;
        response
            .json::<DirectoryListing>()
            .map(DirectoryListing::normalized)
            .map_err(|e| {
                tracing::warn!("malformed listing for '{}': {}", path, e);
                BrowserError::Transport("No folders or files found in this folder".to_string())
            })
    }

    /// Creates folder `name` inside `path`.
    pub async fn create_folder(&self, path: &RemotePath, name: &str) -> Result<(), BrowserError> {
        let name = validate_folder_name(name)?;
        let request = self.request(
            Method::Post,
            endpoints::CREATE_FOLDER,
            RequestBody::Json(json!({ "path": path.display(), "folder_name": name })),
        );
        self.call(request, name).await.map(drop)
    }

    /// Deletes the entry at `target` (the full child path, not just its name).
    pub async fn delete_entry(&self, target: &RemotePath) -> Result<(), BrowserError> {
        if target.is_root() {
            return Err(BrowserError::validation("The root folder cannot be deleted"));
        }
        let request = self.request(
            Method::Delete,
            endpoints::DELETE,
            RequestBody::Json(json!({ "path": target.display() })),
        );
        self.call(request, &subject(target)).await.map(drop)
    }

    /// Uploads `files` into `path` as a single multipart batch.
    pub async fn upload(&self, path: &RemotePath, files: Vec<LocalFile>) -> Result<(), BrowserError> {
        if files.is_empty() {
            return Err(BrowserError::validation("Select at least one file to upload"));
        }
        let request = self.request(
            Method::Post,
            endpoints::UPLOAD,
            RequestBody::Multipart {
                fields: vec![("path", path.display())],
                files,
            },
        );
        self.call(request, &subject(path)).await.map(drop)
    }

    /// Fetches the bytes of the file at `target` for saving.
    pub async fn download(&self, target: &RemotePath) -> Result<DownloadedFile, BrowserError> {
        let filename = target
            .name()
            .ok_or_else(|| BrowserError::validation("Nothing to download"))?
            .to_string();
        let mut request = self.request(Method::Get, endpoints::DOWNLOAD, RequestBody::Empty);
        request.query.push(("path", target.display()));
        let response = self.call(request, &subject(target)).await?;
        Ok(DownloadedFile {
            filename,
            mime: response
                .content_type
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            bytes: response.body,
        })
    }

    /// Fetches image bytes for the preview of `target`.
    pub async fn fetch_preview_blob(&self, target: &RemotePath) -> Result<PreviewBlob, BrowserError> {
        let name = target.name().unwrap_or_default();
        if !is_image_name(name) {
            return Err(BrowserError::UnsupportedType(name.to_string()));
        }
        let mut request = self.request(Method::Get, endpoints::PREVIEW, RequestBody::Empty);
        request.query.push(("path", target.display()));
        let response = self.call(request, name).await?;
        match response.content_type {
            Some(ref mime) if !mime.starts_with("image/") => {
                Err(BrowserError::UnsupportedType(name.to_string()))
            }
            mime => Ok(PreviewBlob {
                mime: mime.unwrap_or_else(|| "image/*".to_string()),
                bytes: response.body,
            }),
        }
    }

    fn request(&self, method: Method, endpoint: &'static str, body: RequestBody) -> ApiRequest {
        ApiRequest {
            method,
            endpoint,
            query: Vec::new(),
            authorization: self.credential.bearer(),
            body,
        }
    }

    async fn call(&self, request: ApiRequest, subject: &str) -> Result<ApiResponse, BrowserError> {
        let endpoint = request.endpoint;
        tracing::debug!("{:?} {} ({})", request.method, endpoint, subject);
        let response = self.transport.send(request).await.inspect_err(|e| {
            tracing::warn!("{} failed: {}", endpoint, e);
        })?;
        normalize(response, subject).inspect_err(|e| {
            tracing::warn!("{} rejected: {:?}", endpoint, e);
        })
    }
}

/// Maps a backend status code onto the error taxonomy.
fn normalize(response: ApiResponse, subject: &str) -> Result<ApiResponse, BrowserError> {
    match response.status {
        200..=299 => Ok(response),
        401 | 403 => Err(BrowserError::AuthRequired),
        404 => Err(BrowserError::NotFound(subject.to_string())),
        409 => Err(BrowserError::Conflict(subject.to_string())),
        400 | 422 => Err(BrowserError::Validation(
            response
                .server_message()
                .unwrap_or_else(|| "Request rejected by the server".to_string()),
        )),
        415 => Err(BrowserError::UnsupportedType(subject.to_string())),
        status => Err(BrowserError::Transport(format!(
            "server responded with status {}",
            status
        ))),
    }
}

/// Checks a new folder name and returns it trimmed.
pub fn validate_folder_name(name: &str) -> Result<&str, BrowserError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BrowserError::validation("Folder name cannot be empty"));
    }
    if name.contains('/') {
        return Err(BrowserError::validation("Folder name cannot contain '/'"));
    }
    Ok(name)
}

fn subject(path: &RemotePath) -> String {
    if path.is_root() {
        "/".to_string()
    } else {
        path.display()
    }
}
