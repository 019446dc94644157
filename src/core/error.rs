//! Error types for the file browser.
//!
//! - [`FetchError`] - Transport-level failures while talking HTTP
//! - [`BrowserError`] - Normalized outcome of a backend operation, the only
//!   error type the state machine and the UI ever see

use thiserror::Error;

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Failed to create HTTP request
    #[error("Failed to create request: {0}")]
    RequestCreationFailed(String),
    /// Network request failed (CORS, connection refused, ...)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

/// Normalized error taxonomy for backend operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrowserError {
    /// Token missing or rejected. Handled by redirecting, never shown as text.
    #[error("Authentication required")]
    AuthRequired,
    /// Target path or file does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
    /// An entry with the requested name already exists.
    #[error("'{0}' already exists")]
    Conflict(String),
    /// Input rejected before (or by) the backend.
    #[error("{0}")]
    Validation(String),
    /// Preview requested for something that is not a supported image.
    #[error("Preview not available for {0}")]
    UnsupportedType(String),
    /// Network or server failure.
    #[error("{0}")]
    Transport(String),
}

impl BrowserError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthRequired)
    }

    /// Message for the UI, or `None` when the error is handled by redirecting.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::AuthRequired => None,
            Self::Transport(detail) => Some(format!("Something went wrong: {}", detail)),
            other => Some(other.to_string()),
        }
    }
}

impl From<FetchError> for BrowserError {
    fn from(err: FetchError) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_has_no_user_message() {
        assert!(BrowserError::AuthRequired.is_auth());
        assert_eq!(BrowserError::AuthRequired.user_message(), None);
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            BrowserError::Conflict("Docs".into()).user_message().as_deref(),
            Some("'Docs' already exists")
        );
        assert_eq!(
            BrowserError::validation("Folder name cannot be empty")
                .user_message()
                .as_deref(),
            Some("Folder name cannot be empty")
        );
        assert_eq!(
            BrowserError::from(FetchError::Timeout).user_message().as_deref(),
            Some("Something went wrong: Request timed out")
        );
    }
}
