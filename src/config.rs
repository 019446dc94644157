//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the toolbar.
pub const APP_NAME: &str = "Nebula Cloud";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Backend Configuration
// =============================================================================

/// Base URL of the file store API.
///
/// Override at build time with `NEBULA_API_URL=https://... trunk build`.
pub const API_BASE_URL: &str = match option_env!("NEBULA_API_URL") {
    Some(url) => url,
    None => "http://127.0.0.1:5000",
};

/// Backend endpoint paths (relative to [`API_BASE_URL`]).
pub mod endpoints {
    pub const LIST: &str = "/list";
    pub const UPLOAD: &str = "/upload";
    pub const CREATE_FOLDER: &str = "/create_folder";
    pub const DELETE: &str = "/delete";
    pub const DOWNLOAD: &str = "/download";
    pub const PREVIEW: &str = "/preview";
}

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: u32 = 10_000;

// =============================================================================
// Authentication
// =============================================================================

/// Where the browser is sent when no usable credential exists.
pub const LOGIN_URL: &str = "/login";

/// localStorage keys written by the login flow.
pub mod storage {
    /// Bearer token.
    pub const TOKEN_KEY: &str = "access_token";
    /// Display username.
    pub const USERNAME_KEY: &str = "username";
}

// =============================================================================
// Preview Configuration
// =============================================================================

/// File extensions treated as previewable images (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif"];

/// Magnification applied when a preview image is clicked.
pub const PREVIEW_ZOOM: f64 = 2.0;

// =============================================================================
// Logging
// =============================================================================

/// Console log level.
pub const LOG_LEVEL: tracing::Level = if cfg!(debug_assertions) {
    tracing::Level::DEBUG
} else {
    tracing::Level::INFO
};

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;
