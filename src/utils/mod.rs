//! Browser-facing glue around the core.
//!
//! Provides:
//! - [`WebTransport`] - gloo-net transport with request timeout
//! - [`ObjectUrlStore`] - object URLs for preview images
//! - [`WebSession`] - session bound to the page and localStorage
//! - [`dom`] helpers for storage, downloads and document listeners

mod blob;
pub mod dom;
mod fetch;
mod host;

pub use blob::ObjectUrlStore;
pub use fetch::WebTransport;
pub use host::{WebHost, WebSession};
