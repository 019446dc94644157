//! UI components built with Leptos.
//!
//! - [`browser`] - File browser dashboard and its overlays
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod browser;
pub mod icons;

pub use browser::Dashboard;
