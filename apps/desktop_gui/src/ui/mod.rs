//! UI layer for desktop GUI: app shell, panels, and their rendering helpers.

pub mod app;
pub mod markdown;
pub mod panels;
pub mod theme;

pub use app::{DesktopGuiApp, StartupConfig};
