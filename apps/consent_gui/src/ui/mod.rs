//! UI layer: app shell, screens and the light card theme.

pub mod app;
pub mod theme;

pub use app::ConsentApp;
