//! HTTP API handlers for demo-fn

pub mod buildinfo;
pub mod classify;
pub mod health;
pub mod ui;

pub use classify::classify_routes;
pub use health::health_routes;
pub use ui::ui_routes;
