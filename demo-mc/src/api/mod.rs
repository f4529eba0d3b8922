//! HTTP API handlers for demo-mc

pub mod buildinfo;
pub mod health;
pub mod options;
pub mod sessions;
pub mod tracks;
pub mod ui;

pub use health::health_routes;
pub use options::options_routes;
pub use sessions::session_routes;
pub use tracks::track_routes;
pub use ui::ui_routes;
