//! HTTP API handlers for dogtag-web

pub mod health;
pub mod lookup;
pub mod ui;

pub use health::health_routes;
pub use lookup::{get_alias, get_profile, search};
pub use ui::ui_routes;
