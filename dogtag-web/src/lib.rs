//! dogtag-web library - player lookup service
//!
//! Serves the lookup page and a JSON API. Each lookup runs the backend
//! calls through a [`ProfileSource`] and normalizes the raw profile with
//! the shared lookup tables.

use std::sync::Arc;

use axum::Router;
use dogtag_common::LookupTables;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod janus;

pub use janus::{BackendError, JanusClient, ProfileSource};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Immutable tables built at startup
    pub tables: Arc<LookupTables>,
    /// Backend used to fetch raw profiles
    pub source: Arc<dyn ProfileSource>,
}

impl AppState {
    /// Create new application state
    pub fn new(tables: Arc<LookupTables>, source: Arc<dyn ProfileSource>) -> Self {
        Self { tables, source }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let lookup_routes = Router::new()
        .route("/api/search", post(api::search))
        .route("/api/profile/:dogtag", get(api::get_profile))
        .route("/api/alias/:dogtag", get(api::get_alias));

    Router::new()
        .merge(lookup_routes)
        .merge(api::health_routes())
        .merge(api::ui_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
