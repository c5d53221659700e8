//! Service status endpoints: liveness and build identification
//!
//! Neither route contacts the game backend.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

const MODULE: &str = "dogtag-web";

/// GET /health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    /// Weapon codes the translator knows, config extras included
    pub weapon_codes: usize,
}

/// GET /api/buildinfo response, filled from build.rs
#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub module: &'static str,
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            module: MODULE,
            version: env!("CARGO_PKG_VERSION"),
            git_hash: env!("GIT_HASH"),
            build_timestamp: env!("BUILD_TIMESTAMP"),
            build_profile: env!("BUILD_PROFILE"),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        module: MODULE,
        version: env!("CARGO_PKG_VERSION"),
        weapon_codes: state.tables.weapons.entries().len(),
    })
}

pub async fn get_build_info() -> Json<BuildInfo> {
    Json(BuildInfo::current())
}

/// `/health` and `/api/buildinfo`
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/buildinfo", get(get_build_info))
}
