//! Player lookup endpoints
//!
//! Backend failures end the request with one readable message; a partial
//! summary is never returned.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dogtag_common::{alias, normalize, ProfileSummary};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::janus::BackendError;
use crate::AppState;

/// Body for POST /api/search
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub dogtag: String,
}

/// Lookup result
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub dogtag: String,
    pub profile: ProfileSummary,
}

/// Alias preview result
#[derive(Debug, Serialize)]
pub struct AliasResponse {
    pub dogtag: String,
    pub alias: String,
}

/// POST /api/search
///
/// Body: `{"dogtag": "..."}`
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<LookupResponse>, LookupError> {
    lookup(&state, &request.dogtag).await
}

/// GET /api/profile/:dogtag
pub async fn get_profile(
    State(state): State<AppState>,
    Path(dogtag): Path<String>,
) -> Result<Json<LookupResponse>, LookupError> {
    lookup(&state, &dogtag).await
}

/// GET /api/alias/:dogtag
///
/// Shows the alias a dogtag encodes to, without contacting the backend.
pub async fn get_alias(
    State(state): State<AppState>,
    Path(dogtag): Path<String>,
) -> Result<Json<AliasResponse>, LookupError> {
    let dogtag = validate_dogtag(&dogtag)?;
    Ok(Json(AliasResponse {
        alias: alias::encode(&state.tables, dogtag),
        dogtag: dogtag.to_string(),
    }))
}

async fn lookup(state: &AppState, dogtag: &str) -> Result<Json<LookupResponse>, LookupError> {
    let dogtag = validate_dogtag(dogtag)?;

    let raw = state.source.lookup(dogtag).await.map_err(|e| {
        warn!(dogtag = %dogtag, error = %e, "Lookup failed");
        LookupError::Backend(e)
    })?;

    let profile = normalize(&state.tables, &raw);

    info!(
        dogtag = %dogtag,
        clan = %profile.clan_name,
        vip = %profile.vip_level,
        "Lookup complete"
    );

    Ok(Json(LookupResponse {
        dogtag: dogtag.to_string(),
        profile,
    }))
}

fn validate_dogtag(dogtag: &str) -> Result<&str, LookupError> {
    let dogtag = dogtag.trim();
    if dogtag.is_empty() {
        return Err(LookupError::EmptyDogtag);
    }
    Ok(dogtag)
}

/// Lookup errors
#[derive(Debug)]
pub enum LookupError {
    EmptyDogtag,
    Backend(BackendError),
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            LookupError::EmptyDogtag => {
                (StatusCode::BAD_REQUEST, "Please enter a dogtag.".to_string())
            }
            LookupError::Backend(e @ BackendError::InvalidAlias(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            LookupError::Backend(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
