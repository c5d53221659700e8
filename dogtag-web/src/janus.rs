//! Game backend client
//!
//! Three calls per lookup: anonymous authorization, alias to credential
//! resolution, then a batch profile fetch for that credential. No retries,
//! no caching; any failure aborts the lookup.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dogtag_common::config::ServiceConfig;
use dogtag_common::{alias, LookupTables};
use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

const AUTH_SCOPE: &str = "alert auth leaderboard_ro lobby message social chat session";
const PROFILE_FIELDS: &str = "_game_save,inventory";

/// Backend client errors
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend returned {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Backend response has no '{0}' field")]
    MissingField(&'static str),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Dogtag does not map to a usable alias: {0:?}")]
    InvalidAlias(String),
}

/// Anything that can turn a dogtag into a raw profile
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn lookup(&self, dogtag: &str) -> Result<Value, BackendError>;
}

/// Throwaway device identity used for anonymous authorization
#[derive(Debug, Clone)]
pub struct AnonymousCredentials {
    pub username: String,
    pub password: String,
    pub device_id: String,
}

impl AnonymousCredentials {
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let user_len = rng.gen_range(9..=12);
        let pass_len = rng.gen_range(10..=40);
        Self {
            username: format!("anonymous:{}", random_alphanumeric(rng, user_len)),
            password: random_alphanumeric(rng, pass_len),
            device_id: rng.gen_range(1_000_000_000u64..=9_999_999_999).to_string(),
        }
    }
}

fn random_alphanumeric<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

/// Janus authorization/alias service plus the profile portal
pub struct JanusClient {
    http_client: reqwest::Client,
    janus_url: Url,
    portal_url: String,
    pandora_url: String,
    client_id: String,
    tables: Arc<LookupTables>,
}

impl JanusClient {
    pub fn new(
        config: &ServiceConfig,
        tables: Arc<LookupTables>,
    ) -> Result<Self, BackendError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let janus_url = Url::parse(&config.janus_url)
            .map_err(|e| BackendError::InvalidUrl(format!("{}: {}", config.janus_url, e)))?;
        if janus_url.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl(config.janus_url.clone()));
        }

        Ok(Self {
            http_client,
            janus_url,
            portal_url: config.portal_url.clone(),
            pandora_url: config.pandora_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            tables,
        })
    }

    /// Obtain an access token for a fresh anonymous identity
    pub async fn authenticate(&self) -> Result<String, BackendError> {
        let creds = AnonymousCredentials::generate(&mut rand::thread_rng());
        let url = self.janus_endpoint(&["authorize"])?;

        debug!(url = %url, username = %creds.username, "Requesting access token");

        let form = [
            ("client_id", self.client_id.as_str()),
            ("username", creds.username.as_str()),
            ("password", creds.password.as_str()),
            ("scope", AUTH_SCOPE),
            ("device_id", creds.device_id.as_str()),
            ("for_credential_type", "anonymous"),
            ("device_country", "EN"),
            ("device_language", "en"),
            ("device_model", "Pixel"),
            ("device_resolution", "1920x1080"),
        ];

        let body: Value = self
            .read_json(self.http_client.post(url).header("Accept", "*/*").form(&form))
            .await?;

        string_field(&body, "access_token")
    }

    /// Resolve an alias to the player's credential
    ///
    /// The alias is sent as a single percent-encoded path segment.
    pub async fn resolve_alias(&self, alias: &str, access_token: &str) -> Result<String, BackendError> {
        if matches!(alias, "" | "." | "..") {
            return Err(BackendError::InvalidAlias(alias.to_string()));
        }
        let url = self.janus_endpoint(&["games", "mygame", "alias", alias])?;

        debug!(url = %url, "Resolving alias");

        let body: Value = self
            .read_json(
                self.http_client
                    .get(url)
                    .header("Accept", "*/*")
                    .query(&[("access_token", access_token)]),
            )
            .await?;

        string_field(&body, "credential")
    }

    /// Fetch the raw profile stored under a credential
    ///
    /// An answer without an entry for the credential yields an empty object.
    pub async fn fetch_profile(&self, credential: &str) -> Result<Value, BackendError> {
        let pandora = format!("{}/{}", self.pandora_url, self.client_id);
        let form = [
            ("op_code", "get_batch_profiles"),
            ("client_id", self.client_id.as_str()),
            ("credentials", credential),
            ("pandora", pandora.as_str()),
            ("include_fields", PROFILE_FIELDS),
        ];

        debug!(url = %self.portal_url, "Fetching batch profile");

        let mut body: Map<String, Value> = self
            .read_json(
                self.http_client
                    .post(&self.portal_url)
                    .header("Accept", "*/*")
                    .form(&form),
            )
            .await?;

        Ok(body
            .remove(credential)
            .unwrap_or_else(|| Value::Object(Map::new())))
    }

    /// Janus base URL with `segments` appended, each one encoded
    fn janus_endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.janus_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl(self.janus_url.to_string()))?
            .pop_if_empty()
            .extend(segments.iter().copied());
        Ok(url)
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(BackendError::Api(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }
}

#[async_trait]
impl ProfileSource for JanusClient {
    async fn lookup(&self, dogtag: &str) -> Result<Value, BackendError> {
        let alias = alias::encode(&self.tables, dogtag);
        let token = self.authenticate().await?;
        let credential = self.resolve_alias(&alias, &token).await?;
        debug!(dogtag = %dogtag, alias = %alias, "Alias resolved");
        self.fetch_profile(&credential).await
    }
}

fn string_field(body: &Value, field: &'static str) -> Result<String, BackendError> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(BackendError::MissingField(field))
}
