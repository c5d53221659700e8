//! Configuration loading
//!
//! Resolution order:
//! 1. Explicit config file path (command line or `DOGTAG_CONFIG`)
//! 2. Per-user config file (`~/.config/dogtag/config.toml` on Linux)
//! 3. Compiled defaults
//!
//! A missing or broken per-user file is not fatal: the service logs a
//! warning and starts on defaults. An explicitly named file must load.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::weapons::CodeEntry;
use crate::{Error, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5780;
pub const DEFAULT_JANUS_URL: &str = "https://eur-janus.gameloft.com";
pub const DEFAULT_PORTAL_URL: &str = "https://app-3cdbc976-9a98-43d5-a41d-7d9503b36247.gold0009.gameloft.com/1924/190/public/OfficialScripts/mc5Portal.wsgi";
pub const DEFAULT_PANDORA_URL: &str = "https://vgold-eur.gameloft.com";
pub const DEFAULT_CLIENT_ID: &str = "1875:55979:5.9.2a:windows:windows";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Service configuration (TOML)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Authorization and alias service base URL
    pub janus_url: String,
    /// Batch profile script URL
    pub portal_url: String,
    /// Base URL combined with the client id for the `pandora` field
    pub pandora_url: String,
    pub client_id: String,
    /// Per-request timeout for backend calls
    pub request_timeout_secs: u64,
    /// Extra weapon codes, checked after the built-in ones
    pub weapon: Vec<CodeEntry>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            janus_url: DEFAULT_JANUS_URL.to_string(),
            portal_url: DEFAULT_PORTAL_URL.to_string(),
            pandora_url: DEFAULT_PANDORA_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            weapon: Vec::new(),
        }
    }
}

impl ServiceConfig {
    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(Error::Config("request_timeout_secs must be positive".to_string()));
        }
        if let Some(entry) = self.weapon.iter().find(|e| e.prefix.is_empty()) {
            return Err(Error::Config(format!(
                "Weapon entry '{}' has an empty prefix",
                entry.name
            )));
        }
        Ok(())
    }
}

/// Per-user config file location, if the platform has one
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("dogtag").join("config.toml"))
}

/// Load configuration following the resolution order above
pub fn load_config(explicit: Option<&Path>) -> Result<ServiceConfig> {
    // Priority 1: explicitly named file
    if let Some(path) = explicit {
        info!("Loading config from {}", path.display());
        return ServiceConfig::from_file(path).map_err(|e| {
            Error::Config(format!("Failed to load {}: {}", path.display(), e))
        });
    }

    // Priority 2: per-user config file
    if let Some(path) = default_config_path().filter(|p| p.exists()) {
        match ServiceConfig::from_file(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                return Ok(config);
            }
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
            }
        }
    }

    // Priority 3: compiled defaults
    Ok(ServiceConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_toml_is_default() {
        let config = ServiceConfig::from_toml("").unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServiceConfig::from_toml(
            r#"
            port = 8080

            [[weapon]]
            prefix = "HG01"
            name = "Sidearm"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.client_id, DEFAULT_CLIENT_ID);
        assert_eq!(config.weapon.len(), 1);
        assert_eq!(config.weapon[0].name, "Sidearm");
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let result = ServiceConfig::from_toml("request_timeout_secs = 0");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_empty_weapon_prefix() {
        let result = ServiceConfig::from_toml("[[weapon]]\nprefix = \"\"\nname = \"X\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(ServiceConfig::from_toml("port = \"high\""), Err(Error::Toml(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host = \"0.0.0.0\"").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(load_config(Some(&missing)), Err(Error::Config(_))));
    }
}
