//! Configuration system (layered: code > env > config file).

pub mod credentials;

pub use credentials::Credentials;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TranslateError};

pub const DEFAULT_BASE_URL: &str = "http://api.microsofttranslator.com/v2/Http.svc";

/// Variables that select credentials from the environment.
const CREDENTIAL_VARS: [&str; 3] = [
    "MSTRANSLATE_SUBSCRIPTION_KEY",
    "MSTRANSLATE_CLIENT_ID",
    "MSTRANSLATE_CLIENT_SECRET",
];

/// Everything needed to build a [`crate::Translator`].
///
/// # Example
/// ```
/// use mstranslate::config::{Credentials, TranslatorConfig};
///
/// let config = TranslatorConfig::new(Credentials::subscription_key("key"))
///     .with_base_url("http://localhost:9000/v2/Http.svc")
///     .with_timeout_secs(30);
/// assert_eq!(config.timeout_secs, Some(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    pub credentials: Credentials,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout for a dedicated client. `None` uses the shared client.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl TranslatorConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Load from environment variables (`MSTRANSLATE_*`), reading `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// `MSTRANSLATE_SUBSCRIPTION_KEY` wins over the client id/secret pair
    /// when both are present.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut credentials = if let Some(key) = var("MSTRANSLATE_SUBSCRIPTION_KEY") {
            Credentials::subscription_key(key)
        } else {
            match (var("MSTRANSLATE_CLIENT_ID"), var("MSTRANSLATE_CLIENT_SECRET")) {
                (Some(id), Some(secret)) => Credentials::client_credentials(id, secret),
                (Some(_), None) => {
                    return Err(TranslateError::Configuration(
                        "MSTRANSLATE_CLIENT_SECRET is required with MSTRANSLATE_CLIENT_ID"
                            .to_string(),
                    ))
                }
                _ => {
                    return Err(TranslateError::Configuration(
                        "set MSTRANSLATE_SUBSCRIPTION_KEY or MSTRANSLATE_CLIENT_ID and MSTRANSLATE_CLIENT_SECRET"
                            .to_string(),
                    ))
                }
            }
        };

        if let Some(url) = var("MSTRANSLATE_AUTH_URL") {
            credentials = credentials.with_auth_url(url);
        }
        if let Some(scope) = var("MSTRANSLATE_SCOPE") {
            credentials = credentials.with_scope(scope);
        }
        if let Some(grant_type) = var("MSTRANSLATE_GRANT_TYPE") {
            credentials = credentials.with_grant_type(grant_type);
        }

        let mut config = Self::new(credentials);
        if let Some(url) = var("MSTRANSLATE_BASE_URL") {
            config.base_url = url;
        }
        if let Some(raw) = var("MSTRANSLATE_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                TranslateError::Configuration(format!(
                    "MSTRANSLATE_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}"
                ))
            })?;
            config.timeout_secs = Some(secs);
        }
        Ok(config)
    }

    /// Default config file path (~/.mstranslate/config.toml).
    pub fn default_config_path() -> PathBuf {
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".mstranslate"))
            .unwrap_or_else(|| PathBuf::from(".mstranslate"))
            .join("config.toml")
    }

    /// Load from the default config file path.
    pub fn load_default() -> Result<Self> {
        Self::load_from_path(Self::default_config_path())
    }

    /// Load from a TOML file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                TranslateError::Configuration(format!("config file {} not found", path.display()))
            } else {
                TranslateError::Io(err)
            }
        })?;
        let config: Self = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Environment first, then the default config file.
    ///
    /// The file is consulted only when no credential variable is set at all;
    /// a partial or malformed environment is reported as is.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::load_with(|name| std::env::var(name).ok(), Self::default_config_path())
    }

    /// [`load`](Self::load) with an explicit variable lookup and file path.
    pub fn load_with(
        lookup: impl Fn(&str) -> Option<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let has_credentials = CREDENTIAL_VARS
            .iter()
            .any(|name| lookup(name).is_some_and(|value| !value.trim().is_empty()));
        if has_credentials || !path.exists() {
            return Self::from_lookup(lookup);
        }
        tracing::debug!(path = %path.display(), "no credentials in environment, using config file");
        Self::load_from_path(path)
    }

    /// HTTP client for this config: shared, or dedicated when a timeout is set.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        match self.timeout_secs {
            Some(secs) => crate::http::build_client(Duration::from_secs(secs)),
            None => Ok(crate::http::shared_client()?.clone()),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
