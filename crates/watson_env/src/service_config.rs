use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{ConfigError, Environment, File, FileFormat};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{AuthType, HttpConfig};

/// Environment variable pointing at an explicit credentials file.
pub const CREDENTIALS_FILE_ENV: &str = "IBM_CREDENTIALS_FILE";

/// Credentials file looked up in the working directory when
/// [`CREDENTIALS_FILE_ENV`] is not set.
pub const DEFAULT_CREDENTIALS_FILE: &str = "ibm-credentials.env";

const DEFAULT_CONFIG: &str = include_str!("../defaults.json");

/// Connection and credential settings for one service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "snake_case")]
#[setters(strip_option, into)]
pub struct ServiceConfig {
    /// Base URL of the service instance. Each service falls back to its
    /// public endpoint when unset.
    pub url: Option<Url>,
    pub auth_type: AuthType,
    pub apikey: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub bearer_token: Option<String>,
    /// Skip TLS certificate verification.
    #[serde(default)]
    pub disable_ssl: bool,
    /// API version date sent with every request, e.g. `2020-04-01`.
    pub version: Option<String>,
    #[serde(default)]
    pub http: HttpConfig,
}

impl ServiceConfig {
    /// Loads the configuration of `service_name` (`assistant`,
    /// `text_to_speech`, ...).
    ///
    /// Sources, lowest precedence first:
    /// 1. Embedded defaults (`defaults.json`)
    /// 2. The credentials file named by `IBM_CREDENTIALS_FILE`, or
    ///    `./ibm-credentials.env` when present
    /// 3. Process environment variables
    ///
    /// Keys in the last two sources are prefixed with the upper-cased service
    /// name: `ASSISTANT_URL`, `ASSISTANT_AUTH_TYPE`, `ASSISTANT_APIKEY`,
    /// `ASSISTANT_HTTP__READ_TIMEOUT`.
    pub fn from_env(service_name: &str) -> Result<Self, ConfigError> {
        let credentials = match credentials_path() {
            Some(path) => read_credentials(&path)?,
            None => HashMap::new(),
        };

        Self::from_sources(service_name, credentials, None)
    }

    /// Builds the configuration from explicit sources. `env` replaces the
    /// process environment when given.
    pub fn from_sources(
        service_name: &str,
        credentials: HashMap<String, String>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let prefix = env_prefix(service_name);

        let config = config::Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Json))
            .add_source(prefixed(&prefix).source(Some(credentials)))
            .add_source(prefixed(&prefix).source(env))
            .build()?;

        let config: Self = config.try_deserialize()?;
        tracing::debug!(
            service = service_name,
            auth_type = %config.auth_type,
            url = ?config.url.as_ref().map(Url::as_str),
            "Loaded service configuration"
        );
        Ok(config)
    }
}

fn prefixed(prefix: &str) -> Environment {
    Environment::with_prefix(prefix)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// `text_to_speech` and `text-to-speech` both become `TEXT_TO_SPEECH`.
pub fn env_prefix(service_name: &str) -> String {
    service_name.to_ascii_uppercase().replace('-', "_")
}

fn credentials_path() -> Option<PathBuf> {
    match std::env::var_os(CREDENTIALS_FILE_ENV) {
        Some(path) => Some(PathBuf::from(path)),
        None => {
            let path = PathBuf::from(DEFAULT_CREDENTIALS_FILE);
            path.is_file().then_some(path)
        }
    }
}

/// Reads a dotenv-style credentials file without touching the process
/// environment.
pub fn read_credentials(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let iter =
        dotenvy::from_path_iter(path).map_err(|error| ConfigError::Foreign(Box::new(error)))?;

    let credentials = iter
        .collect::<Result<HashMap<_, _>, _>>()
        .map_err(|error| ConfigError::Foreign(Box::new(error)))?;

    tracing::debug!(path = %path.display(), keys = credentials.len(), "Read credentials file");
    Ok(credentials)
}
