use reqwest::{Method, StatusCode};
use watson_domain::DecodeError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid service URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to serialize request body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("{method} {url} failed: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Service responded with {status}: {message}")]
    Service {
        status: StatusCode,
        message: String,
        body: String,
    },

    #[error("Service responded with {status} but the body could not be decoded: {source}")]
    Decode {
        status: StatusCode,
        body: String,
        #[source]
        source: DecodeError,
    },
}

impl Error {
    pub(crate) fn missing(name: &str) -> Self {
        Self::InvalidArgument(format!("`{name}` must not be empty"))
    }

    /// HTTP status of the response this error came from, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Service { status, .. } | Self::Decode { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status(),
            _ => None,
        }
    }
}
