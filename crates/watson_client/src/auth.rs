use std::fmt::Debug;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use watson_env::{AuthType, ServiceConfig};

use crate::{Error, Result};

/// Adds credentials to outgoing requests.
pub trait Authenticator: Debug + Send + Sync {
    fn authenticate(&self, headers: &mut HeaderMap) -> Result<()>;
    fn auth_type(&self) -> AuthType;
}

/// Sends requests without credentials, e.g. to a local or proxied instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuthAuthenticator;

impl Authenticator for NoAuthAuthenticator {
    fn authenticate(&self, _headers: &mut HeaderMap) -> Result<()> {
        Ok(())
    }

    fn auth_type(&self) -> AuthType {
        AuthType::NoAuth
    }
}

#[derive(Clone)]
pub struct BasicAuthenticator {
    username: String,
    password: String,
}

impl BasicAuthenticator {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let password = password.into();
        validate_credential("username", &username)?;
        validate_credential("password", &password)?;
        Ok(Self { username, password })
    }
}

impl Debug for BasicAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthenticator")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Authenticator for BasicAuthenticator {
    fn authenticate(&self, headers: &mut HeaderMap) -> Result<()> {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        headers.insert(AUTHORIZATION, sensitive(&format!("Basic {encoded}"))?);
        Ok(())
    }

    fn auth_type(&self) -> AuthType {
        AuthType::Basic
    }
}

#[derive(Clone)]
pub struct BearerTokenAuthenticator {
    token: String,
}

impl BearerTokenAuthenticator {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        validate_credential("bearer_token", &token)?;
        Ok(Self { token })
    }
}

impl Debug for BearerTokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenAuthenticator").field("token", &"[REDACTED]").finish()
    }
}

impl Authenticator for BearerTokenAuthenticator {
    fn authenticate(&self, headers: &mut HeaderMap) -> Result<()> {
        headers.insert(AUTHORIZATION, sensitive(&format!("Bearer {}", self.token))?);
        Ok(())
    }

    fn auth_type(&self) -> AuthType {
        AuthType::BearerToken
    }
}

/// Builds the authenticator described by `config`.
///
/// `iam` with an API key is sent as basic credentials with the username
/// `apikey`, which every Watson endpoint accepts. Token exchange is not
/// performed.
pub fn authenticator_from_config(config: &ServiceConfig) -> Result<Arc<dyn Authenticator>> {
    let authenticator: Arc<dyn Authenticator> = match config.auth_type {
        AuthType::NoAuth => Arc::new(NoAuthAuthenticator),
        AuthType::Basic => Arc::new(BasicAuthenticator::new(
            required_credential("username", config.username.as_deref())?,
            required_credential("password", config.password.as_deref())?,
        )?),
        AuthType::BearerToken => Arc::new(BearerTokenAuthenticator::new(required_credential(
            "bearer_token",
            config.bearer_token.as_deref(),
        )?)?),
        AuthType::Iam => Arc::new(BasicAuthenticator::new(
            "apikey",
            required_credential("apikey", config.apikey.as_deref())?,
        )?),
    };
    Ok(authenticator)
}

fn required_credential<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str> {
    value.ok_or_else(|| Error::Authentication(format!("`{name}` is not configured")))
}

/// Rejects empty credentials and values that still carry JSON or shell
/// quoting, a common copy-paste mistake.
fn validate_credential(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::Authentication(format!("`{name}` must not be empty")));
    }
    let wrapped = value.starts_with('{')
        || value.starts_with('"')
        || value.ends_with('}')
        || value.ends_with('"');
    if wrapped {
        return Err(Error::Authentication(format!(
            "`{name}` must not start or end with curly brackets or quotes"
        )));
    }
    Ok(())
}

fn sensitive(value: &str) -> Result<HeaderValue> {
    let mut value =
        HeaderValue::from_str(value).map_err(|error| Error::Authentication(error.to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn authorization(authenticator: &dyn Authenticator) -> Option<String> {
        let mut headers = HeaderMap::new();
        authenticator.authenticate(&mut headers).unwrap();
        headers
            .get(AUTHORIZATION)
            .map(|value| value.to_str().unwrap().to_string())
    }

    #[test]
    fn test_basic_header() {
        let fixture = BasicAuthenticator::new("ada", "s3cret").unwrap();

        let actual = authorization(&fixture);
        let expected = Some(format!("Basic {}", STANDARD.encode("ada:s3cret")));

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_bearer_header() {
        let fixture = BearerTokenAuthenticator::new("t0ken").unwrap();

        let actual = authorization(&fixture);

        assert_eq!(actual, Some("Bearer t0ken".to_string()));
    }

    #[test]
    fn test_no_auth_leaves_headers_untouched() {
        let actual = authorization(&NoAuthAuthenticator);

        assert_eq!(actual, None);
    }

    #[test]
    fn test_rejects_wrapped_credentials() {
        for fixture in ["{ada}", "\"ada\"", "ada\"", ""] {
            let actual = BasicAuthenticator::new(fixture, "pw");

            assert!(matches!(actual, Err(Error::Authentication(_))), "{fixture}");
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let fixture = BasicAuthenticator::new("ada", "s3cret").unwrap();

        let actual = format!("{fixture:?}");

        assert!(!actual.contains("s3cret"));
    }

    #[test]
    fn test_from_config_iam_uses_apikey() {
        let fixture = ServiceConfig::default().auth_type(AuthType::Iam).apikey("k3y");

        let actual = authenticator_from_config(&fixture).unwrap();
        let expected = Some(format!("Basic {}", STANDARD.encode("apikey:k3y")));

        assert_eq!(authorization(actual.as_ref()), expected);
    }

    #[test]
    fn test_from_config_missing_credentials() {
        let fixture = ServiceConfig::default().auth_type(AuthType::BearerToken);

        let actual = authenticator_from_config(&fixture).unwrap_err();

        assert!(actual.to_string().contains("bearer_token"));
    }

    #[test]
    fn test_from_config_no_auth() {
        let fixture = ServiceConfig::default().auth_type(AuthType::NoAuth);

        let actual = authenticator_from_config(&fixture).unwrap();

        assert_eq!(actual.auth_type(), AuthType::NoAuth);
    }
}
