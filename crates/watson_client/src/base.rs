use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;
use watson_domain::DecodeError;
use watson_env::{HttpConfig, ServiceConfig};

use crate::{
    Authenticator, DetailedResponse, Error, Result, ServiceRequest, authenticator_from_config,
};

const VERSION: &str = match option_env!("APP_VERSION") {
    None => env!("CARGO_PKG_VERSION"),
    Some(v) => v,
};

/// Shared HTTP plumbing behind every service binding.
#[derive(Debug, Clone)]
pub struct BaseService {
    client: Client,
    url: Url,
    authenticator: Arc<dyn Authenticator>,
    headers: HeaderMap,
}

impl BaseService {
    pub fn new(
        url: Url,
        authenticator: Arc<dyn Authenticator>,
        http: &HttpConfig,
        disable_ssl: bool,
    ) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(http.connect_timeout_duration())
            .read_timeout(http.read_timeout_duration())
            .pool_idle_timeout(http.pool_idle_timeout_duration())
            .pool_max_idle_per_host(http.pool_max_idle_per_host)
            .danger_accept_invalid_certs(disable_ssl)
            .build()
            .map_err(Error::Client)?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, user_agent());

        info!(url = %url, auth_type = %authenticator.auth_type(), "Created service client");
        Ok(Self { client, url, authenticator, headers })
    }

    /// Builds a service from its configuration, using `default_url` when the
    /// configuration does not name one.
    pub fn from_config(config: &ServiceConfig, default_url: &str) -> Result<Self> {
        let url = match &config.url {
            Some(url) => url.clone(),
            None => Url::parse(default_url)?,
        };
        let authenticator = authenticator_from_config(config)?;
        Self::new(url, authenticator, &config.http, config.disable_ssl)
    }

    /// Adds a header sent with every request.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn set_url(&mut self, url: Url) {
        self.url = url;
    }

    /// Sends the request and returns the raw body of a successful response.
    pub async fn execute(&self, request: ServiceRequest) -> Result<DetailedResponse<Bytes>> {
        let url = request.url(&self.url)?;
        let ServiceRequest { method, headers: extra, body, .. } = request;

        let mut headers = self.headers.clone();
        headers.extend(extra);
        self.authenticator.authenticate(&mut headers)?;

        debug!(
            method = %method,
            url = %url,
            headers = ?sanitize_headers(&headers),
            "Sending request"
        );

        let builder = self.client.request(method.clone(), url.clone()).headers(headers);
        let transport = |source: reqwest::Error| {
            warn!(method = %method, url = %url, error = %source, "Request failed");
            Error::Transport { method: method.clone(), url: url.to_string(), source }
        };

        let response = body.apply(builder)?.send().await.map_err(transport)?;
        let status = response.status();
        let response_headers = response.headers().clone();
        let result = response.bytes().await.map_err(transport)?;

        debug!(status = %status, bytes = result.len(), "Received response");

        if !status.is_success() {
            let message = error_message(status, &result);
            warn!(status = %status, url = %url, message = %message, "Service returned an error");
            return Err(Error::Service {
                status,
                message,
                body: String::from_utf8_lossy(&result).into_owned(),
            });
        }

        Ok(DetailedResponse { status, headers: response_headers, result })
    }

    /// Sends the request and decodes a successful body with `decode`.
    pub async fn execute_with<T, F>(
        &self,
        request: ServiceRequest,
        decode: F,
    ) -> Result<DetailedResponse<T>>
    where
        F: FnOnce(&[u8]) -> std::result::Result<T, DecodeError>,
    {
        let response = self.execute(request).await?;
        match decode(&response.result) {
            Ok(result) => {
                Ok(DetailedResponse { status: response.status, headers: response.headers, result })
            }
            Err(source) => {
                warn!(status = %response.status, error = %source, "Failed to decode response body");
                Err(Error::Decode {
                    status: response.status,
                    body: String::from_utf8_lossy(&response.result).into_owned(),
                    source,
                })
            }
        }
    }

    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        request: ServiceRequest,
    ) -> Result<DetailedResponse<T>> {
        self.execute_with(request, |bytes| serde_json::from_slice(bytes).map_err(DecodeError::from))
            .await
    }

    /// Sends the request and discards the body.
    pub async fn execute_empty(&self, request: ServiceRequest) -> Result<DetailedResponse<()>> {
        Ok(self.execute(request).await?.map(|_| ()))
    }
}

fn user_agent() -> HeaderValue {
    HeaderValue::from_str(&format!("watson-rust-sdk/{VERSION}"))
        .unwrap_or(HeaderValue::from_static("watson-rust-sdk"))
}

/// Picks the most specific error message a Watson error body carries.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    let from_body = serde_json::from_slice::<Value>(body).ok().and_then(|value| {
        ["error", "message", "errorMessage"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str))
            .or_else(|| value.pointer("/errors/0/message").and_then(Value::as_str))
            .map(str::to_string)
    });

    from_body.unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string())
}

fn sanitize_headers(headers: &HeaderMap) -> HeaderMap {
    headers
        .iter()
        .map(|(name, value)| {
            let value = if name == AUTHORIZATION {
                HeaderValue::from_static("[REDACTED]")
            } else {
                value.clone()
            };
            (name.clone(), value)
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    use super::*;
    use crate::{BearerTokenAuthenticator, NoAuthAuthenticator};

    pub(crate) fn service(url: &str) -> BaseService {
        BaseService::new(
            Url::parse(url).unwrap(),
            Arc::new(NoAuthAuthenticator),
            &HttpConfig::default(),
            false,
        )
        .unwrap()
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Echo {
        name: String,
    }

    #[tokio::test]
    async fn test_execute_json_sends_auth_and_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/echo")
            .match_header("authorization", "Bearer t0ken")
            .match_header("user-agent", Matcher::Regex("^watson-rust-sdk/".to_string()))
            .with_status(200)
            .with_body(r#"{"name":"ok"}"#)
            .create_async()
            .await;
        let fixture = BaseService::new(
            Url::parse(&server.url()).unwrap(),
            Arc::new(BearerTokenAuthenticator::new("t0ken").unwrap()),
            &HttpConfig::default(),
            false,
        )
        .unwrap();

        let actual = fixture
            .execute_json::<Echo>(ServiceRequest::get().path(["v1", "echo"]))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(actual.status, StatusCode::OK);
        assert_eq!(actual.result, Echo { name: "ok".to_string() });
    }

    #[tokio::test]
    async fn test_service_error_message_from_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/echo")
            .with_status(404)
            .with_body(r#"{"error":"Resource not found","code":404}"#)
            .create_async()
            .await;
        let fixture = service(&server.url());

        let actual = fixture.execute(ServiceRequest::get().path(["v1", "echo"])).await.unwrap_err();

        assert!(matches!(
            actual,
            Error::Service { status, ref message, .. }
                if status == StatusCode::NOT_FOUND && message == "Resource not found"
        ));
        assert_eq!(actual.status(), Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_service_error_without_json_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/echo")
            .with_status(503)
            .with_body("upstream down")
            .create_async()
            .await;
        let fixture = service(&server.url());

        let actual = fixture.execute(ServiceRequest::get().path(["v1", "echo"])).await.unwrap_err();

        assert!(matches!(
            actual,
            Error::Service { ref message, ref body, .. }
                if message == "Service Unavailable" && body == "upstream down"
        ));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_a_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/echo")
            .with_status(200)
            .with_body(r#"{"nom":"ok"}"#)
            .create_async()
            .await;
        let fixture = service(&server.url());

        let actual = fixture
            .execute_json::<Echo>(ServiceRequest::get().path(["v1", "echo"]))
            .await
            .unwrap_err();

        assert!(matches!(
            actual,
            Error::Decode { status, ref body, source: DecodeError::Json(_) }
                if status == StatusCode::OK && body.contains("nom")
        ));
    }

    #[tokio::test]
    async fn test_transport_error() {
        let fixture = service("http://127.0.0.1:1");

        let actual = fixture.execute(ServiceRequest::get().path(["v1", "echo"])).await.unwrap_err();

        assert!(matches!(actual, Error::Transport { .. }));
    }

    #[test]
    fn test_error_message_prefers_known_fields() {
        let fixture =
            br#"{"errors":[{"code":"invalid_field","message":"collection_ids is required"}]}"#;

        let actual = error_message(StatusCode::BAD_REQUEST, fixture);

        assert_eq!(actual, "collection_ids is required");
    }

    #[test]
    fn test_sanitize_headers_redacts_authorization() {
        let mut fixture = HeaderMap::new();
        fixture.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        fixture.insert(USER_AGENT, HeaderValue::from_static("watson-rust-sdk/0.1.0"));

        let actual = sanitize_headers(&fixture);

        assert_eq!(actual.get(AUTHORIZATION).unwrap(), "[REDACTED]");
        assert_eq!(actual.get(USER_AGENT).unwrap(), "watson-rust-sdk/0.1.0");
    }
}
