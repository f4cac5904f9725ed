use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::{Error, Result};

/// A file or text field of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub data: Bytes,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Bytes::from(value.into()),
            file_name: None,
            content_type: None,
        }
    }

    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        data: impl Into<Bytes>,
        content_type: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
            file_name: Some(file_name.into()),
            content_type,
        }
    }

    fn into_part(self) -> Result<(String, reqwest::multipart::Part)> {
        let mut part = reqwest::multipart::Part::bytes(self.data.to_vec());
        if let Some(file_name) = self.file_name {
            part = part.file_name(file_name);
        }
        if let Some(content_type) = self.content_type {
            part = part.mime_str(&content_type).map_err(|error| {
                Error::InvalidArgument(format!("invalid content type `{content_type}`: {error}"))
            })?;
        }
        Ok((self.name, part))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Bytes { content_type: String, data: Bytes },
    Multipart(Vec<FormPart>),
}

impl RequestBody {
    pub(crate) fn apply(self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        Ok(match self {
            Self::Empty => builder,
            Self::Json(value) => builder.json(&value),
            Self::Bytes { content_type, data } => {
                builder.header(reqwest::header::CONTENT_TYPE, content_type).body(data)
            }
            Self::Multipart(parts) => {
                let form = parts
                    .into_iter()
                    .map(FormPart::into_part)
                    .try_fold(reqwest::multipart::Form::new(), |form, part| {
                        part.map(|(name, part)| form.part(name, part))
                    })?;
                builder.multipart(form)
            }
        })
    }
}

/// A request relative to a service's base URL.
///
/// Path parameters are percent-encoded one segment at a time, so an id
/// containing `/` or `?` can never escape its segment.
#[derive(Debug, Clone)]
pub struct ServiceRequest {
    pub(crate) method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    pub(crate) headers: HeaderMap,
    pub(crate) body: RequestBody,
}

impl ServiceRequest {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            segments: Vec::new(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Appends fixed path segments, e.g. `["v2", "assistants"]`.
    pub fn path<const N: usize>(mut self, segments: [&str; N]) -> Self {
        self.segments.extend(segments.iter().map(|s| s.to_string()));
        self
    }

    /// Appends a caller supplied path parameter. Empty values are rejected.
    pub fn param(mut self, name: &str, value: &str) -> Result<Self> {
        self.segments.push(required(name, value)?.to_string());
        Ok(self)
    }

    pub fn query(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    pub fn query_opt(self, name: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn json(mut self, body: &impl Serialize) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn bytes(mut self, content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.body = RequestBody::Bytes { content_type: content_type.into(), data: data.into() };
        self
    }

    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Resolves the request against `base`, keeping any path `base` already
    /// has (`https://host/instances/123` + `v2` -> `/instances/123/v2`).
    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidArgument(format!("`{base}` cannot be used as a base URL")))?
            .pop_if_empty()
            .extend(&self.segments);

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

/// A decoded response together with its status and headers.
#[derive(Debug, Clone)]
pub struct DetailedResponse<T> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub result: T,
}

impl<T> DetailedResponse<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DetailedResponse<U> {
        DetailedResponse { status: self.status, headers: self.headers, result: f(self.result) }
    }

    pub fn into_result(self) -> T {
        self.result
    }
}

/// Returns `value` or an `InvalidArgument` naming the empty parameter.
pub(crate) fn required<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() { Err(Error::missing(name)) } else { Ok(value) }
}
