/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Request and response values exchanged with the transport
//!
//! [`ApiResponse`] buffers the whole body up front, so it can be cloned and
//! parsed any number of times without ever consuming what the caller reads.

use crate::error::{AppError, ParseError, ParseResultExt};
use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Whether ambient session credentials (cookies) travel with a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Credentials {
    /// Send and store session cookies
    #[default]
    Include,
    /// Send the request without any session cookies
    Omit,
}

/// Everything needed to issue (and re-issue) one HTTP request
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// Absolute URL, or a path resolved against the configured base URL
    pub url: String,
    /// HTTP method
    pub method: Method,
    /// Caller-supplied headers, merged over the defaults
    pub headers: HeaderMap,
    /// Optional request body
    pub body: Option<Bytes>,
    /// Credential inclusion policy
    pub credentials: Credentials,
    /// Whether `Content-Type: application/json` is sent when the caller
    /// supplies none
    pub default_content_type: bool,
}

impl RequestDescriptor {
    /// Creates a descriptor with no headers and no body
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            headers: HeaderMap::new(),
            body: None,
            credentials: Credentials::Include,
            default_content_type: true,
        }
    }

    /// Shorthand for a GET descriptor
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Shorthand for a POST descriptor
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Adds a header, replacing any previous value under the same name
    ///
    /// # Errors
    /// Returns [`AppError::InvalidInput`] if the name or value is not a valid header
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, AppError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| AppError::InvalidInput(format!("header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| AppError::InvalidInput(format!("header value {value:?}: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Replaces the caller-supplied headers
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets a raw body
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the JSON body
    ///
    /// # Errors
    /// Returns [`AppError::SerializationError`] if `value` cannot be serialized
    pub fn json<B: Serialize + ?Sized>(mut self, value: &B) -> Result<Self, AppError> {
        let body =
            serde_json::to_vec(value).map_err(|e| AppError::SerializationError(e.to_string()))?;
        self.body = Some(Bytes::from(body));
        Ok(self)
    }

    /// Sets the credential policy
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Drops the default `Content-Type`, so only caller headers are sent
    #[must_use]
    pub fn without_default_content_type(mut self) -> Self {
        self.default_content_type = false;
        self
    }

    /// Headers actually sent: `Content-Type: application/json` (unless
    /// disabled) overridden by whatever the caller supplied
    #[must_use]
    pub fn effective_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if self.default_content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        headers.extend(self.headers.clone());
        headers
    }
}

/// A fully buffered HTTP response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    /// Builds a response from its parts
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Reads a `reqwest` response to the end
    ///
    /// # Errors
    /// Returns [`AppError::Http`] if the body stream fails
    pub async fn from_reqwest(response: reqwest::Response) -> Result<Self, AppError> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// Response status
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Whether the status is in `[200, 300)`
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parses the body as JSON into `T`
    ///
    /// # Errors
    /// Returns [`ParseError::Empty`] for an empty body and
    /// [`ParseError::Invalid`] for anything that is not a valid `T`
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ParseError> {
        if self.body.is_empty() {
            return Err(ParseError::Empty);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Parses the body as JSON, treating any failure as "no data"
    #[must_use]
    pub fn json_or_absent(&self) -> Option<Value> {
        self.json::<Value>().absent()
    }
}
