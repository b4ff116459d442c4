/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Authenticated client for the intern portal API
//!
//! Every request goes through a single refresh-and-retry cycle:
//!
//! 1. The request is sent with session cookies.
//! 2. Anything other than a 401 is returned as-is.
//! 3. A 401 whose body is `{"error": "TOKEN_EXPIRED" | "SESSION_EXPIRED"}`
//!    triggers one `POST` to the refresh endpoint.
//! 4. If the refresh succeeds the original request is re-sent once and that
//!    response is returned, whatever it is. If the refresh fails the user is
//!    sent to the login page and the refresh response is returned.
//!
//! # Example
//! ```ignore
//! use intern_portal_client::prelude::*;
//!
//! let client = AuthenticatedClient::new(Config::new())?;
//! let projects: Vec<Project> = client.get_json("/api/projects/").await?;
//! ```

use crate::application::config::Config;
use crate::application::effects::{TracingEffects, UiEffects};
use crate::application::transport::{ReqwestTransport, Transport};
use crate::error::AppError;
use crate::model::auth::expiry_signal;
use crate::model::http::{ApiResponse, RequestDescriptor};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Terminal state reached by one logical request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// First response was not a 401
    Success,
    /// First response was a 401 without a recognized expiry code
    NonExpiryError,
    /// Session was refreshed and the request was re-sent once
    Retried,
    /// Refresh failed; a navigation to the login page was triggered
    RefreshFailed,
}

/// Final response of a logical request and how it was reached
#[derive(Debug, Clone)]
pub struct Exchange {
    /// Response handed back to the caller
    pub response: ApiResponse,
    /// Terminal state
    pub outcome: RequestOutcome,
}

/// HTTP client that transparently renews expired sessions
///
/// Concurrent calls are independent: two requests that both hit an expired
/// session will each refresh on their own.
pub struct AuthenticatedClient<T: Transport = ReqwestTransport, U: UiEffects = TracingEffects> {
    config: Arc<Config>,
    transport: T,
    effects: U,
}

impl AuthenticatedClient<ReqwestTransport, TracingEffects> {
    /// Creates a client over `reqwest` whose UI effects are only logged
    ///
    /// # Errors
    /// Returns [`AppError::Http`] if the HTTP client cannot be built
    pub fn new(config: Config) -> Result<Self, AppError> {
        Self::with_effects(config, TracingEffects)
    }
}

impl<U: UiEffects> AuthenticatedClient<ReqwestTransport, U> {
    /// Creates a client over `reqwest` with the given UI effects
    ///
    /// # Errors
    /// Returns [`AppError::Http`] if the HTTP client cannot be built
    pub fn with_effects(config: Config, effects: U) -> Result<Self, AppError> {
        let config = Arc::new(config);
        let transport = ReqwestTransport::new(config.clone())?;
        Ok(Self::from_parts(config, transport, effects))
    }
}

impl<T: Transport, U: UiEffects> AuthenticatedClient<T, U> {
    /// Assembles a client from an explicit transport and effects
    pub fn from_parts(config: Arc<Config>, transport: T, effects: U) -> Self {
        Self {
            config,
            transport,
            effects,
        }
    }

    /// Sends `descriptor`, renewing the session once if it has expired
    ///
    /// Non-401 responses, including 4xx/5xx, are returned unchanged.
    /// When the session cannot be renewed the returned response is the
    /// refresh call's, not an answer to `descriptor`.
    ///
    /// # Arguments
    /// * `descriptor` - Request to send; it is re-sent as is after a refresh
    ///
    /// # Returns
    /// * The final response, buffered
    ///
    /// # Errors
    /// Only transport failures; they are never retried
    pub async fn request(&self, descriptor: &RequestDescriptor) -> Result<ApiResponse, AppError> {
        Ok(self.exchange(descriptor).await?.response)
    }

    /// Same as [`request`](Self::request) but also reports the terminal state
    ///
    /// # Returns
    /// * The final response together with the [`RequestOutcome`] reached
    ///
    /// # Errors
    /// Only transport failures; they are never retried
    pub async fn exchange(&self, descriptor: &RequestDescriptor) -> Result<Exchange, AppError> {
        let response = self.transport.send(descriptor).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(Exchange {
                response,
                outcome: RequestOutcome::Success,
            });
        }

        let Some(code) = expiry_signal(&response) else {
            debug!("401 on {} without expiry signal", descriptor.url);
            return Ok(Exchange {
                response,
                outcome: RequestOutcome::NonExpiryError,
            });
        };

        info!(
            "{} on {}, refreshing session",
            code.as_str(),
            descriptor.url
        );
        let refresh = self.transport.send(&self.refresh_descriptor()).await?;

        if !refresh.is_success() {
            warn!(
                "Session refresh failed with status {}, redirecting to {}",
                refresh.status(),
                self.config.auth.login_path
            );
            self.effects.navigate(&self.config.auth.login_path);
            return Ok(Exchange {
                response: refresh,
                outcome: RequestOutcome::RefreshFailed,
            });
        }

        debug!(
            "Session refreshed, retrying {} {}",
            descriptor.method, descriptor.url
        );
        let response = self.transport.send(descriptor).await?;
        Ok(Exchange {
            response,
            outcome: RequestOutcome::Retried,
        })
    }

    /// Sends `descriptor` and returns its JSON body
    ///
    /// An unparsable or empty body is `None`.
    ///
    /// # Arguments
    /// * `descriptor` - Request to send
    ///
    /// # Returns
    /// * The parsed body of a 2xx response, if there is one
    ///
    /// # Errors
    /// * [`AppError::RequestFailed`] if the final status is outside `[200, 300)`
    /// * [`AppError::Http`] on transport failure
    pub async fn request_json(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<Option<Value>, AppError> {
        let response = self.request(descriptor).await?;
        let data = response.json_or_absent();
        if !response.is_success() {
            return Err(AppError::RequestFailed {
                status: response.status(),
                data,
            });
        }
        Ok(data)
    }

    /// Like [`request_json`](Self::request_json), deserializing into `R`
    ///
    /// An absent body is deserialized from `null`, so `R = Option<_>` or
    /// `R = ()` accept it.
    ///
    /// # Errors
    /// As [`request_json`](Self::request_json), plus
    /// [`AppError::Deserialization`] if the body is not a valid `R`
    pub async fn request_json_as<R: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<R, AppError> {
        let data = self.request_json(descriptor).await?.unwrap_or(Value::Null);
        serde_json::from_value(data).map_err(|e| AppError::Deserialization(e.to_string()))
    }

    /// GET `path` and deserialize the body
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, AppError> {
        self.request_json_as(&RequestDescriptor::get(path)).await
    }

    /// POST `body` as JSON to `path` and deserialize the answer
    pub async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, AppError> {
        self.request_json_as(&RequestDescriptor::post(path).json(body)?)
            .await
    }

    /// PUT `body` as JSON to `path` and deserialize the answer
    pub async fn put_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, AppError> {
        self.request_json_as(&RequestDescriptor::new(Method::PUT, path).json(body)?)
            .await
    }

    /// DELETE `path` and deserialize the answer
    pub async fn delete_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, AppError> {
        self.request_json_as(&RequestDescriptor::new(Method::DELETE, path))
            .await
    }

    /// Client configuration
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// UI effects the client triggers
    #[must_use]
    pub fn effects(&self) -> &U {
        &self.effects
    }

    fn refresh_descriptor(&self) -> RequestDescriptor {
        RequestDescriptor::post(self.config.auth.refresh_path.as_str())
            .without_default_content_type()
    }
}
