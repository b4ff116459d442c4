/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! HTTP transport abstraction
//!
//! The [`Transport`] trait is the seam between the session-refresh logic and
//! the network. [`ReqwestTransport`] is the production implementation; it
//! keeps session cookies in a shared jar so that a successful refresh is
//! visible to the retried request.

use crate::application::config::Config;
use crate::constants::USER_AGENT;
use crate::error::AppError;
use crate::model::http::{ApiResponse, Credentials, RequestDescriptor};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Issues a single HTTP request and buffers the response
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` exactly once
    ///
    /// Relative URLs are resolved against the configured base URL.
    /// Any response, whatever its status, is `Ok`; only failures to obtain
    /// a response are errors.
    async fn send(&self, request: &RequestDescriptor) -> Result<ApiResponse, AppError>;
}

/// [`Transport`] backed by `reqwest`
pub struct ReqwestTransport {
    config: Arc<Config>,
    with_cookies: Client,
    without_cookies: Client,
}

impl ReqwestTransport {
    /// Creates a transport with its own cookie jar
    ///
    /// # Errors
    /// Returns [`AppError::Http`] if the underlying client cannot be built
    pub fn new(config: Arc<Config>) -> Result<Self, AppError> {
        let timeout = Duration::from_secs(config.rest_api.timeout);
        let with_cookies = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .cookie_store(true)
            .build()?;
        let without_cookies = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            config,
            with_cookies,
            without_cookies,
        })
    }

    /// Configuration the transport resolves URLs against
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<ApiResponse, AppError> {
        let url = self.config.resolve_url(&request.url);
        let client = match request.credentials {
            Credentials::Include => &self.with_cookies,
            Credentials::Omit => &self.without_cookies,
        };

        debug!("{} {}", request.method, url);

        let mut builder = client
            .request(request.method.clone(), &url)
            .headers(request.effective_headers());
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        debug!("Response status: {}", response.status());
        ApiResponse::from_reqwest(response).await
    }
}
