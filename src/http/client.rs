//! Shopify client and HTTP transport
//!
//! [`ShopifyClient`] is the entry point: it builds each request, waits on the
//! rate limiter and hands the request to a [`Transport`]. The production
//! transport is [`HttpTransport`] over reqwest; tests substitute their own.

use super::rate_limit::RateLimiter;
use super::request::{PreparedRequest, RequestBuilder};
use crate::config::ShopifyConfig;
use crate::decode;
use crate::error::{Error, Result};
use crate::resource::{Customers, Orders, Products, Resource, Resources};
use crate::types::{JsonObject, Method};
use async_trait::async_trait;
use reqwest::header::LINK;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Status, `Link` header and body of a completed call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub link: Option<String>,
    pub body: String,
}

impl RawResponse {
    /// Create a response without a `Link` header
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            link: None,
            body: body.into(),
        }
    }
}

/// Sends prepared requests
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Execute one request and return the raw response
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport using the config's timeout and user agent
    pub fn new(config: &ShopifyConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    fn map_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            Error::Http(e)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse> {
        let mut req = self
            .client
            .request(request.method.into(), request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            req = req.body(body);
        }

        let response = req.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status().as_u16();
        let link = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.map_err(|e| self.map_error(e))?;

        Ok(RawResponse { status, link, body })
    }
}

/// Client for one Shopify store
#[derive(Debug, Clone)]
pub struct ShopifyClient {
    transport: Arc<dyn Transport>,
    builder: RequestBuilder,
    rate_limiter: RateLimiter,
}

impl ShopifyClient {
    /// Create a client that talks HTTP
    pub fn new(config: &ShopifyConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over a custom transport
    pub fn with_transport(config: &ShopifyConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            builder: RequestBuilder::new(config),
            rate_limiter: RateLimiter::new(config.rate_limit_delay),
        }
    }

    /// Request builder used by this client
    pub fn request_builder(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Build, rate limit and send one request.
    ///
    /// Configuration problems are reported before the rate limit delay and
    /// before any network activity.
    pub async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<RawResponse> {
        let request = self.builder.build(method, path, body)?;
        self.rate_limiter.wait().await;

        debug!(%method, url = %request.url, "Sending Shopify request");
        let response = self.transport.send(request).await?;
        debug!(status = response.status, bytes = response.body.len(), "Shopify response");

        Ok(response)
    }

    /// Send a request and decode the body into a JSON object
    pub async fn send_json(&self, method: Method, path: &str, body: Option<&Value>) -> Result<JsonObject> {
        let response = self.send(method, path, body).await?;
        decode::decode_response(&response)
    }

    /// Typed handle for a resource
    pub fn resource<R: Resource>(&self) -> Resources<'_, R> {
        Resources::new(self)
    }

    /// Customer operations
    pub fn customers(&self) -> Resources<'_, Customers> {
        self.resource()
    }

    /// Order operations
    pub fn orders(&self) -> Resources<'_, Orders> {
        self.resource()
    }

    /// Product operations
    pub fn products(&self) -> Resources<'_, Products> {
        self.resource()
    }
}
