//! Authenticated request construction
//!
//! Turns `(method, path, body)` plus the store configuration into a
//! [`PreparedRequest`]. Nothing here touches the network.

use crate::config::ShopifyConfig;
use crate::error::{Error, Result};
use crate::types::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use url::Url;

/// Header carrying the Admin API access token
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// A fully built request, ready for a [`Transport`](super::Transport)
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// Serialized JSON body; only ever present for POST and PUT
    pub body: Option<String>,
}

/// Builds authenticated Admin API requests for one store
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    store_domain: String,
    access_token: SecretString,
    api_version: String,
    endpoint: Option<String>,
}

impl RequestBuilder {
    /// Create a builder from the store configuration
    pub fn new(config: &ShopifyConfig) -> Self {
        Self {
            store_domain: config.store_domain.trim().to_string(),
            access_token: config.access_token.clone(),
            api_version: config.api_version.clone(),
            endpoint: config.endpoint.clone(),
        }
    }

    /// Origin requests are sent to
    fn origin(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{}", self.store_domain),
        }
    }

    /// Full URL for an API path such as `/orders.json?limit=50`
    pub fn url(&self, path: &str) -> Result<Url> {
        let raw = format!("{}/admin/api/{}{path}", self.origin(), self.api_version);
        Ok(Url::parse(&raw)?)
    }

    /// Build a request.
    ///
    /// GET and DELETE never carry a body. POST and PUT attach `body` when
    /// one is given and send no body otherwise.
    pub fn build(&self, method: Method, path: &str, body: Option<&Value>) -> Result<PreparedRequest> {
        if self.store_domain.is_empty() {
            return Err(Error::config("store domain is required"));
        }
        let token = self.access_token.expose_secret();
        if token.trim().is_empty() {
            return Err(Error::config("access token is required"));
        }
        if body.is_some() && !method.carries_body() {
            return Err(Error::unsupported_method(method.as_str(), true));
        }

        let mut token_value = HeaderValue::from_str(token.trim())
            .map_err(|_| Error::config("access token contains invalid header characters"))?;
        token_value.set_sensitive(true);

        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(HeaderName::from_static("x-shopify-access-token"), token_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let body = body.map(serde_json::to_string).transpose()?;

        Ok(PreparedRequest {
            method,
            url: self.url(path)?,
            headers,
            body,
        })
    }
}
