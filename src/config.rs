//! Configuration for Shopify task operations
//!
//! [`ShopifyConfig`] is the immutable, resolved configuration handed to the
//! client. [`TaskSettings`] is its file form: YAML or JSON with
//! `{{ env.NAME }}` templates, resolved once at load time.

use crate::error::{Error, Result};
use crate::template::{self, TemplateContext};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Admin API version used when none is configured
pub const DEFAULT_API_VERSION: &str = "2024-10";

/// Delay before each call; Shopify documents roughly 2 requests per second
pub const DEFAULT_RATE_LIMIT_DELAY: Duration = Duration::from_millis(500);

/// Connect and request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Resolved Config
// ============================================================================

/// Resolved configuration for one task invocation
#[derive(Debug, Clone)]
pub struct ShopifyConfig {
    /// Store domain, e.g. `my-store.myshopify.com`
    pub store_domain: String,
    /// Admin API access token
    pub access_token: SecretString,
    /// Admin API version, e.g. `2024-10`
    pub api_version: String,
    /// Fixed delay applied before every outbound call
    pub rate_limit_delay: Duration,
    /// Connect and request timeout
    pub timeout: Duration,
    /// Replaces the `https://{store_domain}` origin (proxies, mock servers)
    pub endpoint: Option<String>,
    /// User agent string
    pub user_agent: String,
}

impl ShopifyConfig {
    /// Create a config with default version, delay and timeout
    pub fn new(store_domain: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            store_domain: store_domain.into(),
            access_token: SecretString::from(access_token.into()),
            api_version: DEFAULT_API_VERSION.to_string(),
            rate_limit_delay: DEFAULT_RATE_LIMIT_DELAY,
            timeout: DEFAULT_TIMEOUT,
            endpoint: None,
            user_agent: format!("shopify-tasks/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Create a new config builder
    pub fn builder() -> ShopifyConfigBuilder {
        ShopifyConfigBuilder::default()
    }
}

/// Builder for [`ShopifyConfig`]
#[derive(Default)]
pub struct ShopifyConfigBuilder {
    store_domain: String,
    access_token: String,
    api_version: Option<String>,
    rate_limit_delay: Option<Duration>,
    timeout: Option<Duration>,
    endpoint: Option<String>,
    user_agent: Option<String>,
}

impl ShopifyConfigBuilder {
    /// Set the store domain
    #[must_use]
    pub fn store_domain(mut self, domain: impl Into<String>) -> Self {
        self.store_domain = domain.into();
        self
    }

    /// Set the access token
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = token.into();
        self
    }

    /// Set the API version
    #[must_use]
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Set the rate limit delay
    #[must_use]
    pub fn rate_limit_delay(mut self, delay: Duration) -> Self {
        self.rate_limit_delay = Some(delay);
        self
    }

    /// Disable the rate limit delay
    #[must_use]
    pub fn no_rate_limit(mut self) -> Self {
        self.rate_limit_delay = Some(Duration::ZERO);
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the request origin
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the config. Blank credentials are rejected later, by the
    /// request builder, before any network call.
    pub fn build(self) -> ShopifyConfig {
        let mut config = ShopifyConfig::new(self.store_domain, self.access_token);
        if let Some(version) = self.api_version {
            config.api_version = version;
        }
        if let Some(delay) = self.rate_limit_delay {
            config.rate_limit_delay = delay;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(agent) = self.user_agent {
            config.user_agent = agent;
        }
        config.endpoint = self.endpoint;
        config
    }
}

// ============================================================================
// File Settings
// ============================================================================

/// Task settings as written in a YAML/JSON file
///
/// ```yaml
/// store_domain: my-store.myshopify.com
/// access_token: "{{ env.SHOPIFY_ACCESS_TOKEN }}"
/// api_version: "2024-10"
/// rate_limit_delay_ms: 500
/// timeout_seconds: 30
/// output: s3://bucket/shopify/
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSettings {
    /// Store domain
    #[serde(default)]
    pub store_domain: Option<String>,

    /// Admin API access token
    #[serde(default)]
    pub access_token: Option<String>,

    /// Admin API version
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Delay before each call in milliseconds
    #[serde(default = "default_rate_limit_delay_ms")]
    pub rate_limit_delay_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Origin override
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Storage destination for STORE fetches
    #[serde(default)]
    pub output: Option<String>,
}

impl Default for TaskSettings {
    fn default() -> Self {
        Self {
            store_domain: None,
            access_token: None,
            api_version: default_api_version(),
            rate_limit_delay_ms: default_rate_limit_delay_ms(),
            timeout_seconds: default_timeout_seconds(),
            endpoint: None,
            output: None,
        }
    }
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_rate_limit_delay_ms() -> u64 {
    DEFAULT_RATE_LIMIT_DELAY.as_millis() as u64
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl TaskSettings {
    /// Parse settings from YAML (JSON is valid YAML), rendering templates first
    pub fn from_yaml_str(contents: &str, ctx: &TemplateContext) -> Result<Self> {
        let raw: serde_json::Value = serde_yaml::from_str(contents)?;
        let rendered = template::render_value(&raw, ctx)?;
        serde_json::from_value(rendered)
            .map_err(|e| Error::config(format!("Invalid task settings: {e}")))
    }

    /// Load settings from a file
    pub fn from_file(path: impl AsRef<Path>, ctx: &TemplateContext) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read settings file {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&contents, ctx)
    }

    /// Resolve into a client config, failing on missing credentials
    pub fn to_config(&self) -> Result<ShopifyConfig> {
        let store_domain =
            template::resolve_required("store_domain", self.store_domain.as_deref())?;
        let access_token =
            template::resolve_required("access_token", self.access_token.as_deref())?;

        let mut builder = ShopifyConfig::builder()
            .store_domain(store_domain)
            .access_token(access_token)
            .api_version(self.api_version.clone())
            .rate_limit_delay(Duration::from_millis(self.rate_limit_delay_ms))
            .timeout(Duration::from_secs(self.timeout_seconds));
        if let Some(endpoint) = &self.endpoint {
            builder = builder.endpoint(endpoint.clone());
        }
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serde_json::json;

    #[test]
    fn test_config_defaults() {
        let config = ShopifyConfig::new("shop.myshopify.com", "shpat_123");
        assert_eq!(config.api_version, "2024-10");
        assert_eq!(config.rate_limit_delay, Duration::from_millis(500));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.endpoint.is_none());
        assert_eq!(config.access_token.expose_secret(), "shpat_123");
    }

    #[test]
    fn test_config_builder() {
        let config = ShopifyConfig::builder()
            .store_domain("shop.myshopify.com")
            .access_token("token")
            .api_version("2023-10")
            .no_rate_limit()
            .timeout(Duration::from_secs(5))
            .endpoint("http://127.0.0.1:9000")
            .user_agent("test-agent/1.0")
            .build();

        assert_eq!(config.store_domain, "shop.myshopify.com");
        assert_eq!(config.api_version, "2023-10");
        assert_eq!(config.rate_limit_delay, Duration::ZERO);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.endpoint.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ShopifyConfig::new("shop.myshopify.com", "shpat_secret_value");
        let debug = format!("{config:?}");
        assert!(!debug.contains("shpat_secret_value"));
    }

    #[test]
    fn test_settings_from_yaml_with_env_template() {
        let ctx = TemplateContext::new().with_env(json!({"SHOPIFY_TOKEN": "shpat_env"}));
        let yaml = r#"
store_domain: shop.myshopify.com
access_token: "{{ env.SHOPIFY_TOKEN }}"
rate_limit_delay_ms: 0
"#;
        let settings = TaskSettings::from_yaml_str(yaml, &ctx).unwrap();
        assert_eq!(settings.api_version, "2024-10");
        assert_eq!(settings.timeout_seconds, 30);

        let config = settings.to_config().unwrap();
        assert_eq!(config.access_token.expose_secret(), "shpat_env");
        assert_eq!(config.rate_limit_delay, Duration::ZERO);
    }

    #[test]
    fn test_settings_missing_token() {
        let settings = TaskSettings {
            store_domain: Some("shop.myshopify.com".to_string()),
            ..Default::default()
        };
        let err = settings.to_config().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("access_token"));
    }

    #[test]
    fn test_settings_undefined_env_variable() {
        let ctx = TemplateContext::new();
        let yaml = "access_token: \"{{ env.NOPE }}\"";
        let err = TaskSettings::from_yaml_str(yaml, &ctx).unwrap_err();
        assert!(err.to_string().contains("env.NOPE"));
    }
}
