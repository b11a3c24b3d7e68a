//! Client-side rate limiting
//!
//! A fixed pause before every outbound call. Shopify's REST bucket allows
//! roughly two calls per second per store, so the default delay is 500ms.
//! Response rate-limit headers are not consulted.

use std::time::Duration;
use tracing::trace;

/// Fixed-delay rate limiter
#[derive(Debug, Clone, Copy)]
pub struct RateLimiter {
    delay: Duration,
}

impl RateLimiter {
    /// Create a rate limiter with the given delay
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// A limiter that never waits
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Configured delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait before making a request
    pub async fn wait(&self) {
        if self.delay.is_zero() {
            return;
        }
        trace!(delay_ms = self.delay.as_millis() as u64, "Rate limit delay");
        tokio::time::sleep(self.delay).await;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_RATE_LIMIT_DELAY)
    }
}
