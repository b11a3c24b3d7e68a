//! Poller configuration and events

use crate::query::QueryFilters;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default time between poll cycles
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// How far back the first cycle looks when no watermark is stored
pub const DEFAULT_LOOKBACK: Duration = Duration::from_secs(10 * 60);

/// Default page size of a poll cycle
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Poller settings
#[derive(Debug, Clone, PartialEq)]
pub struct PollerConfig {
    pub interval: Duration,
    pub lookback: Duration,
    /// Clamped into the list limit range
    pub max_results: u32,
    /// Base filters; `created_at_min` and `limit` are set per cycle
    pub filters: QueryFilters,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            lookback: DEFAULT_LOOKBACK,
            max_results: DEFAULT_MAX_RESULTS,
            filters: QueryFilters::default(),
        }
    }
}

impl PollerConfig {
    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn lookback(mut self, lookback: Duration) -> Self {
        self.lookback = lookback;
        self
    }

    #[must_use]
    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    #[must_use]
    pub fn filters(mut self, filters: QueryFilters) -> Self {
        self.filters = filters;
        self
    }

    #[must_use]
    pub fn financial_status(mut self, status: impl Into<String>) -> Self {
        self.filters = self.filters.financial_status(status);
        self
    }

    #[must_use]
    pub fn fulfillment_status(mut self, status: impl Into<String>) -> Self {
        self.filters = self.filters.fulfillment_status(status);
        self
    }
}

/// A batch of newly created entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollEvent<T> {
    pub entities: Vec<T>,
    pub count: usize,
    /// Watermark stored after this batch
    pub watermark: DateTime<Utc>,
}

/// What a poller is doing right now
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollerPhase {
    #[default]
    Idle,
    Polling,
}
