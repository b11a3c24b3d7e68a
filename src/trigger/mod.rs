//! Change-detection triggers
//!
//! A [`ChangePoller`] wraps a list call with a persisted `created_at`
//! watermark and emits batches of entities created since the last cycle.

mod poller;
mod types;

pub use poller::ChangePoller;
pub use types::{PollEvent, PollerConfig, PollerPhase, DEFAULT_INTERVAL, DEFAULT_LOOKBACK, DEFAULT_MAX_RESULTS};
