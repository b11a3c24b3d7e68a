//! State types for trigger progress
//!
//! These types are serialized to JSON and persisted between runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Persisted state for every trigger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Per-trigger state
    #[serde(default)]
    pub triggers: HashMap<String, TriggerState>,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get state for a trigger
    pub fn get_trigger(&self, trigger: &str) -> Option<&TriggerState> {
        self.triggers.get(trigger)
    }

    /// Get the watermark of a trigger
    pub fn watermark(&self, trigger: &str) -> Option<DateTime<Utc>> {
        self.triggers.get(trigger)?.watermark
    }

    /// Advance a trigger's watermark. An older value never replaces a newer
    /// one; the stored watermark is returned.
    pub fn advance_watermark(&mut self, trigger: &str, at: DateTime<Utc>) -> DateTime<Utc> {
        let entry = self.triggers.entry(trigger.to_string()).or_default();
        let next = match entry.watermark {
            Some(current) if current >= at => current,
            _ => at,
        };
        entry.watermark = Some(next);
        entry.updated_at = Some(Utc::now());
        next
    }
}

/// State for a single trigger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerState {
    /// Creation time of the newest entity already emitted
    #[serde(default)]
    pub watermark: Option<DateTime<Utc>>,

    /// When the watermark last moved
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
