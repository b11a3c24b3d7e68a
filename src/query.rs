//! List query filters
//!
//! One filter set shared by every list endpoint. Only values that are set
//! and non-empty reach the query string.

use crate::models::{ProductStatus, PublishedStatus};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Smallest page size the Admin API accepts
pub const MIN_LIMIT: u32 = 1;

/// Largest page size the Admin API accepts
pub const MAX_LIMIT: u32 = 250;

/// Filters for a list call
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilters {
    pub limit: Option<u32>,
    pub since_id: Option<u64>,
    pub status: Option<String>,
    pub financial_status: Option<String>,
    pub fulfillment_status: Option<String>,
    pub created_at_min: Option<String>,
    pub created_at_max: Option<String>,
    pub updated_at_min: Option<String>,
    pub updated_at_max: Option<String>,
    pub page_info: Option<String>,
    /// Comma-separated field projection
    pub fields: Option<String>,
    pub product_type: Option<String>,
    pub vendor: Option<String>,
    pub handle: Option<String>,
    pub published_status: Option<PublishedStatus>,
    pub collection_id: Option<u64>,
    /// Comma-separated ids
    pub ids: Option<String>,
}

impl QueryFilters {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn since_id(mut self, id: u64) -> Self {
        self.since_id = Some(id);
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn product_status(self, status: ProductStatus) -> Self {
        self.status(status.as_str())
    }

    #[must_use]
    pub fn financial_status(mut self, status: impl Into<String>) -> Self {
        self.financial_status = Some(status.into());
        self
    }

    #[must_use]
    pub fn fulfillment_status(mut self, status: impl Into<String>) -> Self {
        self.fulfillment_status = Some(status.into());
        self
    }

    #[must_use]
    pub fn created_at_min(mut self, value: impl Into<String>) -> Self {
        self.created_at_min = Some(value.into());
        self
    }

    /// Lower creation bound from a timestamp, formatted as RFC 3339 seconds
    #[must_use]
    pub fn created_after(self, at: DateTime<Utc>) -> Self {
        self.created_at_min(at.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    #[must_use]
    pub fn created_at_max(mut self, value: impl Into<String>) -> Self {
        self.created_at_max = Some(value.into());
        self
    }

    #[must_use]
    pub fn updated_at_min(mut self, value: impl Into<String>) -> Self {
        self.updated_at_min = Some(value.into());
        self
    }

    #[must_use]
    pub fn updated_at_max(mut self, value: impl Into<String>) -> Self {
        self.updated_at_max = Some(value.into());
        self
    }

    #[must_use]
    pub fn page_info(mut self, cursor: impl Into<String>) -> Self {
        self.page_info = Some(cursor.into());
        self
    }

    #[must_use]
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    #[must_use]
    pub fn product_type(mut self, value: impl Into<String>) -> Self {
        self.product_type = Some(value.into());
        self
    }

    #[must_use]
    pub fn vendor(mut self, value: impl Into<String>) -> Self {
        self.vendor = Some(value.into());
        self
    }

    #[must_use]
    pub fn handle(mut self, value: impl Into<String>) -> Self {
        self.handle = Some(value.into());
        self
    }

    #[must_use]
    pub fn published_status(mut self, status: PublishedStatus) -> Self {
        self.published_status = Some(status);
        self
    }

    #[must_use]
    pub fn collection_id(mut self, id: u64) -> Self {
        self.collection_id = Some(id);
        self
    }

    #[must_use]
    pub fn ids(mut self, ids: impl Into<String>) -> Self {
        self.ids = Some(ids.into());
        self
    }

    /// Ordered `(key, value)` pairs that will be sent.
    ///
    /// `limit` is clamped to `[1, 250]`, `fields` always includes `id`, and a
    /// `page_info` cursor suppresses every filter except `limit` and `fields`.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.clamp(MIN_LIMIT, MAX_LIMIT).to_string()));
        }

        if let Some(cursor) = non_empty(self.page_info.as_deref()) {
            pairs.push(("page_info", cursor.to_string()));
            if let Some(fields) = self.projected_fields() {
                pairs.push(("fields", fields));
            }
            return pairs;
        }

        if let Some(id) = self.since_id {
            pairs.push(("since_id", id.to_string()));
        }

        let text = [
            ("ids", &self.ids),
            ("status", &self.status),
            ("financial_status", &self.financial_status),
            ("fulfillment_status", &self.fulfillment_status),
            ("created_at_min", &self.created_at_min),
            ("created_at_max", &self.created_at_max),
            ("updated_at_min", &self.updated_at_min),
            ("updated_at_max", &self.updated_at_max),
            ("product_type", &self.product_type),
            ("vendor", &self.vendor),
            ("handle", &self.handle),
        ];
        for (key, value) in text {
            if let Some(v) = non_empty(value.as_deref()) {
                pairs.push((key, v.to_string()));
            }
        }

        if let Some(status) = self.published_status {
            pairs.push(("published_status", status.as_str().to_string()));
        }
        if let Some(id) = self.collection_id {
            pairs.push(("collection_id", id.to_string()));
        }
        if let Some(fields) = self.projected_fields() {
            pairs.push(("fields", fields));
        }

        pairs
    }

    /// Field projection with `id` guaranteed
    fn projected_fields(&self) -> Option<String> {
        let fields = non_empty(self.fields.as_deref())?;
        Some(ensure_id_field(fields))
    }

    /// Encoded query string including the leading `?`, or empty
    pub fn to_query_string(&self) -> String {
        let pairs = self.pairs();
        if pairs.is_empty() {
            return String::new();
        }
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &pairs {
            serializer.append_pair(key, value);
        }
        format!("?{}", serializer.finish())
    }
}

/// Append `id` to a comma-separated field list when missing
pub fn ensure_id_field(fields: &str) -> String {
    let parts: Vec<&str> = fields
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();
    if parts.contains(&"id") {
        parts.join(",")
    } else {
        let mut parts = parts;
        parts.push("id");
        parts.join(",")
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
