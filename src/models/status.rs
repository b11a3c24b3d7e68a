//! Product status filters

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Archived,
    Draft,
}

impl ProductStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Archived => "archived",
            ProductStatus::Draft => "draft",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(ProductStatus::Active),
            "archived" => Ok(ProductStatus::Archived),
            "draft" => Ok(ProductStatus::Draft),
            other => Err(format!("unknown product status: {other}")),
        }
    }
}

/// Sales channel publication filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishedStatus {
    Published,
    Unpublished,
    Any,
}

impl PublishedStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PublishedStatus::Published => "published",
            PublishedStatus::Unpublished => "unpublished",
            PublishedStatus::Any => "any",
        }
    }
}

impl fmt::Display for PublishedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublishedStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "published" => Ok(PublishedStatus::Published),
            "unpublished" => Ok(PublishedStatus::Unpublished),
            "any" => Ok(PublishedStatus::Any),
            other => Err(format!("unknown published status: {other}")),
        }
    }
}
