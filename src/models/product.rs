//! Product entity

use super::Entity;
use crate::types::JsonValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// A catalog product
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: Option<String>,
    pub body_html: Option<String>,
    pub vendor: Option<String>,
    pub product_type: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub published_scope: Option<String>,
    pub tags: Option<String>,
    /// Raw status string; see [`ProductStatus`](super::ProductStatus) for filters
    pub status: Option<String>,
    pub admin_graphql_api_id: Option<String>,
    pub variants: Option<Vec<ProductVariant>>,
    pub options: Option<Vec<ProductOption>>,
    pub images: Option<Vec<ProductImage>>,
    pub handle: Option<String>,
    pub template_suffix: Option<String>,
    pub metafields: Option<JsonValue>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: Option<u64>,
    pub product_id: Option<u64>,
    pub title: Option<String>,
    pub price: Option<String>,
    pub sku: Option<String>,
    pub position: Option<i64>,
    pub inventory_policy: Option<String>,
    pub compare_at_price: Option<String>,
    pub fulfillment_service: Option<String>,
    pub inventory_management: Option<String>,
    pub option1: Option<String>,
    pub option2: Option<String>,
    pub option3: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub taxable: Option<bool>,
    pub barcode: Option<String>,
    pub grams: Option<f64>,
    pub image_id: Option<u64>,
    pub weight: Option<f64>,
    pub weight_unit: Option<String>,
    pub inventory_item_id: Option<u64>,
    pub inventory_quantity: Option<i64>,
    pub old_inventory_quantity: Option<i64>,
    pub requires_shipping: Option<bool>,
    pub admin_graphql_api_id: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductOption {
    pub id: Option<u64>,
    pub product_id: Option<u64>,
    pub name: Option<String>,
    pub position: Option<i64>,
    pub values: Option<Vec<String>>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: Option<u64>,
    pub product_id: Option<u64>,
    pub position: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub alt: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub src: Option<String>,
    pub variant_ids: Option<Vec<u64>>,
    pub admin_graphql_api_id: Option<String>,
}

impl Entity for Product {
    fn id(&self) -> u64 {
        self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
