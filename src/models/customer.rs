//! Customer entity

use super::Entity;
use crate::types::JsonValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// A store customer
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: u64,
    pub email: Option<String>,
    pub accepts_marketing: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub orders_count: Option<i64>,
    pub state: Option<String>,
    pub total_spent: Option<String>,
    pub last_order_id: Option<u64>,
    pub note: Option<String>,
    pub verified_email: Option<bool>,
    pub multipass_identifier: Option<String>,
    pub tax_exempt: Option<bool>,
    pub phone: Option<String>,
    pub tags: Option<String>,
    pub last_order_name: Option<String>,
    pub currency: Option<String>,
    pub accepts_marketing_updated_at: Option<DateTime<Utc>>,
    pub marketing_opt_in_level: Option<String>,
    pub tax_exemptions: Option<Vec<String>>,
    pub admin_graphql_api_id: Option<String>,
    pub default_address: Option<CustomerAddress>,
    pub addresses: Option<Vec<CustomerAddress>>,
    pub metafields: Option<JsonValue>,
}

/// A postal address stored on a customer
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerAddress {
    pub id: Option<u64>,
    pub customer_id: Option<u64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub name: Option<String>,
    pub province_code: Option<String>,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    #[serde(rename = "default")]
    pub is_default: Option<bool>,
}

impl Entity for Customer {
    fn id(&self) -> u64 {
        self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
