//! Create and update payloads

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// A request payload for create or update calls
pub trait EntityInput: Serialize + Send + Sync {
    /// Payload for a create call, with required fields checked and
    /// create-time defaults applied
    fn create_payload(&self) -> Result<JsonObject>;

    /// Payload for an update call; at least one field must be set
    fn update_payload(&self) -> Result<JsonObject> {
        let payload = to_object(self)?;
        if payload.is_empty() {
            return Err(Error::config("At least one field must be provided for update"));
        }
        Ok(payload)
    }
}

fn to_object<T: Serialize + ?Sized>(input: &T) -> Result<JsonObject> {
    match serde_json::to_value(input)? {
        JsonValue::Object(map) => Ok(map),
        _ => Err(Error::config("Input must serialize to a JSON object")),
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

// ============================================================================
// Customers
// ============================================================================

/// Customer fields for create and update calls
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerInput {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub accepts_marketing: Option<bool>,
    pub verified_email: Option<bool>,
    pub tax_exempt: Option<bool>,
    pub tags: Option<String>,
    pub note: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    pub send_email_invite: Option<bool>,
    pub addresses: Option<Vec<AddressInput>>,
    pub metafields: Option<Vec<JsonValue>>,
}

impl EntityInput for CustomerInput {
    fn create_payload(&self) -> Result<JsonObject> {
        if is_blank(self.email.as_deref()) {
            return Err(Error::missing_field("email"));
        }
        if self.password.is_some() && self.password != self.password_confirmation {
            return Err(Error::config("password and password_confirmation must match"));
        }
        to_object(self)
    }
}

// ============================================================================
// Orders
// ============================================================================

/// A postal address in a create payload
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub province_code: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
}

/// One line of a new order
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItemInput {
    pub variant_id: Option<u64>,
    pub product_id: Option<u64>,
    pub quantity: Option<u32>,
    pub price: Option<String>,
    pub title: Option<String>,
    pub sku: Option<String>,
    pub gift_card: Option<bool>,
    pub requires_shipping: Option<bool>,
    pub taxable: Option<bool>,
    pub fulfillment_service: Option<String>,
    pub properties: Option<JsonValue>,
}

/// Order fields for create calls
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderInput {
    #[serde(default)]
    pub line_items: Vec<LineItemInput>,
    pub email: Option<String>,
    /// Attach the order to an existing customer
    pub customer_id: Option<u64>,
    pub financial_status: Option<String>,
    pub note: Option<String>,
    pub tags: Option<String>,
    pub currency: Option<String>,
    pub billing_address: Option<AddressInput>,
    pub shipping_address: Option<AddressInput>,
    pub inventory_behaviour: Option<String>,
    pub send_receipt: Option<bool>,
    pub send_fulfillment_receipt: Option<bool>,
}

impl EntityInput for OrderInput {
    fn create_payload(&self) -> Result<JsonObject> {
        if self.line_items.is_empty() {
            return Err(Error::config("At least one line item is required"));
        }

        let mut payload = to_object(self)?;

        // Shopify takes the customer as a nested reference
        payload.remove("customer_id");
        if let Some(id) = self.customer_id {
            payload.insert("customer".into(), serde_json::json!({ "id": id }));
        } else if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            payload.insert("customer".into(), serde_json::json!({ "email": email }));
        }

        payload
            .entry("financial_status")
            .or_insert_with(|| "pending".into());
        payload
            .entry("inventory_behaviour")
            .or_insert_with(|| "bypass".into());
        payload.entry("send_receipt").or_insert(JsonValue::Bool(false));
        payload
            .entry("send_fulfillment_receipt")
            .or_insert(JsonValue::Bool(false));

        Ok(payload)
    }
}

// ============================================================================
// Products
// ============================================================================

/// Search engine listing fields
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoInput {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Product fields for create and update calls
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub title: Option<String>,
    pub body_html: Option<String>,
    pub vendor: Option<String>,
    pub product_type: Option<String>,
    pub tags: Option<String>,
    pub status: Option<String>,
    pub handle: Option<String>,
    pub template_suffix: Option<String>,
    pub published_scope: Option<String>,
    pub seo: Option<SeoInput>,
}

impl EntityInput for ProductInput {
    fn create_payload(&self) -> Result<JsonObject> {
        if is_blank(self.title.as_deref()) {
            return Err(Error::missing_field("title"));
        }
        let mut payload = to_object(self)?;
        payload.entry("status").or_insert_with(|| "draft".into());
        Ok(payload)
    }
}
