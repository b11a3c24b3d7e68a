//! Order entity and its nested records

use super::{Customer, Entity};
use crate::types::JsonValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// A store order
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub admin_graphql_api_id: Option<String>,
    pub app_id: Option<u64>,
    pub browser_ip: Option<String>,
    pub buyer_accepts_marketing: Option<bool>,
    pub cancel_reason: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cart_token: Option<String>,
    pub checkout_id: Option<u64>,
    pub checkout_token: Option<String>,
    pub closed_at: Option<DateTime<Utc>>,
    pub confirmed: Option<bool>,
    pub contact_email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub currency: Option<String>,
    pub current_subtotal_price: Option<String>,
    pub current_subtotal_price_set: Option<PriceSet>,
    pub current_total_discounts: Option<String>,
    pub current_total_discounts_set: Option<PriceSet>,
    pub current_total_duties_set: Option<PriceSet>,
    pub current_total_price: Option<String>,
    pub current_total_price_set: Option<PriceSet>,
    pub current_total_tax: Option<String>,
    pub current_total_tax_set: Option<PriceSet>,
    pub customer_locale: Option<String>,
    pub device_id: Option<String>,
    pub discount_codes: Option<Vec<DiscountCode>>,
    pub email: Option<String>,
    pub estimated_taxes: Option<bool>,
    pub financial_status: Option<String>,
    pub fulfillment_status: Option<String>,
    pub gateway: Option<String>,
    pub landing_site: Option<String>,
    pub landing_site_ref: Option<String>,
    pub location_id: Option<u64>,
    pub name: Option<String>,
    pub note: Option<String>,
    pub note_attributes: Option<Vec<NoteAttribute>>,
    pub number: Option<u64>,
    pub order_number: Option<u64>,
    pub order_status_url: Option<String>,
    pub original_total_duties_set: Option<PriceSet>,
    pub payment_gateway_names: Option<Vec<String>>,
    pub phone: Option<String>,
    pub presentment_currency: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub processing_method: Option<String>,
    pub reference: Option<String>,
    pub referring_site: Option<String>,
    pub source_identifier: Option<String>,
    pub source_name: Option<String>,
    pub source_url: Option<String>,
    pub subtotal_price: Option<String>,
    pub subtotal_price_set: Option<PriceSet>,
    pub tags: Option<String>,
    pub tax_lines: Option<Vec<TaxLine>>,
    pub taxes_included: Option<bool>,
    pub test: Option<bool>,
    pub token: Option<String>,
    pub total_discounts: Option<String>,
    pub total_discounts_set: Option<PriceSet>,
    pub total_line_items_price: Option<String>,
    pub total_line_items_price_set: Option<PriceSet>,
    pub total_outstanding: Option<String>,
    pub total_price: Option<String>,
    pub total_price_set: Option<PriceSet>,
    pub total_price_usd: Option<String>,
    pub total_shipping_price_set: Option<PriceSet>,
    pub total_tax: Option<String>,
    pub total_tax_set: Option<PriceSet>,
    pub total_tip_received: Option<String>,
    pub total_weight: Option<i64>,
    pub updated_at: Option<DateTime<Utc>>,
    pub user_id: Option<u64>,
    pub billing_address: Option<Address>,
    pub customer: Option<Customer>,
    pub discount_applications: Option<Vec<DiscountApplication>>,
    pub fulfillments: Option<Vec<Fulfillment>>,
    pub line_items: Option<Vec<LineItem>>,
    pub payment_terms: Option<PaymentTerms>,
    pub refunds: Option<Vec<Refund>>,
    pub shipping_address: Option<Address>,
    pub shipping_lines: Option<Vec<ShippingLine>>,
}

impl Entity for Order {
    fn id(&self) -> u64 {
        self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

// ============================================================================
// Money
// ============================================================================

/// An amount in shop and presentment currencies
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSet {
    pub shop_money: Option<Money>,
    pub presentment_money: Option<Money>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub amount: Option<String>,
    pub currency_code: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscountCode {
    pub code: Option<String>,
    pub amount: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteAttribute {
    pub name: Option<String>,
    pub value: Option<JsonValue>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxLine {
    pub price: Option<String>,
    pub rate: Option<f64>,
    pub title: Option<String>,
    pub price_set: Option<PriceSet>,
    pub channel_liable: Option<bool>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscountApplication {
    pub target_type: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: Option<String>,
    pub value_type: Option<String>,
    pub allocation_method: Option<String>,
    pub target_selection: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscountAllocation {
    pub amount: Option<String>,
    pub amount_set: Option<PriceSet>,
    pub discount_application_index: Option<i64>,
}

// ============================================================================
// Addresses & Line Items
// ============================================================================

/// Billing or shipping address on an order
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
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
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: Option<u64>,
    pub admin_graphql_api_id: Option<String>,
    pub fulfillable_quantity: Option<i64>,
    pub fulfillment_service: Option<String>,
    pub fulfillment_status: Option<String>,
    pub gift_card: Option<bool>,
    pub grams: Option<i64>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub price_set: Option<PriceSet>,
    pub product_exists: Option<bool>,
    pub product_id: Option<u64>,
    pub properties: Option<JsonValue>,
    pub quantity: Option<i64>,
    pub requires_shipping: Option<bool>,
    pub sku: Option<String>,
    pub taxable: Option<bool>,
    pub title: Option<String>,
    pub total_discount: Option<String>,
    pub total_discount_set: Option<PriceSet>,
    pub variant_id: Option<u64>,
    pub variant_inventory_management: Option<String>,
    pub variant_title: Option<String>,
    pub vendor: Option<String>,
    pub tax_lines: Option<Vec<TaxLine>>,
    pub duties: Option<Vec<JsonValue>>,
    pub discount_allocations: Option<Vec<DiscountAllocation>>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingLine {
    pub id: Option<u64>,
    pub carrier_identifier: Option<String>,
    pub code: Option<String>,
    pub delivery_category: Option<String>,
    pub discounted_price: Option<String>,
    pub discounted_price_set: Option<PriceSet>,
    pub phone: Option<String>,
    pub price: Option<String>,
    pub price_set: Option<PriceSet>,
    pub requested_fulfillment_service_id: Option<String>,
    pub source: Option<String>,
    pub title: Option<String>,
    pub tax_lines: Option<Vec<TaxLine>>,
    pub discount_allocations: Option<Vec<DiscountAllocation>>,
}

// ============================================================================
// Fulfillment & Payment
// ============================================================================

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fulfillment {
    pub id: Option<u64>,
    pub order_id: Option<u64>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub service: Option<String>,
    pub tracking_company: Option<String>,
    pub tracking_number: Option<String>,
    pub tracking_numbers: Option<Vec<String>>,
    pub tracking_url: Option<String>,
    pub tracking_urls: Option<Vec<String>>,
    pub receipt: Option<Receipt>,
    pub line_items: Option<Vec<LineItem>>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub testcase: Option<bool>,
    pub authorization: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentTerms {
    pub amount: Option<JsonValue>,
    pub currency: Option<String>,
    pub payment_terms_name: Option<String>,
    pub payment_terms_type: Option<String>,
    pub due_in_days: Option<i64>,
    pub payment_schedules: Option<Vec<PaymentSchedule>>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentSchedule {
    pub amount: Option<JsonValue>,
    pub currency: Option<String>,
    pub issued_at: Option<DateTime<Utc>>,
    pub due_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub expected_payment_method: Option<String>,
}

// ============================================================================
// Refunds
// ============================================================================

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Refund {
    pub id: Option<u64>,
    pub admin_graphql_api_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub order_id: Option<u64>,
    pub processed_at: Option<DateTime<Utc>>,
    pub restock: Option<bool>,
    pub total_duties_set: Option<PriceSet>,
    pub user_id: Option<u64>,
    pub order_adjustments: Option<Vec<OrderAdjustment>>,
    pub transactions: Option<Vec<Transaction>>,
    pub refund_line_items: Option<Vec<RefundLineItem>>,
    pub duties: Option<Vec<JsonValue>>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderAdjustment {
    pub id: Option<u64>,
    pub order_id: Option<u64>,
    pub refund_id: Option<u64>,
    pub amount: Option<String>,
    pub tax_amount: Option<String>,
    pub kind: Option<String>,
    pub reason: Option<String>,
    pub amount_set: Option<PriceSet>,
    pub tax_amount_set: Option<PriceSet>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Option<u64>,
    pub admin_graphql_api_id: Option<String>,
    pub amount: Option<String>,
    pub authorization: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub currency: Option<String>,
    pub device_id: Option<String>,
    pub error_code: Option<String>,
    pub gateway: Option<String>,
    pub kind: Option<String>,
    pub location_id: Option<u64>,
    pub message: Option<String>,
    pub order_id: Option<u64>,
    pub parent_id: Option<u64>,
    pub processed_at: Option<DateTime<Utc>>,
    pub receipt: Option<JsonValue>,
    pub source_name: Option<String>,
    pub status: Option<String>,
    pub test: Option<bool>,
    pub user_id: Option<u64>,
    pub currency_exchange_adjustment: Option<CurrencyExchangeAdjustment>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrencyExchangeAdjustment {
    pub adjustment: Option<String>,
    pub original_amount: Option<String>,
    pub final_amount: Option<String>,
    pub currency: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefundLineItem {
    pub id: Option<u64>,
    pub line_item_id: Option<u64>,
    pub location_id: Option<u64>,
    pub quantity: Option<i64>,
    pub restock_type: Option<String>,
    pub subtotal: Option<JsonValue>,
    pub subtotal_set: Option<PriceSet>,
    pub total_tax: Option<JsonValue>,
    pub total_tax_set: Option<PriceSet>,
    pub line_item: Option<LineItem>,
}
