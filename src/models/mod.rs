//! Typed Shopify entities
//!
//! Every entity requires `id`; all other fields are optional and unknown
//! fields are ignored, so partial (`fields=`) responses still map. Absent
//! fields are omitted when serialized.

mod customer;
mod order;
mod product;
mod status;

pub use customer::{Customer, CustomerAddress};
pub use order::{
    Address, CurrencyExchangeAdjustment, DiscountAllocation, DiscountApplication, DiscountCode,
    Fulfillment, LineItem, Money, NoteAttribute, Order, OrderAdjustment, PaymentSchedule,
    PaymentTerms, PriceSet, Receipt, Refund, RefundLineItem, ShippingLine, TaxLine, Transaction,
};
pub use product::{Product, ProductImage, ProductOption, ProductVariant};
pub use status::{ProductStatus, PublishedStatus};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Behaviour shared by top-level entities
pub trait Entity: Serialize + DeserializeOwned + Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Shopify id
    fn id(&self) -> u64;

    /// Creation time, when the payload carried one
    fn created_at(&self) -> Option<DateTime<Utc>>;
}
