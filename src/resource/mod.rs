//! Resource operations
//!
//! One generic implementation of list, get, create, update and delete,
//! parameterised by a [`Resource`] schema. Each Shopify resource only
//! supplies its envelope names and types.

mod input;

pub use input::{
    AddressInput, CustomerInput, EntityInput, LineItemInput, OrderInput, ProductInput, SeoInput,
};

use crate::decode;
use crate::error::{Error, Result};
use crate::fetch::{self, DeleteOutput, ListOutput, Page};
use crate::http::{PageLinks, ShopifyClient};
use crate::models::{Customer, Entity, Order, Product};
use crate::output::StorageDestination;
use crate::query::QueryFilters;
use crate::types::{FetchType, JsonObject, JsonValue, Method};
use std::marker::PhantomData;
use tracing::{debug, info};

/// Schema of a REST resource
pub trait Resource: Send + Sync + 'static {
    /// Mapped entity type
    type Entity: Entity;
    /// Create/update payload type
    type Input: EntityInput;

    /// Single-entity envelope key, e.g. `order`
    const SINGULAR: &'static str;
    /// List envelope key and path segment, e.g. `orders`
    const PLURAL: &'static str;

    fn collection_path() -> String {
        format!("/{}.json", Self::PLURAL)
    }

    fn member_path(id: u64) -> String {
        format!("/{}/{id}.json", Self::PLURAL)
    }
}

/// Resources that accept update calls
pub trait Updatable: Resource {}

/// `/customers.json`
#[derive(Debug, Clone, Copy)]
pub struct Customers;

impl Resource for Customers {
    type Entity = Customer;
    type Input = CustomerInput;
    const SINGULAR: &'static str = "customer";
    const PLURAL: &'static str = "customers";
}

impl Updatable for Customers {}

/// `/orders.json`
#[derive(Debug, Clone, Copy)]
pub struct Orders;

impl Resource for Orders {
    type Entity = Order;
    type Input = OrderInput;
    const SINGULAR: &'static str = "order";
    const PLURAL: &'static str = "orders";
}

/// `/products.json`
#[derive(Debug, Clone, Copy)]
pub struct Products;

impl Resource for Products {
    type Entity = Product;
    type Input = ProductInput;
    const SINGULAR: &'static str = "product";
    const PLURAL: &'static str = "products";
}

impl Updatable for Products {}

/// Typed operations on one resource
#[derive(Debug)]
pub struct Resources<'c, R> {
    client: &'c ShopifyClient,
    _resource: PhantomData<R>,
}

impl<'c, R: Resource> Resources<'c, R> {
    pub(crate) fn new(client: &'c ShopifyClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    /// Fetch one page of entities
    pub async fn list(&self, filters: &QueryFilters) -> Result<Page<R::Entity>> {
        let path = format!("{}{}", R::collection_path(), filters.to_query_string());
        let response = self.client.send(Method::GET, &path, None).await?;

        let links = PageLinks::from_header(response.link.as_deref());
        let mut body = decode::decode_response(&response)?;
        let entities: Vec<R::Entity> = decode::map_entities(decode::take_list(&mut body, R::PLURAL)?)?;

        info!("Retrieved {} {}", entities.len(), R::PLURAL);
        Ok(Page { entities, links })
    }

    /// List and shape the result with a fetch type
    pub async fn fetch(
        &self,
        filters: &QueryFilters,
        fetch_type: FetchType,
        storage: Option<&StorageDestination>,
    ) -> Result<ListOutput<R::Entity>> {
        fetch::ensure_destination(fetch_type, storage)?;
        let page = self.list(filters).await?;
        fetch::apply_fetch_type(fetch_type, R::PLURAL, page, storage).await
    }

    /// Fetch one entity, optionally projected to `fields`
    pub async fn get(&self, id: u64, fields: Option<&str>) -> Result<R::Entity> {
        let mut path = R::member_path(id);
        if let Some(fields) = fields {
            path.push_str(&QueryFilters::new().fields(fields).to_query_string());
        }

        let mut body = self.client.send_json(Method::GET, &path, None).await?;
        let value =
            decode::take_single(&mut body, R::SINGULAR).ok_or_else(|| Error::not_found(R::SINGULAR, id))?;

        debug!(id, "Retrieved {}", R::SINGULAR);
        decode::map_entity(value)
    }

    /// Create an entity
    pub async fn create(&self, input: &R::Input) -> Result<R::Entity> {
        let body = envelope(R::SINGULAR, input.create_payload()?);
        let mut decoded = self
            .client
            .send_json(Method::POST, &R::collection_path(), Some(&body))
            .await?;

        let value = decode::take_single(&mut decoded, R::SINGULAR).ok_or_else(|| {
            Error::decode(format!("Failed to create {}: no {} returned", R::SINGULAR, R::SINGULAR))
        })?;
        let entity: R::Entity = decode::map_entity(value)?;

        info!(id = entity.id(), "Created {}", R::SINGULAR);
        Ok(entity)
    }

    /// Delete an entity. Shopify answers exactly 200 on success.
    pub async fn delete(&self, id: u64) -> Result<DeleteOutput> {
        let response = self
            .client
            .send(Method::DELETE, &R::member_path(id), None)
            .await?;
        decode::expect_status(&response, 200)?;

        info!(id, "Deleted {}", R::SINGULAR);
        Ok(DeleteOutput { id, deleted: true })
    }
}

impl<R: Updatable> Resources<'_, R> {
    /// Update an entity with the fields set on `input`
    pub async fn update(&self, id: u64, input: &R::Input) -> Result<R::Entity> {
        let mut payload = input.update_payload()?;
        payload.insert("id".to_string(), JsonValue::from(id));
        let body = envelope(R::SINGULAR, payload);

        let mut decoded = self
            .client
            .send_json(Method::PUT, &R::member_path(id), Some(&body))
            .await?;

        let value = decode::take_single(&mut decoded, R::SINGULAR).ok_or_else(|| {
            Error::decode(format!("Failed to update {} {id}: no {} returned", R::SINGULAR, R::SINGULAR))
        })?;

        info!(id, "Updated {}", R::SINGULAR);
        decode::map_entity(value)
    }
}

/// Wrap a payload under its envelope key
fn envelope(key: &str, payload: JsonObject) -> JsonValue {
    let mut map = JsonObject::new();
    map.insert(key.to_string(), JsonValue::Object(payload));
    JsonValue::Object(map)
}
