// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Shopify Tasks
//!
//! Task operations over the Shopify Admin REST API, plus a polling trigger
//! for newly created entities.
//!
//! ## Features
//!
//! - **CRUD tasks**: list, get, create, update and delete for customers,
//!   orders and products
//! - **Fetch policy**: return a page inline (`FETCH`), only its first entity
//!   (`FETCH_ONE`), or write it to local or cloud storage (`STORE`)
//! - **Change detection**: poll for new entities behind a persisted watermark
//! - **Fixed-delay rate limiting** before every call
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shopify_tasks::{FetchType, QueryFilters, Result, ShopifyClient, ShopifyConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ShopifyConfig::new("my-store.myshopify.com", "shpat_...");
//!     let client = ShopifyClient::new(&config)?;
//!
//!     let filters = QueryFilters::new().status("any").limit(50);
//!     let output = client.orders().fetch(&filters, FetchType::Fetch, None).await?;
//!     println!("{} orders", output.count);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │        Resources<Customers | Orders | Products>                 │
//! │   list / fetch    get    create    update    delete             │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │ Request  │ Rate      │ Transport     │ Decode    │ Fetch       │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ URL      │ Fixed     │ reqwest       │ Status    │ FETCH       │
//! │ Headers  │ delay     │ (or fake)     │ Envelope  │ FETCH_ONE   │
//! │ Body     │           │               │ Mapping   │ STORE       │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration and settings files
pub mod config;

/// Template interpolation
pub mod template;

/// Request building, rate limiting and transport
pub mod http;

/// Response decoding and entity mapping
pub mod decode;

/// Entity models
pub mod models;

/// List query filters
pub mod query;

/// Fetch policy
pub mod fetch;

/// Storage destinations
pub mod output;

/// Resource operations
pub mod resource;

/// Trigger state persistence
pub mod state;

/// Change-detection triggers
pub mod trigger;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ShopifyConfig, TaskSettings};
pub use error::{Error, Result};
pub use fetch::{DeleteOutput, ListOutput, Page};
pub use http::ShopifyClient;
pub use output::StorageDestination;
pub use query::QueryFilters;
pub use resource::{Customers, Orders, Products, Resource, Resources};
pub use state::StateManager;
pub use trigger::{ChangePoller, PollEvent, PollerConfig};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
