//! CLI module
//!
//! Command-line interface for running Shopify tasks.
//!
//! # Commands
//!
//! - `customers` - list, get, create, update, delete
//! - `orders` - list, get, create, delete
//! - `products` - list, get, create, update, delete
//! - `watch` - poll for newly created entities

mod commands;
mod runner;

pub use commands::{
    Cli, Commands, FetchTypeArg, ListArgs, OrderAction, PublishedStatusArg, ResourceAction,
    WatchArgs, WatchResource,
};
pub use runner::Runner;
