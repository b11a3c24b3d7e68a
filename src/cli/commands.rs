//! CLI commands and argument parsing

use crate::models::PublishedStatus;
use crate::query::QueryFilters;
use crate::types::FetchType;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Shopify Admin REST task runner
#[derive(Parser, Debug)]
#[command(name = "shopify-tasks")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML or JSON, `{{ env.NAME }}` templates allowed)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Store domain, e.g. my-store.myshopify.com
    #[arg(long, global = true)]
    pub store_domain: Option<String>,

    /// Admin API access token (falls back to SHOPIFY_ACCESS_TOKEN)
    #[arg(long, global = true)]
    pub access_token: Option<String>,

    /// Admin API version
    #[arg(long, global = true)]
    pub api_version: Option<String>,

    /// Delay before each call in milliseconds
    #[arg(long, global = true)]
    pub rate_limit_delay_ms: Option<u64>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Origin override (proxies, mock servers)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Storage destination for STORE fetches
    /// Supports: /path, s3://bucket/path, r2://bucket/path, gs://bucket/path, az://container/path
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Template variable for the settings file (name=value)
    #[arg(long = "var", global = true, value_parser = parse_var)]
    pub vars: Vec<(String, String)>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Customer operations
    Customers {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Order operations
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },

    /// Product operations
    Products {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Poll for newly created entities and print one JSON line per batch
    Watch(WatchArgs),
}

/// Operations on customers and products
#[derive(Subcommand, Debug)]
pub enum ResourceAction {
    /// List one page
    List(ListArgs),

    /// Fetch one entity by id
    Get {
        id: u64,

        /// Comma-separated field projection
        #[arg(long)]
        fields: Option<String>,
    },

    /// Create an entity from a JSON payload
    Create {
        /// JSON payload, or @path to read it from a file
        #[arg(long)]
        data: String,
    },

    /// Update an entity with a JSON payload
    Update {
        id: u64,

        /// JSON payload, or @path to read it from a file
        #[arg(long)]
        data: String,
    },

    /// Delete an entity
    Delete { id: u64 },
}

/// Operations on orders
#[derive(Subcommand, Debug)]
pub enum OrderAction {
    /// List one page
    List(ListArgs),

    /// Fetch one order by id
    Get {
        id: u64,

        /// Comma-separated field projection
        #[arg(long)]
        fields: Option<String>,
    },

    /// Create an order from a JSON payload
    Create {
        /// JSON payload, or @path to read it from a file
        #[arg(long)]
        data: String,
    },

    /// Delete an order
    Delete { id: u64 },
}

/// Filters and fetch type of a list call
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// How results are returned
    #[arg(long, value_enum, default_value = "fetch")]
    pub fetch_type: FetchTypeArg,

    /// Page size (clamped to 1..=250)
    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long)]
    pub since_id: Option<u64>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub financial_status: Option<String>,

    #[arg(long)]
    pub fulfillment_status: Option<String>,

    #[arg(long)]
    pub created_at_min: Option<String>,

    #[arg(long)]
    pub created_at_max: Option<String>,

    #[arg(long)]
    pub updated_at_min: Option<String>,

    #[arg(long)]
    pub updated_at_max: Option<String>,

    /// Cursor from a previous page's next/previous_page_info
    #[arg(long)]
    pub page_info: Option<String>,

    #[arg(long)]
    pub fields: Option<String>,

    #[arg(long)]
    pub product_type: Option<String>,

    #[arg(long)]
    pub vendor: Option<String>,

    #[arg(long)]
    pub handle: Option<String>,

    #[arg(long, value_enum)]
    pub published_status: Option<PublishedStatusArg>,

    #[arg(long)]
    pub collection_id: Option<u64>,

    /// Comma-separated ids
    #[arg(long)]
    pub ids: Option<String>,
}

impl ListArgs {
    /// Collect the set flags into query filters
    pub fn to_filters(&self) -> QueryFilters {
        QueryFilters {
            limit: self.limit,
            since_id: self.since_id,
            status: self.status.clone(),
            financial_status: self.financial_status.clone(),
            fulfillment_status: self.fulfillment_status.clone(),
            created_at_min: self.created_at_min.clone(),
            created_at_max: self.created_at_max.clone(),
            updated_at_min: self.updated_at_min.clone(),
            updated_at_max: self.updated_at_max.clone(),
            page_info: self.page_info.clone(),
            fields: self.fields.clone(),
            product_type: self.product_type.clone(),
            vendor: self.vendor.clone(),
            handle: self.handle.clone(),
            published_status: self.published_status.map(Into::into),
            collection_id: self.collection_id,
            ids: self.ids.clone(),
        }
    }
}

/// Arguments of the `watch` command
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Resource to watch
    #[arg(value_enum)]
    pub resource: WatchResource,

    /// State file holding the watermark; in-memory when omitted
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Seconds between polls
    #[arg(long, default_value = "300")]
    pub interval_secs: u64,

    /// Seconds to look back on the first poll
    #[arg(long, default_value = "600")]
    pub lookback_secs: u64,

    /// Page size of each poll
    #[arg(long, default_value = "10")]
    pub max_results: u32,

    /// Only orders with this financial status
    #[arg(long)]
    pub financial_status: Option<String>,

    /// Only orders with this fulfillment status
    #[arg(long)]
    pub fulfillment_status: Option<String>,

    /// Poll once and exit
    #[arg(long)]
    pub once: bool,
}

/// Fetch type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FetchTypeArg {
    /// Return every entity inline
    #[default]
    Fetch,
    /// Return only the first entity
    FetchOne,
    /// Write entities to the output destination
    Store,
}

impl From<FetchTypeArg> for FetchType {
    fn from(arg: FetchTypeArg) -> Self {
        match arg {
            FetchTypeArg::Fetch => FetchType::Fetch,
            FetchTypeArg::FetchOne => FetchType::FetchOne,
            FetchTypeArg::Store => FetchType::Store,
        }
    }
}

/// Published status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PublishedStatusArg {
    Published,
    Unpublished,
    Any,
}

impl From<PublishedStatusArg> for PublishedStatus {
    fn from(arg: PublishedStatusArg) -> Self {
        match arg {
            PublishedStatusArg::Published => PublishedStatus::Published,
            PublishedStatusArg::Unpublished => PublishedStatus::Unpublished,
            PublishedStatusArg::Any => PublishedStatus::Any,
        }
    }
}

/// Watchable resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum WatchResource {
    Orders,
    Customers,
    Products,
}

fn parse_var(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_list_with_filters() {
        let cli = Cli::try_parse_from([
            "shopify-tasks",
            "--store-domain",
            "shop.myshopify.com",
            "orders",
            "list",
            "--limit",
            "50",
            "--financial-status",
            "paid",
            "--fetch-type",
            "fetch-one",
        ])
        .unwrap();

        assert_eq!(cli.store_domain.as_deref(), Some("shop.myshopify.com"));
        let Commands::Orders {
            action: OrderAction::List(args),
        } = cli.command
        else {
            panic!("expected orders list");
        };
        assert_eq!(args.fetch_type, FetchTypeArg::FetchOne);
        let filters = args.to_filters();
        assert_eq!(filters.limit, Some(50));
        assert_eq!(filters.financial_status.as_deref(), Some("paid"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "shopify-tasks",
            "products",
            "list",
            "--published-status",
            "unpublished",
            "-o",
            "s3://bucket/shopify",
            "--var",
            "shop=demo",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.output.as_deref(), Some("s3://bucket/shopify"));
        assert_eq!(cli.vars, vec![("shop".to_string(), "demo".to_string())]);
        let Commands::Products {
            action: ResourceAction::List(args),
        } = cli.command
        else {
            panic!("expected products list");
        };
        assert_eq!(
            args.to_filters().published_status,
            Some(PublishedStatus::Unpublished)
        );
    }

    #[test]
    fn test_orders_have_no_update() {
        let result = Cli::try_parse_from(["shopify-tasks", "orders", "update", "1", "--data", "{}"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_watch() {
        let cli = Cli::try_parse_from([
            "shopify-tasks",
            "watch",
            "orders",
            "--state",
            "state.json",
            "--interval-secs",
            "60",
            "--once",
        ])
        .unwrap();

        let Commands::Watch(args) = cli.command else {
            panic!("expected watch");
        };
        assert_eq!(args.resource, WatchResource::Orders);
        assert_eq!(args.interval_secs, 60);
        assert_eq!(args.lookback_secs, 600);
        assert_eq!(args.max_results, 10);
        assert!(args.once);
    }

    #[test]
    fn test_invalid_var() {
        assert!(parse_var("novalue").is_err());
        assert!(parse_var("=x").is_err());
        assert_eq!(parse_var("a=b=c").unwrap(), ("a".to_string(), "b=c".to_string()));
    }

    #[test]
    fn test_fetch_type_conversion() {
        assert_eq!(FetchType::from(FetchTypeArg::Store), FetchType::Store);
        assert_eq!(FetchType::from(FetchTypeArg::default()), FetchType::Fetch);
    }
}
