//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, ListArgs, OrderAction, ResourceAction, WatchArgs, WatchResource};
use crate::config::TaskSettings;
use crate::error::{Error, Result, ResultExt};
use crate::http::ShopifyClient;
use crate::output::StorageDestination;
use crate::resource::{Customers, Orders, Products, Resource, Updatable};
use crate::state::StateManager;
use crate::template::TemplateContext;
use crate::trigger::{ChangePoller, PollerConfig};
use crate::types::FetchType;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Environment fallbacks for credentials not given on the command line
const STORE_DOMAIN_ENV: &str = "SHOPIFY_STORE_DOMAIN";
const ACCESS_TOKEN_ENV: &str = "SHOPIFY_ACCESS_TOKEN";

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let settings = self.load_settings()?;
        let client = ShopifyClient::new(&settings.to_config()?)?;

        match &self.cli.command {
            Commands::Customers { action } => {
                self.resource_action::<Customers>(&client, action, &settings).await
            }
            Commands::Products { action } => {
                self.resource_action::<Products>(&client, action, &settings).await
            }
            Commands::Orders { action } => self.order_action(&client, action, &settings).await,
            Commands::Watch(args) => self.watch(client, args).await,
        }
    }

    /// Template context: process environment plus `--var` values
    fn template_context(&self) -> TemplateContext {
        let mut context = TemplateContext::from_process_env();
        for (name, value) in &self.cli.vars {
            context.set_var(name.clone(), Value::String(value.clone()));
        }
        context
    }

    /// Load settings from the file (if any), then apply flag and env overrides
    fn load_settings(&self) -> Result<TaskSettings> {
        let mut settings = match &self.cli.config {
            Some(path) => TaskSettings::from_file(path, &self.template_context())?,
            None => TaskSettings::default(),
        };

        if let Some(domain) = &self.cli.store_domain {
            settings.store_domain = Some(domain.clone());
        }
        if let Some(token) = &self.cli.access_token {
            settings.access_token = Some(token.clone());
        }
        if settings.store_domain.is_none() {
            settings.store_domain = std::env::var(STORE_DOMAIN_ENV).ok();
        }
        if settings.access_token.is_none() {
            settings.access_token = std::env::var(ACCESS_TOKEN_ENV).ok();
        }
        if let Some(version) = &self.cli.api_version {
            settings.api_version = version.clone();
        }
        if let Some(delay) = self.cli.rate_limit_delay_ms {
            settings.rate_limit_delay_ms = delay;
        }
        if let Some(timeout) = self.cli.timeout_secs {
            settings.timeout_seconds = timeout;
        }
        if let Some(endpoint) = &self.cli.endpoint {
            settings.endpoint = Some(endpoint.clone());
        }
        if let Some(output) = &self.cli.output {
            settings.output = Some(output.clone());
        }

        Ok(settings)
    }

    /// Storage destination; only opened for STORE
    fn storage(fetch_type: FetchType, settings: &TaskSettings) -> Result<Option<StorageDestination>> {
        match (&settings.output, fetch_type) {
            (Some(output), FetchType::Store) => Ok(Some(StorageDestination::parse(output)?)),
            _ => Ok(None),
        }
    }

    async fn resource_action<R>(
        &self,
        client: &ShopifyClient,
        action: &ResourceAction,
        settings: &TaskSettings,
    ) -> Result<()>
    where
        R: Updatable,
        R::Input: DeserializeOwned,
    {
        let resources = client.resource::<R>();
        match action {
            ResourceAction::List(args) => self.list::<R>(client, args, settings).await,
            ResourceAction::Get { id, fields } => {
                self.output(&resources.get(*id, fields.as_deref()).await?)
            }
            ResourceAction::Create { data } => {
                let input: R::Input = parse_input(data)?;
                self.output(&resources.create(&input).await?)
            }
            ResourceAction::Update { id, data } => {
                let input: R::Input = parse_input(data)?;
                self.output(&resources.update(*id, &input).await?)
            }
            ResourceAction::Delete { id } => self.output(&resources.delete(*id).await?),
        }
    }

    async fn order_action(
        &self,
        client: &ShopifyClient,
        action: &OrderAction,
        settings: &TaskSettings,
    ) -> Result<()> {
        let orders = client.orders();
        match action {
            OrderAction::List(args) => self.list::<Orders>(client, args, settings).await,
            OrderAction::Get { id, fields } => {
                self.output(&orders.get(*id, fields.as_deref()).await?)
            }
            OrderAction::Create { data } => {
                let input = parse_input(data)?;
                self.output(&orders.create(&input).await?)
            }
            OrderAction::Delete { id } => self.output(&orders.delete(*id).await?),
        }
    }

    async fn list<R: Resource>(
        &self,
        client: &ShopifyClient,
        args: &ListArgs,
        settings: &TaskSettings,
    ) -> Result<()> {
        let fetch_type = FetchType::from(args.fetch_type);
        let storage = Self::storage(fetch_type, settings)?;
        let output = client
            .resource::<R>()
            .fetch(&args.to_filters(), fetch_type, storage.as_ref())
            .await?;
        self.output(&output)
    }

    /// Watch for newly created entities
    async fn watch(&self, client: ShopifyClient, args: &WatchArgs) -> Result<()> {
        let state = match &args.state {
            Some(path) => StateManager::from_file(path)?,
            None => StateManager::in_memory(),
        };

        let mut config = PollerConfig::default()
            .interval(Duration::from_secs(args.interval_secs))
            .lookback(Duration::from_secs(args.lookback_secs))
            .max_results(args.max_results);
        if let Some(status) = &args.financial_status {
            config = config.financial_status(status.clone());
        }
        if let Some(status) = &args.fulfillment_status {
            config = config.fulfillment_status(status.clone());
        }

        match args.resource {
            WatchResource::Orders => {
                self.run_poller(ChangePoller::order_created(client, config), &state, args.once)
                    .await
            }
            WatchResource::Customers => {
                let poller: ChangePoller<Customers> = ChangePoller::created(client, config);
                self.run_poller(poller, &state, args.once).await
            }
            WatchResource::Products => {
                let poller: ChangePoller<Products> = ChangePoller::created(client, config);
                self.run_poller(poller, &state, args.once).await
            }
        }
    }

    async fn run_poller<R: Resource>(
        &self,
        poller: ChangePoller<R>,
        state: &StateManager,
        once: bool,
    ) -> Result<()> {
        if once {
            if let Some(event) = poller.poll_once(state).await? {
                output_line(&event)?;
            }
            return Ok(());
        }

        let (tx, mut rx) = mpsc::channel(16);
        let shutdown = async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => debug!("Received interrupt"),
                Err(e) => {
                    warn!(error = %e, "Failed to listen for interrupt");
                    std::future::pending::<()>().await;
                }
            }
        };
        let printer = async {
            while let Some(event) = rx.recv().await {
                output_line(&event)?;
            }
            Ok::<(), Error>(())
        };

        let (ran, printed) = tokio::join!(poller.run(state, tx, shutdown), printer);
        ran?;
        printed
    }

    /// Print one JSON document to stdout
    fn output<T: Serialize>(&self, value: &T) -> Result<()> {
        let text = if self.cli.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
        .context("Failed to serialize output")?;
        println!("{text}");
        Ok(())
    }
}

/// Print one compact JSON line to stdout
fn output_line<T: Serialize>(value: &T) -> Result<()> {
    let line = serde_json::to_string(value).context("Failed to serialize event")?;
    println!("{line}");
    Ok(())
}

/// Parse a JSON payload given inline or as `@path`
fn parse_input<T: DeserializeOwned>(data: &str) -> Result<T> {
    let contents = match data.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read input file {path}: {e}")))?,
        None => data.to_string(),
    };
    serde_json::from_str(&contents).map_err(|e| Error::config(format!("Invalid input JSON: {e}")))
}
