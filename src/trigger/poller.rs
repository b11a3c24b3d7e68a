//! Watermark poller

use super::types::{PollEvent, PollerConfig, PollerPhase};
use crate::error::{Error, Result};
use crate::http::ShopifyClient;
use crate::models::Entity;
use crate::resource::{Orders, Resource};
use crate::state::StateManager;
use chrono::{DateTime, TimeDelta, Utc};
use std::future::Future;
use std::marker::PhantomData;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// Polls a list endpoint for entities created after a stored watermark
#[derive(Debug)]
pub struct ChangePoller<R> {
    client: ShopifyClient,
    trigger_id: String,
    config: PollerConfig,
    phase: watch::Sender<PollerPhase>,
    _resource: PhantomData<R>,
}

impl ChangePoller<Orders> {
    /// Poller for newly created orders, stored under `order_created`
    pub fn order_created(client: ShopifyClient, config: PollerConfig) -> Self {
        Self::created(client, config)
    }
}

impl<R: Resource> ChangePoller<R> {
    /// Create a poller storing its watermark under `trigger_id`
    pub fn new(client: ShopifyClient, trigger_id: impl Into<String>, config: PollerConfig) -> Self {
        let (phase, _) = watch::channel(PollerPhase::Idle);
        Self {
            client,
            trigger_id: trigger_id.into(),
            config,
            phase,
            _resource: PhantomData,
        }
    }

    /// Poller stored under `{singular}_created`, e.g. `customer_created`
    pub fn created(client: ShopifyClient, config: PollerConfig) -> Self {
        Self::new(client, format!("{}_created", R::SINGULAR), config)
    }

    pub fn trigger_id(&self) -> &str {
        &self.trigger_id
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    pub fn phase(&self) -> PollerPhase {
        *self.phase.borrow()
    }

    /// Subscribe to phase changes
    pub fn watch_phase(&self) -> watch::Receiver<PollerPhase> {
        self.phase.subscribe()
    }

    /// Run one poll cycle.
    ///
    /// Returns `None` when nothing new was created; the stored watermark is
    /// then left untouched. List failures propagate without touching state.
    pub async fn poll_once(&self, state: &StateManager) -> Result<Option<PollEvent<R::Entity>>> {
        self.phase.send_replace(PollerPhase::Polling);
        let result = self.poll_cycle(state).await;
        self.phase.send_replace(PollerPhase::Idle);
        result
    }

    async fn poll_cycle(&self, state: &StateManager) -> Result<Option<PollEvent<R::Entity>>> {
        let persisted = state.watermark(&self.trigger_id).await;
        let watermark = match persisted {
            Some(at) => at,
            None => Utc::now() - self.lookback()?,
        };

        let filters = self
            .config
            .filters
            .clone()
            .created_after(watermark)
            .limit(self.config.max_results);
        let page = self.client.resource::<R>().list(&filters).await?;

        let mut entities = page.entities;
        // created_at_min is inclusive
        if let Some(previous) = persisted {
            entities.retain(|e| e.created_at().map_or(true, |at| at > previous));
        }

        if entities.is_empty() {
            debug!(trigger = %self.trigger_id, %watermark, "No new {}", R::PLURAL);
            return Ok(None);
        }

        let next = newest(&entities).map_or(watermark, |at| at.max(watermark));
        let stored = state.advance_watermark(&self.trigger_id, next).await?;

        info!(
            trigger = %self.trigger_id,
            count = entities.len(),
            watermark = %stored,
            "Detected new {}",
            R::PLURAL
        );
        Ok(Some(PollEvent {
            count: entities.len(),
            entities,
            watermark: stored,
        }))
    }

    /// Poll every interval until `shutdown` resolves or the receiver is
    /// dropped. Failed cycles are logged and retried on the next tick.
    pub async fn run<F>(
        &self,
        state: &StateManager,
        events: mpsc::Sender<PollEvent<R::Entity>>,
        shutdown: F,
    ) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        if self.config.interval.is_zero() {
            return Err(Error::config("Poll interval must be greater than zero"));
        }

        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!(
            trigger = %self.trigger_id,
            interval_secs = self.config.interval.as_secs(),
            "Watching for new {}",
            R::PLURAL
        );

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!(trigger = %self.trigger_id, "Poller stopped");
                    break;
                }
                _ = ticker.tick() => {
                    match self.poll_once(state).await {
                        Ok(Some(event)) => {
                            if events.send(event).await.is_err() {
                                debug!(trigger = %self.trigger_id, "Event receiver dropped");
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(e) => {
                            error!(trigger = %self.trigger_id, error = %e, "Poll cycle failed");
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn lookback(&self) -> Result<TimeDelta> {
        TimeDelta::from_std(self.config.lookback)
            .map_err(|e| Error::config(format!("Invalid lookback: {e}")))
    }
}

/// Latest `created_at` of a batch; entities without one are ignored
fn newest<E: Entity>(entities: &[E]) -> Option<DateTime<Utc>> {
    entities.iter().filter_map(Entity::created_at).max()
}
