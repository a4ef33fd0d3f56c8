//! Remote document store access.

pub mod protocol;
pub mod provider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::constants::{REMOTE_EVENTS_COLLECTION, REMOTE_ORDER_BY};
use crate::error::LinkupResult;
use crate::event::Event;
use crate::remote::protocol::{CreateEvent, ListEvents, RemoteEventRecord};
use crate::remote::provider::Provider;

/// An authoritative store of events.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Human-readable name for messages.
    fn name(&self) -> &str;

    /// Up to `limit` events, ordered by date/time ascending, already normalized.
    async fn list_events(&self, limit: usize) -> LinkupResult<Vec<Event>>;

    /// Insert a record and return the id the store assigned to it.
    async fn create_event(&self, record: &RemoteEventRecord) -> LinkupResult<String>;
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct RemoteConfig(pub serde_json::Map<String, serde_json::Value>);

/// Remote store configuration: which provider to run and the parameters passed to it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Remote {
    pub provider: Provider,
    #[serde(flatten)]
    pub config: RemoteConfig,
}

impl Remote {
    pub fn new(provider: Provider, config: RemoteConfig) -> Self {
        Remote { provider, config }
    }

    fn remote_config(&self) -> serde_json::Map<String, serde_json::Value> {
        self.config.0.clone()
    }
}

#[async_trait]
impl RemoteSource for Remote {
    fn name(&self) -> &str {
        self.provider.name()
    }

    async fn list_events(&self, limit: usize) -> LinkupResult<Vec<Event>> {
        let documents = self
            .provider
            .call(ListEvents {
                remote_config: self.remote_config(),
                collection: REMOTE_EVENTS_COLLECTION.to_string(),
                order_by: REMOTE_ORDER_BY.to_string(),
                limit,
            })
            .await?;

        Ok(documents.into_iter().map(Event::from_document).collect())
    }

    async fn create_event(&self, record: &RemoteEventRecord) -> LinkupResult<String> {
        self.provider
            .call(CreateEvent {
                remote_config: self.remote_config(),
                collection: REMOTE_EVENTS_COLLECTION.to_string(),
                record: record.clone(),
            })
            .await
    }
}
