//! Feed synchronization: remote first, local store as fallback.

use chrono::{DateTime, Local, TimeZone};
use tracing::{debug, warn};

use super::{Feed, FeedQuery, Provenance, filter};
use crate::backend::DataBackend;
use crate::constants::REMOTE_QUERY_LIMIT;
use crate::error::LinkupResult;
use crate::event::Event;
use crate::overlay::CounterOverlay;
use crate::remote::protocol::RemoteEventRecord;
use crate::store::{Events, LocalStore};

/// Where a newly created event ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Remote { id: String },
    Local { id: String },
}

impl Placement {
    pub fn id(&self) -> &str {
        match self {
            Placement::Remote { id } | Placement::Local { id } => id,
        }
    }
}

pub struct FeedSynchronizer<'a> {
    backend: &'a DataBackend,
    store: &'a LocalStore,
}

impl<'a> FeedSynchronizer<'a> {
    pub fn new(backend: &'a DataBackend, store: &'a LocalStore) -> Self {
        FeedSynchronizer { backend, store }
    }

    /// Read every available event, unfiltered.
    ///
    /// A failing remote is never an error here: it is logged and the local
    /// collection is used instead.
    pub async fn pull(&self) -> (Provenance, Vec<Event>) {
        if let Some(remote) = self.backend.remote() {
            match remote.list_events(REMOTE_QUERY_LIMIT).await {
                Ok(events) => {
                    debug!(count = events.len(), "read events from {}", remote.name());
                    return (Provenance::Remote, events);
                }
                Err(e) => warn!("reading events from {} failed, using local store: {e}", remote.name()),
            }
        }
        (Provenance::Local, self.local_events())
    }

    /// Events stored on this device.
    pub fn local_events(&self) -> Vec<Event> {
        self.store.get::<Events>()
    }

    /// Resolve the feed for `query` relative to the local clock.
    pub async fn resolve_feed(&self, query: &FeedQuery) -> Feed {
        self.resolve_feed_at(query, &Local::now()).await
    }

    pub async fn resolve_feed_at<Tz: TimeZone>(&self, query: &FeedQuery, now: &DateTime<Tz>) -> Feed {
        let (provenance, events) = self.pull().await;
        let overlay = CounterOverlay::new(self.store).snapshot();
        let events = filter::apply(&events, query, &overlay, now);
        Feed {
            provenance,
            events,
            overlay,
        }
    }

    /// Look an event up by id among everything currently available.
    pub async fn find_event(&self, id: &str) -> Option<Event> {
        let (_, events) = self.pull().await;
        events.into_iter().find(|e| e.id == id)
    }

    /// Store a new event remotely, or locally when there is no usable remote.
    pub async fn create_event(&self, event: Event) -> LinkupResult<Placement> {
        if let Some(remote) = self.backend.remote() {
            match remote.create_event(&RemoteEventRecord::from(&event)).await {
                Ok(id) => return Ok(Placement::Remote { id }),
                Err(e) => warn!("writing event to {} failed, storing locally: {e}", remote.name()),
            }
        }

        let id = event.id.clone();
        let mut events = self.local_events();
        events.push(event);
        self.store.set::<Events>(&events)?;
        Ok(Placement::Local { id })
    }

    /// Remove an event from the local collection. Remote events are never deleted.
    pub fn delete_local_event(&self, id: &str) -> LinkupResult<bool> {
        let mut events = self.local_events();
        let before = events.len();
        events.retain(|e| e.id != id);
        if events.len() == before {
            return Ok(false);
        }
        self.store.set::<Events>(&events)?;
        Ok(true)
    }
}
