//! Everything a command needs, constructed once per invocation.

use anyhow::Result;
use linkup_core::backend::DataBackend;
use linkup_core::config::LinkupConfig;
use linkup_core::feed::{Feed, FeedQuery, FeedSynchronizer};
use linkup_core::overlay::CounterOverlay;
use linkup_core::store::LocalStore;
use linkup_core::Event;
use tracing::debug;

use crate::utils::tui::create_spinner;

pub struct Context {
    pub config: LinkupConfig,
    pub store: LocalStore,
    pub backend: DataBackend,
}

impl Context {
    pub fn load() -> Result<Self> {
        let config = LinkupConfig::load()?;
        let store = LocalStore::open(&config.data_path())?;
        let backend = DataBackend::probe(config.remote.as_ref());
        debug!(data_dir = %config.data_path().display(), "using {backend}");

        Ok(Context {
            config,
            store,
            backend,
        })
    }

    #[cfg(test)]
    pub fn for_tests(store: LocalStore) -> Self {
        Context {
            config: LinkupConfig::default(),
            store,
            backend: DataBackend::LocalOnly,
        }
    }

    /// A zero-priced local event starting now.
    #[cfg(test)]
    pub fn sample_event(id: &str, title: &str) -> Event {
        Event {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            location_text: String::new(),
            price: 0.0,
            ticket_url: String::new(),
            cover_url: String::new(),
            date_time: chrono::Utc::now(),
            lat: None,
            lng: None,
            likes: 0,
            rsvps: 0,
        }
    }

    pub fn synchronizer(&self) -> FeedSynchronizer<'_> {
        FeedSynchronizer::new(&self.backend, &self.store)
    }

    pub fn overlay(&self) -> CounterOverlay<'_> {
        CounterOverlay::new(&self.store)
    }

    /// Resolve the feed, with a spinner while the remote is queried.
    pub async fn feed(&self, query: &FeedQuery) -> Feed {
        if !self.backend.is_remote() {
            return self.synchronizer().resolve_feed(query).await;
        }

        let spinner = create_spinner(format!("Loading events from {}", self.backend));
        let feed = self.synchronizer().resolve_feed(query).await;
        spinner.finish_and_clear();
        feed
    }

    /// Find an event by id, remote or local.
    pub async fn find_event(&self, id: &str) -> Result<Event> {
        let event = if self.backend.is_remote() {
            let spinner = create_spinner("Looking up event".to_string());
            let event = self.synchronizer().find_event(id).await;
            spinner.finish_and_clear();
            event
        } else {
            self.synchronizer().find_event(id).await
        };

        event.ok_or_else(|| linkup_core::error::LinkupError::EventNotFound(id.to_string()).into())
    }
}
