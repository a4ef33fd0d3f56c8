//! Device-local persistence.
//!
//! Four independent collections live here: events created while the remote
//! was unavailable, the friends list, and the like/RSVP counter overlays.
//! Each is stored whole as one JSON document. There are no partial updates:
//! callers read, modify and write back, which is only safe with a single
//! process working on the data directory at a time.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{LinkupError, LinkupResult};
use crate::event::{Event, decode_events};
use crate::friends::Friend;

/// Per-event counters, keyed by event id.
pub type CounterMap = BTreeMap<String, u64>;

/// A persisted collection: its storage key and the type stored under it.
pub trait Collection {
    const KEY: &'static str;
    type Value: Serialize + DeserializeOwned + Default;

    fn decode(contents: &str) -> serde_json::Result<Self::Value> {
        serde_json::from_str(contents)
    }
}

pub struct Events;
pub struct Friends;
pub struct Likes;
pub struct Rsvps;

impl Collection for Events {
    const KEY: &'static str = "events";
    type Value = Vec<Event>;

    // Bad records are dropped one by one instead of emptying the collection.
    fn decode(contents: &str) -> serde_json::Result<Self::Value> {
        decode_events(contents)
    }
}

impl Collection for Friends {
    const KEY: &'static str = "friends";
    type Value = Vec<Friend>;
}

impl Collection for Likes {
    const KEY: &'static str = "likes";
    type Value = CounterMap;
}

impl Collection for Rsvps {
    const KEY: &'static str = "rsvps";
    type Value = CounterMap;
}

/// Every collection key, in the order they are cleared.
pub const COLLECTION_KEYS: [&str; 4] = [Events::KEY, Friends::KEY, Likes::KEY, Rsvps::KEY];

/// Raw key/value storage underneath a `LocalStore`.
pub trait StoreBackend: Send + Sync {
    fn read(&self, key: &str) -> LinkupResult<Option<String>>;
    fn write(&self, key: &str, contents: &str) -> LinkupResult<()>;
    fn remove(&self, key: &str) -> LinkupResult<()>;
}

/// Stores each collection as `<key>.json` inside a directory.
pub struct DirBackend {
    root: PathBuf,
}

impl DirBackend {
    pub fn new(root: impl Into<PathBuf>) -> LinkupResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(DirBackend { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl StoreBackend for DirBackend {
    fn read(&self, key: &str) -> LinkupResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn write(&self, key: &str, contents: &str) -> LinkupResult<()> {
        // Write to a sibling temp file and rename over the target.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.root)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.persist(self.path_for(key))
            .map_err(|e| LinkupError::Io(e.error))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> LinkupResult<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Keeps collections in memory; nothing survives the process.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl StoreBackend for MemoryBackend {
    fn read(&self, key: &str) -> LinkupResult<Option<String>> {
        Ok(self.entries.lock().map_err(poisoned)?.get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> LinkupResult<()> {
        self.entries
            .lock()
            .map_err(poisoned)?
            .insert(key.to_string(), contents.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> LinkupResult<()> {
        self.entries.lock().map_err(poisoned)?.remove(key);
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> LinkupError {
    LinkupError::Io(std::io::Error::other("memory store lock poisoned"))
}

/// Typed access to the local collections.
pub struct LocalStore {
    backend: Box<dyn StoreBackend>,
}

impl LocalStore {
    pub fn new(backend: impl StoreBackend + 'static) -> Self {
        LocalStore {
            backend: Box::new(backend),
        }
    }

    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: &Path) -> LinkupResult<Self> {
        Ok(Self::new(DirBackend::new(dir)?))
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::default())
    }

    /// Read a collection. Missing or unreadable data reads as empty.
    pub fn get<C: Collection>(&self) -> C::Value {
        let contents = match self.backend.read(C::KEY) {
            Ok(Some(contents)) => contents,
            Ok(None) => return C::Value::default(),
            Err(e) => {
                warn!(collection = C::KEY, "could not read local collection: {e}");
                return C::Value::default();
            }
        };

        C::decode(&contents).unwrap_or_else(|e| {
            warn!(collection = C::KEY, "ignoring unparsable local collection: {e}");
            C::Value::default()
        })
    }

    /// Replace a collection's entire contents.
    pub fn set<C: Collection>(&self, value: &C::Value) -> LinkupResult<()> {
        let contents = serde_json::to_string(value)?;
        self.backend.write(C::KEY, &contents)
    }

    /// Drop all four collections.
    pub fn clear(&self) -> LinkupResult<()> {
        for key in COLLECTION_KEYS {
            self.backend.remove(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn empty_store_reads_defaults() {
        let store = LocalStore::in_memory();
        assert!(store.get::<Events>().is_empty());
        assert!(store.get::<Friends>().is_empty());
        assert!(store.get::<Likes>().is_empty());
        assert!(store.get::<Rsvps>().is_empty());
    }

    #[test]
    fn set_overwrites_whole_collection() {
        let store = LocalStore::in_memory();
        let mut likes = CounterMap::new();
        likes.insert("a".into(), 2);
        store.set::<Likes>(&likes).unwrap();

        let mut replacement = CounterMap::new();
        replacement.insert("b".into(), 1);
        store.set::<Likes>(&replacement).unwrap();

        assert_eq!(store.get::<Likes>(), replacement);
    }

    #[test]
    fn unparsable_content_reads_as_empty() {
        let backend = MemoryBackend::default();
        backend.write("likes", "{not json").unwrap();
        backend.write("events", "{\"oops\": true}").unwrap();
        let store = LocalStore::new(backend);

        assert!(store.get::<Likes>().is_empty());
        assert!(store.get::<Events>().is_empty());
    }

    #[test]
    fn one_bad_event_record_keeps_the_rest() {
        let backend = MemoryBackend::default();
        backend
            .write(
                "events",
                r#"[{"id":"local_1","title":"Picnic","dateTime":"2025-06-01T10:00:00Z"},null,
                    {"id":"local_2","dateTime":"2025-06-02T10:00:00Z","dateTimeISO":"2025-06-02T10:00:00Z"}]"#,
            )
            .unwrap();
        let store = LocalStore::new(backend);

        let ids: Vec<String> = store.get::<Events>().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["local_1", "local_2"]);
    }

    #[test]
    fn dir_backend_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        let friends = vec![Friend {
            handle: "@ahmed".into(),
            added_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        }];
        store.set::<Friends>(&friends).unwrap();
        assert!(dir.path().join("friends.json").exists());

        let reopened = LocalStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get::<Friends>(), friends);

        reopened.clear().unwrap();
        assert!(!dir.path().join("friends.json").exists());
        assert!(reopened.get::<Friends>().is_empty());
    }

    #[test]
    fn clear_on_empty_directory_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        store.clear().unwrap();
    }
}
