//! The document file: collections of documents keyed by id.
//!
//! ```json
//! { "events": { "<id>": { "title": "...", "dateTime": "...", "createdAt": "..." } } }
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use linkup_core::event::parse_instant;
use linkup_core::remote::protocol::RemoteDocument;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

type Collections = BTreeMap<String, BTreeMap<String, Map<String, Value>>>;

pub struct DocStore {
    path: PathBuf,
}

impl DocStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DocStore { path: path.into() }
    }

    fn load(&self) -> Result<Collections> {
        if !self.path.exists() {
            return Ok(Collections::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Collections::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    fn save(&self, collections: &Collections) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut file = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut file, collections)?;
        file.flush()?;
        file.persist(&self.path)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Documents of `collection`, ascending by `order_by`, at most `limit` of them.
    ///
    /// Dates in any supported format sort by instant, ahead of other numbers,
    /// then other strings. Documents missing the field sort last. Ties keep
    /// id order.
    pub fn query(&self, collection: &str, order_by: &str, limit: usize) -> Result<Vec<RemoteDocument>> {
        let mut keyed: Vec<(SortKey, RemoteDocument)> = self
            .load()?
            .remove(collection)
            .unwrap_or_default()
            .into_iter()
            .map(|(id, fields)| (SortKey::of(fields.get(order_by)), RemoteDocument { id, fields }))
            .collect();

        keyed.sort_by(|(ka, a), (kb, b)| ka.cmp(kb).then_with(|| a.id.cmp(&b.id)));
        Ok(keyed.into_iter().take(limit).map(|(_, doc)| doc).collect())
    }

    /// Add a document with a fresh id and a `createdAt` stamp; returns the id.
    pub fn insert(&self, collection: &str, mut fields: Map<String, Value>, now: DateTime<Utc>) -> Result<String> {
        let mut collections = self.load()?;
        let id = uuid::Uuid::new_v4().to_string();

        fields.insert("createdAt".into(), Value::String(now.to_rfc3339()));
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields);

        self.save(&collections)?;
        Ok(id)
    }
}

/// Ordering key for one field value. Variants are ranked in declaration order.
#[derive(Debug)]
enum SortKey {
    Instant(DateTime<Utc>),
    Number(f64),
    Text(String),
    Other,
    Missing,
}

impl SortKey {
    fn of(value: Option<&Value>) -> Self {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return SortKey::Missing;
        };
        if let Some(at) = parse_instant(value) {
            return SortKey::Instant(at);
        }
        match value {
            Value::Number(n) => n.as_f64().map_or(SortKey::Other, SortKey::Number),
            Value::String(s) => SortKey::Text(s.clone()),
            _ => SortKey::Other,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Instant(_) => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
            SortKey::Other => 3,
            SortKey::Missing => 4,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank()).then_with(|| match (self, other) {
            (SortKey::Instant(a), SortKey::Instant(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        })
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}
