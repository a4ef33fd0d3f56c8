//! Canonical event record.
//!
//! Every event the feed works with has this shape, whether it was read from
//! the remote document store or from the device-local collection. Raw records
//! from either source go through `normalize` on their way in.

mod draft;
mod normalize;

pub use draft::EventDraft;
pub use normalize::{RawEvent, decode_events, parse_instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::LOCAL_ID_PREFIX;
use crate::remote::protocol::RemoteDocument;

/// An event in its canonical shape.
///
/// `likes` and `rsvps` are the authoritative base counts. Per-device increments
/// live in the counter overlay and are never folded back into these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawEvent")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location_text: String,
    pub price: f64,
    pub ticket_url: String,
    pub cover_url: String,
    pub date_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    pub likes: u64,
    pub rsvps: u64,
}

impl Event {
    /// Build a canonical event from a remote document, taking the id from the document.
    pub fn from_document(doc: RemoteDocument) -> Self {
        let raw: RawEvent =
            serde_json::from_value(serde_json::Value::Object(doc.fields)).unwrap_or_default();
        Event {
            id: doc.id,
            ..Event::from(raw)
        }
    }

    /// Id for an event created on this device at `created_at`.
    pub fn local_id(created_at: DateTime<Utc>) -> String {
        format!("{}{}", LOCAL_ID_PREFIX, created_at.timestamp_millis())
    }

    pub fn is_local(&self) -> bool {
        self.id.starts_with(LOCAL_ID_PREFIX)
    }

    /// Both coordinates, if the event has a usable position.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some((lat, lng)),
            _ => None,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.price > 0.0
    }
}
