//! Defines the JSON protocol used between linkup and remote provider
//! binaries over stdin/stdout.
//!
//! A request is one JSON line `{"command": ..., "params": {...}}`; the provider
//! answers with one JSON line tagged by `status`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::event::Event;

pub trait ProviderCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ListEvents,
    CreateEvent,
}

/// Request sent from linkup to provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from provider to linkup.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data })
            .unwrap_or_else(|e| Response::<()>::error(&format!("Failed to serialize response: {e}")))
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        serde_json::json!({ "status": "error", "error": msg }).to_string()
    }
}

/// A stored document: its id plus whatever fields the store holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteDocument {
    pub id: String,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Fields written when an event is inserted remotely.
///
/// `createdAt` is stamped by the store itself, so it is not part of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEventRecord {
    pub title: String,
    pub description: String,
    pub location_text: String,
    pub price: f64,
    pub ticket_url: String,
    pub cover_url: String,
    pub date_time: DateTime<Utc>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub likes: u64,
    pub rsvps: u64,
}

impl From<&Event> for RemoteEventRecord {
    fn from(event: &Event) -> Self {
        let (lat, lng) = match event.coordinates() {
            Some((lat, lng)) => (Some(lat), Some(lng)),
            None => (None, None),
        };
        RemoteEventRecord {
            title: event.title.clone(),
            description: event.description.clone(),
            location_text: event.location_text.clone(),
            price: event.price,
            ticket_url: event.ticket_url.clone(),
            cover_url: event.cover_url.clone(),
            date_time: event.date_time,
            lat,
            lng,
            likes: 0,
            rsvps: 0,
        }
    }
}

/// Query a collection ordered by one field, ascending, up to `limit` documents.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListEvents {
    /// Provider-specific config (e.g., docstore_path)
    #[serde(flatten)]
    pub remote_config: serde_json::Map<String, serde_json::Value>,
    pub collection: String,
    pub order_by: String,
    pub limit: usize,
}

impl ProviderCommand for ListEvents {
    type Response = Vec<RemoteDocument>;
    fn command() -> Command {
        Command::ListEvents
    }
}

/// Insert an event record. The provider answers with the new document id.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEvent {
    #[serde(flatten)]
    pub remote_config: serde_json::Map<String, serde_json::Value>,
    pub collection: String,
    pub record: RemoteEventRecord,
}

impl ProviderCommand for CreateEvent {
    type Response = String;
    fn command() -> Command {
        Command::CreateEvent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_shape() {
        let mut remote_config = serde_json::Map::new();
        remote_config.insert("docstore_path".into(), "/tmp/db.json".into());
        let params = serde_json::to_value(ListEvents {
            remote_config,
            collection: "events".into(),
            order_by: "dateTime".into(),
            limit: 300,
        })
        .unwrap();

        assert_eq!(
            params,
            json!({
                "docstore_path": "/tmp/db.json",
                "collection": "events",
                "order_by": "dateTime",
                "limit": 300
            })
        );
    }

    #[test]
    fn response_envelopes() {
        let ok: Response<String> =
            serde_json::from_str(&Response::success("doc-1".to_string())).unwrap();
        assert!(matches!(ok, Response::Success { data } if data == "doc-1"));

        let err: Response<String> = serde_json::from_str(&Response::<()>::error("boom")).unwrap();
        assert!(matches!(err, Response::Error { error } if error == "boom"));
    }

    #[test]
    fn record_is_camel_case_with_zero_counters() {
        let event: Event = serde_json::from_value(json!({
            "id": "local_1",
            "title": "Beach Cleanup",
            "locationText": "Santa Monica",
            "likes": 7,
            "dateTime": "2025-06-01T17:00:00Z"
        }))
        .unwrap();

        let record = serde_json::to_value(RemoteEventRecord::from(&event)).unwrap();
        assert_eq!(record["locationText"], "Santa Monica");
        assert_eq!(record["likes"], 0);
        assert_eq!(record["lat"], serde_json::Value::Null);
        assert!(record.get("id").is_none());
    }
}
