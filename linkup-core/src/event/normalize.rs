//! Normalization of raw event records into the canonical shape.
//!
//! Records come from two places with different habits: the remote store hands
//! back timestamps as `{seconds, nanoseconds}` objects and may omit fields,
//! while local records are RFC 3339 strings written by older versions under
//! `dateTimeISO`. Every field is read loosely, and collections are decoded one
//! record at a time by `decode_events`, so one malformed record never takes the
//! rest of a collection down with it.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::Event;

/// An event record as found in storage, before normalization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    id: Option<Value>,
    title: Option<Value>,
    description: Option<Value>,
    location_text: Option<Value>,
    price: Option<Value>,
    ticket_url: Option<Value>,
    cover_url: Option<Value>,
    date_time: Option<Value>,
    #[serde(rename = "dateTimeISO")]
    date_time_iso: Option<Value>,
    lat: Option<Value>,
    lng: Option<Value>,
    likes: Option<Value>,
    rsvps: Option<Value>,
}

impl From<RawEvent> for Event {
    fn from(raw: RawEvent) -> Self {
        Event {
            id: text(raw.id),
            title: text(raw.title),
            description: text(raw.description),
            location_text: text(raw.location_text),
            price: number(raw.price)
                .filter(|p| *p >= 0.0)
                .unwrap_or(0.0),
            ticket_url: text(raw.ticket_url),
            cover_url: text(raw.cover_url),
            date_time: [raw.date_time.as_ref(), raw.date_time_iso.as_ref()]
                .into_iter()
                .flatten()
                .find_map(parse_instant)
                .unwrap_or_else(Utc::now),
            lat: number(raw.lat),
            lng: number(raw.lng),
            likes: count(raw.likes),
            rsvps: count(raw.rsvps),
        }
    }
}

fn text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn number(value: Option<Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn count(value: Option<Value>) -> u64 {
    number(value)
        .filter(|n| *n >= 0.0)
        .map(|n| n as u64)
        .unwrap_or(0)
}

/// Decode a stored event collection, skipping records that are not objects.
pub fn decode_events(contents: &str) -> serde_json::Result<Vec<Event>> {
    let records: Vec<Value> = serde_json::from_str(contents)?;
    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match serde_json::from_value::<Event>(record) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(index = i, "skipping malformed event record: {e}");
                None
            }
        })
        .collect())
}

/// Read an instant from any of the representations the sources use:
/// RFC 3339 strings, epoch milliseconds, or `{seconds, nanoseconds}` objects.
pub fn parse_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => Utc.timestamp_millis_opt(n.as_i64()?).single(),
        Value::Object(map) => {
            let seconds = ["seconds", "_seconds"]
                .iter()
                .find_map(|k| map.get(*k))
                .and_then(Value::as_i64)?;
            let nanos = ["nanoseconds", "nanos", "_nanoseconds"]
                .iter()
                .find_map(|k| map.get(*k))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            Utc.timestamp_opt(seconds, nanos as u32).single()
        }
        _ => None,
    }
}
