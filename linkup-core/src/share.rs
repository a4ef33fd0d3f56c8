//! Shareable links for events.

use crate::constants::SHARE_FRAGMENT_PREFIX;
use crate::event::Event;

/// Link to an event: the page URL with its fragment replaced by `#event-<id>`.
pub fn share_url(base_url: &str, event_id: &str) -> String {
    let page = base_url.split('#').next().unwrap_or(base_url);
    format!("{page}#{SHARE_FRAGMENT_PREFIX}{event_id}")
}

/// "Open in Maps" link for events with coordinates. The title is
/// percent-encoded, spaces as `%20`.
pub fn native_maps_url(event: &Event) -> Option<String> {
    let (lat, lng) = event.coordinates()?;
    let title = urlencoding::encode(&event.title);
    Some(format!("https://maps.apple.com/?ll={lat},{lng}&q={title}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn share_url_replaces_fragment() {
        assert_eq!(
            share_url("https://linkup.app/feed#top", "abc"),
            "https://linkup.app/feed#event-abc"
        );
        assert_eq!(
            share_url("https://linkup.app/", "local_1"),
            "https://linkup.app/#event-local_1"
        );
    }

    #[test]
    fn maps_link_needs_coordinates() {
        let event: Event = serde_json::from_value(json!({
            "id": "e",
            "title": "Beach & BBQ",
            "lat": 34.01,
            "lng": -118.49,
            "dateTime": "2025-06-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(
            native_maps_url(&event).unwrap(),
            "https://maps.apple.com/?ll=34.01,-118.49&q=Beach%20%26%20BBQ"
        );

        let cleanup = Event {
            title: "Beach Cleanup".into(),
            ..event
        };
        assert!(native_maps_url(&cleanup).unwrap().ends_with("&q=Beach%20Cleanup"));

        let no_coords: Event =
            serde_json::from_value(json!({ "id": "e", "dateTime": "2025-06-01T10:00:00Z" })).unwrap();
        assert_eq!(native_maps_url(&no_coords), None);
    }
}
