//! Optimistic per-device like/RSVP counters.
//!
//! The overlay sits on top of an event's authoritative counts: what the user
//! sees is `base + overlay`. Overlay entries only ever go up, are never sent
//! to the remote source, and disappear only when all local data is cleared.

use crate::error::LinkupResult;
use crate::event::Event;
use crate::store::{Collection, CounterMap, Likes, LocalStore, Rsvps};

/// Increments the counter overlays in the local store.
pub struct CounterOverlay<'a> {
    store: &'a LocalStore,
}

impl<'a> CounterOverlay<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        CounterOverlay { store }
    }

    /// Record a like and return the displayed total (`base` + new overlay value).
    pub fn increment_like(&self, event_id: &str, base: u64) -> LinkupResult<u64> {
        Ok(base + self.increment::<Likes>(event_id)?)
    }

    /// Record an RSVP and return the displayed total (`base` + new overlay value).
    pub fn increment_rsvp(&self, event_id: &str, base: u64) -> LinkupResult<u64> {
        Ok(base + self.increment::<Rsvps>(event_id)?)
    }

    fn increment<C: Collection<Value = CounterMap>>(&self, event_id: &str) -> LinkupResult<u64> {
        let mut counters = self.store.get::<C>();
        let entry = counters.entry(event_id.to_string()).or_insert(0);
        *entry += 1;
        let value = *entry;
        self.store.set::<C>(&counters)?;
        Ok(value)
    }

    /// Current state of both overlays.
    pub fn snapshot(&self) -> OverlaySnapshot {
        OverlaySnapshot {
            likes: self.store.get::<Likes>(),
            rsvps: self.store.get::<Rsvps>(),
        }
    }
}

/// Both overlay mappings as read at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlaySnapshot {
    pub likes: CounterMap,
    pub rsvps: CounterMap,
}

impl OverlaySnapshot {
    pub fn like_count(&self, event_id: &str) -> u64 {
        self.likes.get(event_id).copied().unwrap_or(0)
    }

    pub fn rsvp_count(&self, event_id: &str) -> u64 {
        self.rsvps.get(event_id).copied().unwrap_or(0)
    }

    pub fn displayed_likes(&self, event: &Event) -> u64 {
        event.likes + self.like_count(&event.id)
    }

    pub fn displayed_rsvps(&self, event: &Event) -> u64 {
        event.rsvps + self.rsvp_count(&event.id)
    }

    /// Sort key for the "hot" feed order.
    ///
    /// Authoritative RSVPs are not part of the score; only the local RSVP overlay is.
    pub fn hot_score(&self, event: &Event) -> u64 {
        self.displayed_likes(event) + self.rsvp_count(&event.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(id: &str, likes: u64, rsvps: u64) -> Event {
        Event {
            id: id.to_string(),
            title: String::new(),
            description: String::new(),
            location_text: String::new(),
            price: 0.0,
            ticket_url: String::new(),
            cover_url: String::new(),
            date_time: Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap(),
            lat: None,
            lng: None,
            likes,
            rsvps,
        }
    }

    #[test]
    fn repeated_likes_strictly_increase() {
        let store = LocalStore::in_memory();
        let overlay = CounterOverlay::new(&store);

        let seen: Vec<u64> = (0..5)
            .map(|_| overlay.increment_like("e1", 0).unwrap())
            .collect();

        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
        assert_eq!(overlay.snapshot().like_count("e1"), 5);
    }

    #[test]
    fn displayed_total_includes_base() {
        let store = LocalStore::in_memory();
        let overlay = CounterOverlay::new(&store);

        assert_eq!(overlay.increment_rsvp("e1", 10).unwrap(), 11);
        assert_eq!(overlay.increment_rsvp("e1", 10).unwrap(), 12);
        assert_eq!(overlay.snapshot().rsvp_count("e1"), 2);
    }

    #[test]
    fn counters_are_per_event_and_per_kind() {
        let store = LocalStore::in_memory();
        let overlay = CounterOverlay::new(&store);
        overlay.increment_like("a", 0).unwrap();
        overlay.increment_rsvp("b", 0).unwrap();

        let snapshot = overlay.snapshot();
        assert_eq!(snapshot.like_count("a"), 1);
        assert_eq!(snapshot.rsvp_count("a"), 0);
        assert_eq!(snapshot.like_count("b"), 0);
        assert_eq!(snapshot.rsvp_count("b"), 1);
    }

    #[test]
    fn hot_score_skips_authoritative_rsvps() {
        let mut snapshot = OverlaySnapshot::default();
        snapshot.likes.insert("e".into(), 2);
        snapshot.rsvps.insert("e".into(), 3);

        let ev = event("e", 5, 100);
        assert_eq!(snapshot.hot_score(&ev), 5 + 2 + 3);
        assert_eq!(snapshot.displayed_rsvps(&ev), 103);
    }
}
