//! End-to-end flows across the store, feed, overlay and profile.

use chrono::{TimeZone, Utc};

use crate::backend::DataBackend;
use crate::event::EventDraft;
use crate::feed::{FeedQuery, FeedSynchronizer, Placement, Provenance, SortOrder};
use crate::friends::FriendBook;
use crate::overlay::CounterOverlay;
use crate::profile;
use crate::store::{Events, LocalStore, Rsvps};

fn draft(title: &str, date: &str, price: Option<f64>) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        date: date.to_string(),
        time: "09:00".to_string(),
        location_text: "Santa Monica Pier".to_string(),
        price,
        ..Default::default()
    }
}

#[tokio::test]
async fn created_event_is_searchable_after_reopening_store() {
    let dir = tempfile::tempdir().unwrap();
    let backend = DataBackend::LocalOnly;
    let created_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

    {
        let store = LocalStore::open(dir.path()).unwrap();
        let event = EventDraft {
            time: "10:00".into(),
            ..draft("Beach Cleanup", "2025-06-01", None)
        }
        .into_event(&Utc, created_at)
        .unwrap();
        let placement = FeedSynchronizer::new(&backend, &store)
            .create_event(event)
            .await
            .unwrap();
        assert_eq!(placement, Placement::Local { id: "local_1748779200000".into() });
    }

    let store = LocalStore::open(dir.path()).unwrap();
    let feed = FeedSynchronizer::new(&backend, &store)
        .resolve_feed_at(&FeedQuery::text("beach"), &created_at)
        .await;

    assert_eq!(feed.provenance, Provenance::Local);
    assert_eq!(feed.events.len(), 1);
    assert_eq!(feed.events[0].title, "Beach Cleanup");
    assert_eq!(feed.events[0].price, 0.0);
}

#[tokio::test]
async fn rsvps_drive_profile_earnings() {
    let store = LocalStore::in_memory();
    let backend = DataBackend::LocalOnly;
    let sync = FeedSynchronizer::new(&backend, &store);
    let created_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

    let event = draft("Yoga", "2025-06-12", Some(10.0))
        .into_event(&Utc, created_at)
        .unwrap();
    let id = sync.create_event(event).await.unwrap().id().to_string();

    let overlay = CounterOverlay::new(&store);
    assert_eq!(overlay.increment_rsvp(&id, 0).unwrap(), 1);
    assert_eq!(overlay.increment_rsvp(&id, 0).unwrap(), 2);
    assert_eq!(overlay.increment_rsvp(&id, 0).unwrap(), 3);

    let summary = profile::summarize(&sync.local_events(), &store.get::<Rsvps>());
    assert_eq!(summary.event_count, 1);
    assert_eq!(summary.total_rsvps, 3);
    assert_eq!(summary.earnings_display(), "$30.00");
}

#[tokio::test]
async fn invalid_draft_writes_nothing() {
    let store = LocalStore::in_memory();
    let created_at = Utc::now();

    let err = draft("", "2025-06-12", None).into_event(&Utc, created_at).unwrap_err();
    assert!(err.is_validation());
    let err = draft("Yoga", "2025-06-12", Some(-5.0))
        .into_event(&Utc, created_at)
        .unwrap_err();
    assert!(err.is_validation());

    assert!(store.get::<Events>().is_empty());
}

#[tokio::test]
async fn hot_sort_follows_local_likes() {
    let store = LocalStore::in_memory();
    let backend = DataBackend::LocalOnly;
    let sync = FeedSynchronizer::new(&backend, &store);

    let early = draft("Early", "2025-06-10", None)
        .into_event(&Utc, Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
        .unwrap();
    let late = draft("Late", "2025-06-20", None)
        .into_event(&Utc, Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 1).unwrap())
        .unwrap();
    let late_id = late.id.clone();
    sync.create_event(early).await.unwrap();
    sync.create_event(late).await.unwrap();

    CounterOverlay::new(&store).increment_like(&late_id, 0).unwrap();

    let query = FeedQuery {
        sort: SortOrder::Hot,
        ..Default::default()
    };
    let feed = sync.resolve_feed_at(&query, &Utc::now()).await;
    let titles: Vec<&str> = feed.events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Late", "Early"]);
    assert_eq!(feed.overlay.displayed_likes(&feed.events[0]), 1);
}

#[tokio::test]
async fn clearing_store_resets_everything() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::open(dir.path()).unwrap();
    let backend = DataBackend::LocalOnly;
    let sync = FeedSynchronizer::new(&backend, &store);
    let now = Utc::now();

    let event = draft("Picnic", "2025-06-12", Some(10.0)).into_event(&Utc, now).unwrap();
    let id = sync.create_event(event).await.unwrap().id().to_string();
    CounterOverlay::new(&store).increment_rsvp(&id, 0).unwrap();
    CounterOverlay::new(&store).increment_like(&id, 0).unwrap();
    let book = FriendBook::new(&store);
    book.add("@ahmed", now).unwrap();
    assert!(book.add("@AHMED", now).is_err());

    store.clear().unwrap();

    let feed = sync.resolve_feed_at(&FeedQuery::default(), &now).await;
    assert!(feed.is_empty());
    let summary = profile::summarize(&sync.local_events(), &store.get::<Rsvps>());
    assert_eq!(summary.event_count, 0);
    assert_eq!(summary.total_rsvps, 0);
    assert_eq!(summary.earnings_display(), "$0.00");
    assert!(book.list().is_empty());
}
