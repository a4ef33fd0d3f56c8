//! Pure filtering and ordering of a feed.
//!
//! These functions never touch storage and never modify their input, so
//! applying the same query to the same events always yields the same list.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

use super::{DateWindow, FeedQuery, SortOrder};
use crate::event::Event;
use crate::overlay::OverlaySnapshot;

/// Filter by text and date window, then sort.
pub fn apply<Tz: TimeZone>(
    events: &[Event],
    query: &FeedQuery,
    overlay: &OverlaySnapshot,
    now: &DateTime<Tz>,
) -> Vec<Event> {
    let needle = query
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);

    let mut list: Vec<Event> = events
        .iter()
        .filter(|e| needle.as_deref().is_none_or(|n| matches_text(e, n)))
        .filter(|e| query.window.is_none_or(|w| w.contains(e.date_time, now)))
        .cloned()
        .collect();

    sort(&mut list, query.sort, overlay);
    list
}

/// Case-insensitive substring match on title or location. `needle` is already lowercase.
fn matches_text(event: &Event, needle: &str) -> bool {
    event.title.to_lowercase().contains(needle)
        || event.location_text.to_lowercase().contains(needle)
}

impl DateWindow {
    pub fn contains<Tz: TimeZone>(&self, instant: DateTime<Utc>, now: &DateTime<Tz>) -> bool {
        let local = instant.with_timezone(&now.timezone()).naive_local();
        let today = now.naive_local().date();

        match self {
            DateWindow::Today => local.date() == today,
            DateWindow::Week => {
                let start = today.and_time(NaiveTime::default());
                let end = start + Duration::days(7);
                local >= start && local < end
            }
        }
    }
}

/// Sort in place. Ties fall back to date ascending, then id, so the order is total.
pub fn sort(list: &mut [Event], order: SortOrder, overlay: &OverlaySnapshot) {
    match order {
        SortOrder::Hot => list.sort_by(|a, b| {
            overlay
                .hot_score(b)
                .cmp(&overlay.hot_score(a))
                .then_with(|| a.date_time.cmp(&b.date_time))
                .then_with(|| a.id.cmp(&b.id))
        }),
        SortOrder::New => list.sort_by(|a, b| {
            b.date_time
                .cmp(&a.date_time)
                .then_with(|| a.id.cmp(&b.id))
        }),
        SortOrder::Soonest => list.sort_by(|a, b| {
            a.date_time
                .cmp(&b.date_time)
                .then_with(|| a.id.cmp(&b.id))
        }),
    }
}
