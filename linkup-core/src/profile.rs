//! Profile statistics for events authored on this device.

use crate::event::Event;
use crate::store::CounterMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSummary {
    pub event_count: usize,
    pub total_rsvps: u64,
    pub estimated_earnings: f64,
}

impl ProfileSummary {
    /// Earnings as shown on the profile, e.g. `$30.00`.
    pub fn earnings_display(&self) -> String {
        format!("${:.2}", self.estimated_earnings)
    }
}

/// Summarize the local event collection against the RSVP overlay.
///
/// Only local events count as "my events". `total_rsvps` covers the whole
/// overlay, including RSVPs to events that are not local. Earnings multiply
/// each local event's price by its local RSVP count and ignore remote counts.
pub fn summarize(local_events: &[Event], rsvps: &CounterMap) -> ProfileSummary {
    let total_rsvps: u64 = rsvps.values().sum();
    let estimated_earnings: f64 = local_events
        .iter()
        .map(|e| e.price * rsvps.get(&e.id).copied().unwrap_or(0) as f64)
        .sum();

    ProfileSummary {
        event_count: local_events.len(),
        total_rsvps,
        estimated_earnings,
    }
}

/// Local events, newest first.
pub fn my_events(local_events: &[Event]) -> Vec<Event> {
    let mut list = local_events.to_vec();
    list.sort_by(|a, b| b.date_time.cmp(&a.date_time).then_with(|| a.id.cmp(&b.id)));
    list
}
