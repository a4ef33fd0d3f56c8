//! Event creation input and its validation.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use super::Event;
use crate::error::{LinkupError, LinkupResult};

/// User input for a new event, as typed into the create form.
///
/// `date` is `YYYY-MM-DD` and `time` is `HH:MM`; together they name a wall-clock
/// moment in the creator's time zone.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location_text: String,
    pub description: String,
    pub price: Option<f64>,
    pub ticket_url: String,
    pub cover_url: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl EventDraft {
    /// Validate the draft and turn it into a local event created at `created_at`.
    ///
    /// Nothing is persisted here; a validation error leaves no trace.
    pub fn into_event<Tz: TimeZone>(self, tz: &Tz, created_at: DateTime<Utc>) -> LinkupResult<Event> {
        let title = self.title.trim().to_string();
        let date = self.date.trim();
        let time = self.time.trim();

        if title.is_empty() || date.is_empty() || time.is_empty() {
            return Err(LinkupError::validation(
                "Please provide title, date and time.",
            ));
        }

        let date_time = parse_local(date, time, tz)
            .ok_or_else(|| LinkupError::validation("Invalid date/time."))?;

        let price = match self.price {
            None => 0.0,
            Some(p) if p.is_finite() && p >= 0.0 => p,
            Some(_) => {
                return Err(LinkupError::validation(
                    "Price must be a non-negative number.",
                ));
            }
        };

        // Coordinates only count as a pair.
        let (lat, lng) = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => (Some(lat), Some(lng)),
            _ => (None, None),
        };

        Ok(Event {
            id: Event::local_id(created_at),
            title,
            description: self.description.trim().to_string(),
            location_text: self.location_text.trim().to_string(),
            price,
            ticket_url: self.ticket_url.trim().to_string(),
            cover_url: self.cover_url.trim().to_string(),
            date_time,
            lat,
            lng,
            likes: 0,
            rsvps: 0,
        })
    }
}

fn parse_local<Tz: TimeZone>(date: &str, time: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .ok()?;
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn draft() -> EventDraft {
        EventDraft {
            title: "  Beach Cleanup ".to_string(),
            date: "2025-06-01".to_string(),
            time: "10:00".to_string(),
            ..Default::default()
        }
    }

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 20, 8, 0, 0).unwrap()
    }

    #[test]
    fn builds_local_event() {
        let event = draft().into_event(&Utc, created()).unwrap();

        assert_eq!(event.id, Event::local_id(created()));
        assert_eq!(event.title, "Beach Cleanup");
        assert_eq!(event.date_time, Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap());
        assert_eq!(event.likes, 0);
        assert_eq!(event.rsvps, 0);
        assert!(event.is_local());
    }

    #[test]
    fn wall_clock_is_read_in_given_zone() {
        let la = FixedOffset::west_opt(7 * 3600).unwrap();
        let event = draft().into_event(&la, created()).unwrap();
        assert_eq!(event.date_time, Utc.with_ymd_and_hms(2025, 6, 1, 17, 0, 0).unwrap());
    }

    #[test]
    fn requires_title_date_and_time() {
        for broken in [
            EventDraft { title: "  ".into(), ..draft() },
            EventDraft { date: String::new(), ..draft() },
            EventDraft { time: String::new(), ..draft() },
        ] {
            let err = broken.into_event(&Utc, created()).unwrap_err();
            assert!(err.is_validation());
            assert_eq!(err.to_string(), "Please provide title, date and time.");
        }
    }

    #[test]
    fn rejects_invalid_date_time() {
        let err = EventDraft { date: "2025-02-30".into(), ..draft() }
            .into_event(&Utc, created())
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid date/time.");

        let err = EventDraft { time: "25:61".into(), ..draft() }
            .into_event(&Utc, created())
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid date/time.");
    }

    #[test]
    fn rejects_negative_price() {
        let err = EventDraft { price: Some(-1.0), ..draft() }
            .into_event(&Utc, created())
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn drops_half_coordinates() {
        let event = EventDraft { lat: Some(34.0), ..draft() }
            .into_event(&Utc, created())
            .unwrap();
        assert_eq!(event.lat, None);
        assert_eq!(event.lng, None);

        let event = EventDraft { lat: Some(34.0), lng: Some(-118.0), ..draft() }
            .into_event(&Utc, created())
            .unwrap();
        assert_eq!(event.coordinates(), Some((34.0, -118.0)));
    }
}
