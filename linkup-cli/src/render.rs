//! TUI rendering traits for linkup types.
//!
//! Extension traits that add colored terminal rendering to linkup-core types
//! using owo_colors.

use chrono::{DateTime, Local, Utc};
use linkup_core::Event;
use linkup_core::feed::Provenance;
use linkup_core::friends::Friend;
use linkup_core::overlay::OverlaySnapshot;
use linkup_core::profile::ProfileSummary;
use linkup_core::share::native_maps_url;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Provenance {
    fn render(&self) -> String {
        let label = self.to_string();
        match self {
            Provenance::Remote => label.green().to_string(),
            Provenance::Local => label.yellow().to_string(),
        }
    }
}

impl Render for Friend {
    fn render(&self) -> String {
        let since = self.added_at.with_timezone(&Local).format("%b %-d, %Y");
        format!(
            "({}) {} {}",
            self.initial().bold(),
            self.handle,
            format!("added {since}").dimmed()
        )
    }
}

impl Render for ProfileSummary {
    fn render(&self) -> String {
        [
            format!("  Events    {}", self.event_count.bold()),
            format!("  RSVPs     {}", self.total_rsvps.bold()),
            format!("  Earnings  {}", self.earnings_display().green()),
        ]
        .join("\n")
    }
}

/// An event with its counters as the user currently sees them.
pub struct EventRow<'a> {
    pub event: &'a Event,
    pub overlay: &'a OverlaySnapshot,
}

impl Render for EventRow<'_> {
    fn render(&self) -> String {
        let event = self.event;
        let mut lines = vec![format!(
            "{} {} {}",
            format_when(&event.date_time).cyan(),
            event.title.bold(),
            price_label(event).dimmed()
        )];

        if !event.location_text.is_empty() {
            lines.push(format!("   {}", event.location_text));
        }
        if !event.description.is_empty() {
            lines.push(format!("   {}", event.description.italic()));
        }
        if !event.ticket_url.is_empty() {
            lines.push(format!(
                "   {} {}",
                format!("Buy ticket ({}):", price_label(event)).yellow(),
                event.ticket_url.underline()
            ));
        }
        if let Some(maps) = native_maps_url(event) {
            lines.push(format!("   {} {}", "Open in Maps:".dimmed(), maps));
        }

        lines.push(format!(
            "   ♥ {}  ✓ {}  {}",
            self.overlay.displayed_likes(event),
            self.overlay.displayed_rsvps(event),
            format!("[{}]", event.id).dimmed()
        ));

        lines.join("\n")
    }
}

/// "Free" or a dollar amount.
pub fn price_label(event: &Event) -> String {
    if event.is_paid() {
        format!("${:.2}", event.price)
    } else {
        "Free".to_string()
    }
}

/// Local wall-clock label, e.g. "Sat Jun 14 18:30".
pub fn format_when(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%a %b %-d %H:%M").to_string()
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
