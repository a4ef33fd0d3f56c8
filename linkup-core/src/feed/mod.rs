//! The event feed: which events to show, in what order.

pub mod filter;
mod sync;

pub use sync::{FeedSynchronizer, Placement};

use std::fmt;
use std::str::FromStr;

use crate::error::LinkupError;
use crate::event::Event;
use crate::overlay::OverlaySnapshot;

/// Search, date window and sort selected by the user. All parts are optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedQuery {
    pub text: Option<String>,
    pub window: Option<DateWindow>,
    pub sort: SortOrder,
}

impl FeedQuery {
    pub fn text(text: &str) -> Self {
        FeedQuery {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// Same calendar day as now, in the local time zone.
    Today,
    /// From the start of today up to (not including) the same time seven days later.
    Week,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most liked/RSVPed first.
    Hot,
    /// Latest date first.
    New,
    /// Earliest date first.
    #[default]
    Soonest,
}

impl FromStr for DateWindow {
    type Err = LinkupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(DateWindow::Today),
            "week" => Ok(DateWindow::Week),
            other => Err(LinkupError::validation(format!(
                "Unknown date filter '{other}' (expected today or week)"
            ))),
        }
    }
}

impl FromStr for SortOrder {
    type Err = LinkupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hot" => Ok(SortOrder::Hot),
            "new" => Ok(SortOrder::New),
            "soonest" => Ok(SortOrder::Soonest),
            other => Err(LinkupError::validation(format!(
                "Unknown sort '{other}' (expected hot, new or soonest)"
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            SortOrder::Hot => "hot",
            SortOrder::New => "new",
            SortOrder::Soonest => "soonest",
        };
        write!(f, "{name}")
    }
}

/// Where a feed's events were read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Remote,
    Local,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Provenance::Remote => write!(f, "remote"),
            Provenance::Local => write!(f, "local"),
        }
    }
}

/// A resolved feed, shared by the list view, the map and the profile.
#[derive(Debug, Clone)]
pub struct Feed {
    pub provenance: Provenance,
    pub events: Vec<Event>,
    /// Counter overlays as they were when the feed was resolved.
    pub overlay: OverlaySnapshot,
}

impl Feed {
    pub fn find(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filter_names() {
        assert_eq!("Today".parse::<DateWindow>().unwrap(), DateWindow::Today);
        assert_eq!("week".parse::<DateWindow>().unwrap(), DateWindow::Week);
        assert!("month".parse::<DateWindow>().is_err());

        assert_eq!("hot".parse::<SortOrder>().unwrap(), SortOrder::Hot);
        assert_eq!(" NEW ".parse::<SortOrder>().unwrap(), SortOrder::New);
        assert!("random".parse::<SortOrder>().unwrap_err().is_validation());
    }

    #[test]
    fn default_sort_is_soonest() {
        assert_eq!(FeedQuery::default().sort, SortOrder::Soonest);
    }
}
