//! Map display model.
//!
//! Two interchangeable providers render event locations: Apple Maps, which
//! needs an access token, and an OpenStreetMap tile map that always works.
//! The choice is made once, at startup, by `select_provider`. Callers only
//! see the `MapProvider` trait.

mod apple;
mod osm;

pub use apple::{AppleMaps, Region};
pub use osm::OpenStreetMap;

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::MapConfig;
use crate::error::LinkupResult;
use crate::event::Event;

/// Nominal map frame in pixels, used when fitting markers.
pub const FRAME_WIDTH: f64 = 800.0;
pub const FRAME_HEIGHT: f64 = 600.0;
/// Uniform padding kept around fitted markers, in pixels.
pub const FIT_PADDING: f64 = 30.0;
pub const TILE_SIZE: f64 = 256.0;
pub const MAX_ZOOM: f64 = 19.0;
/// Zoom used by `focus` when the caller gives no hint.
pub const FOCUS_ZOOM: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Coordinate { lat, lng }
    }
}

/// A marker to place on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub lat: f64,
    pub lng: f64,
    pub title: String,
    pub subtitle: String,
}

impl MapPoint {
    pub fn from_event(event: &Event) -> Option<Self> {
        let (lat, lng) = event.coordinates()?;
        Some(MapPoint {
            lat,
            lng,
            title: event.title.clone(),
            subtitle: event.location_text.clone(),
        })
    }
}

/// Markers for every event that has coordinates.
pub fn points_for(events: &[Event]) -> Vec<MapPoint> {
    events.iter().filter_map(MapPoint::from_event).collect()
}

/// Smallest box containing a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn around(points: &[MapPoint]) -> Option<Self> {
        let first = points.first()?;
        let start = Bounds {
            south: first.lat,
            west: first.lng,
            north: first.lat,
            east: first.lng,
        };
        Some(points.iter().fold(start, |b, p| Bounds {
            south: b.south.min(p.lat),
            west: b.west.min(p.lng),
            north: b.north.max(p.lat),
            east: b.east.max(p.lng),
        }))
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }

    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    pub fn lng_span(&self) -> f64 {
        self.east - self.west
    }
}

fn mercator_y(lat: f64) -> f64 {
    let phi = lat.clamp(-85.0511, 85.0511).to_radians();
    (PI / 4.0 + phi / 2.0).tan().ln()
}

/// Highest whole zoom level at which `bounds` fits in the padded frame.
pub fn zoom_to_fit(bounds: &Bounds) -> f64 {
    let usable_w = FRAME_WIDTH - 2.0 * FIT_PADDING;
    let usable_h = FRAME_HEIGHT - 2.0 * FIT_PADDING;

    let lng_extent = bounds.lng_span();
    let y_extent = mercator_y(bounds.north) - mercator_y(bounds.south);

    let zoom_w = if lng_extent > 0.0 {
        (usable_w * 360.0 / (TILE_SIZE * lng_extent)).log2()
    } else {
        MAX_ZOOM
    };
    let zoom_h = if y_extent > 0.0 {
        (usable_h * 2.0 * PI / (TILE_SIZE * y_extent)).log2()
    } else {
        MAX_ZOOM
    };

    zoom_w.min(zoom_h).floor().clamp(0.0, MAX_ZOOM)
}

/// Degrees of (latitude, longitude) visible in the frame at `zoom`.
pub fn span_for_zoom(zoom: f64) -> (f64, f64) {
    let lng = 360.0 * FRAME_WIDTH / (TILE_SIZE * 2f64.powf(zoom));
    (lng * FRAME_HEIGHT / FRAME_WIDTH, lng)
}

/// Uniform contract over the map providers.
pub trait MapProvider {
    fn name(&self) -> &'static str;

    /// Prepare the map in `container_id`. Calling it again is a no-op.
    fn initialize(&mut self, container_id: &str, center: Coordinate, zoom: f64) -> LinkupResult<()>;

    /// Replace all markers. A non-empty set also moves the viewport to show
    /// every marker; an empty one leaves the viewport where it was.
    fn set_markers(&mut self, points: Vec<MapPoint>);

    /// Move the viewport to a point.
    fn focus(&mut self, lat: f64, lng: f64, zoom_hint: Option<f64>);

    fn markers(&self) -> &[MapPoint];

    fn center(&self) -> Coordinate;

    /// Web link showing the current viewport in this provider's map.
    fn view_url(&self) -> String;
}

/// Pick the map provider for this session.
///
/// Apple Maps is used when a token is configured and initializes; any failure
/// falls back to OpenStreetMap once, without retrying.
pub fn select_provider(config: &MapConfig, container_id: &str) -> Box<dyn MapProvider> {
    let center = config.default_center;
    let zoom = config.default_zoom;

    if let Some(token) = config.apple_maps_token.as_deref().filter(|t| !t.trim().is_empty()) {
        let mut apple = AppleMaps::new(token.trim());
        match apple.initialize(container_id, center, zoom) {
            Ok(()) => return Box::new(apple),
            Err(e) => warn!("Apple Maps unavailable, falling back to OpenStreetMap: {e}"),
        }
    }

    let mut osm = OpenStreetMap::new();
    if let Err(e) = osm.initialize(container_id, center, zoom) {
        warn!("OpenStreetMap initialization failed: {e}");
    }
    Box::new(osm)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64) -> MapPoint {
        MapPoint {
            lat,
            lng,
            title: String::new(),
            subtitle: String::new(),
        }
    }

    fn config(token: Option<&str>) -> MapConfig {
        MapConfig {
            apple_maps_token: token.map(str::to_string),
            ..MapConfig::default()
        }
    }

    #[test]
    fn bounds_cover_all_points() {
        let b = Bounds::around(&[point(34.0, -118.5), point(34.2, -118.1), point(33.9, -118.3)])
            .unwrap();
        assert_eq!(b.south, 33.9);
        assert_eq!(b.north, 34.2);
        assert_eq!(b.west, -118.5);
        assert_eq!(b.east, -118.1);
        assert!(Bounds::around(&[]).is_none());
    }

    #[test]
    fn wider_bounds_fit_at_lower_zoom() {
        let city = Bounds::around(&[point(34.0, -118.5), point(34.1, -118.3)]).unwrap();
        let state = Bounds::around(&[point(32.5, -124.0), point(42.0, -114.0)]).unwrap();
        assert!(zoom_to_fit(&state) < zoom_to_fit(&city));
    }

    #[test]
    fn single_point_fits_at_max_zoom() {
        let b = Bounds::around(&[point(34.0, -118.0)]).unwrap();
        assert_eq!(zoom_to_fit(&b), MAX_ZOOM);
    }

    #[test]
    fn span_halves_per_zoom_level() {
        let (lat10, lng10) = span_for_zoom(10.0);
        let (lat11, lng11) = span_for_zoom(11.0);
        assert!((lng10 / lng11 - 2.0).abs() < 1e-9);
        assert!((lat10 / lat11 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn selects_apple_with_valid_token() {
        let map = select_provider(&config(Some("aaa.bbb.ccc")), "map");
        assert_eq!(map.name(), "Apple Maps");
    }

    #[test]
    fn falls_back_without_token() {
        assert_eq!(select_provider(&config(None), "map").name(), "OpenStreetMap");
        assert_eq!(select_provider(&config(Some("  ")), "map").name(), "OpenStreetMap");
    }

    #[test]
    fn falls_back_when_apple_init_fails() {
        let map = select_provider(&config(Some("not-a-jwt")), "map");
        assert_eq!(map.name(), "OpenStreetMap");
        assert_eq!(map.center(), MapConfig::default().default_center);
    }
}
