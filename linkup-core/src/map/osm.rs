//! OpenStreetMap tile map provider.
//!
//! The viewport is a center plus a whole tile zoom level.

use super::{Bounds, Coordinate, FOCUS_ZOOM, MAX_ZOOM, MapPoint, MapProvider, zoom_to_fit};
use crate::error::LinkupResult;

pub struct OpenStreetMap {
    container: Option<String>,
    center: Coordinate,
    zoom: f64,
    markers: Vec<MapPoint>,
}

impl OpenStreetMap {
    pub fn new() -> Self {
        OpenStreetMap {
            container: None,
            center: Coordinate::new(0.0, 0.0),
            zoom: 0.0,
            markers: Vec::new(),
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }
}

impl Default for OpenStreetMap {
    fn default() -> Self {
        Self::new()
    }
}

impl MapProvider for OpenStreetMap {
    fn name(&self) -> &'static str {
        "OpenStreetMap"
    }

    fn initialize(&mut self, container_id: &str, center: Coordinate, zoom: f64) -> LinkupResult<()> {
        if self.container.is_none() {
            self.container = Some(container_id.to_string());
            self.center = center;
            self.zoom = zoom.clamp(0.0, MAX_ZOOM);
        }
        Ok(())
    }

    fn set_markers(&mut self, points: Vec<MapPoint>) {
        self.markers = points;
        if let Some(bounds) = Bounds::around(&self.markers) {
            self.center = bounds.center();
            self.zoom = zoom_to_fit(&bounds);
        }
    }

    // Also drops a plain marker at the focused point.
    fn focus(&mut self, lat: f64, lng: f64, zoom_hint: Option<f64>) {
        self.center = Coordinate::new(lat, lng);
        self.zoom = zoom_hint.unwrap_or(FOCUS_ZOOM).clamp(0.0, MAX_ZOOM);
        self.markers.push(MapPoint {
            lat,
            lng,
            title: String::new(),
            subtitle: String::new(),
        });
    }

    fn markers(&self) -> &[MapPoint] {
        &self.markers
    }

    fn center(&self) -> Coordinate {
        self.center
    }

    fn view_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/#map={}/{:.5}/{:.5}",
            self.zoom as u32, self.center.lat, self.center.lng
        )
    }
}
