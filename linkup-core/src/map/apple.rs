//! Apple Maps provider.
//!
//! Apple Maps describes the viewport as a region: a center plus the degrees of
//! latitude and longitude in view.

use super::{
    Bounds, Coordinate, FIT_PADDING, FRAME_HEIGHT, FRAME_WIDTH, MapPoint, MapProvider,
    span_for_zoom,
};
use crate::error::{LinkupError, LinkupResult};

/// Smallest span a fitted region is allowed to shrink to.
const MIN_SPAN: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub center: Coordinate,
    pub lat_span: f64,
    pub lng_span: f64,
}

pub struct AppleMaps {
    token: String,
    container: Option<String>,
    region: Region,
    markers: Vec<MapPoint>,
}

impl AppleMaps {
    pub fn new(token: impl Into<String>) -> Self {
        AppleMaps {
            token: token.into(),
            container: None,
            region: Region {
                center: Coordinate::new(0.0, 0.0),
                lat_span: 180.0,
                lng_span: 360.0,
            },
            markers: Vec::new(),
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }
}

/// MapKit tokens are JWTs: three non-empty base64url segments.
fn is_jwt(token: &str) -> bool {
    let segments: Vec<&str> = token.split('.').collect();
    segments.len() == 3
        && segments.iter().all(|s| {
            !s.is_empty()
                && s.chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '='))
        })
}

impl MapProvider for AppleMaps {
    fn name(&self) -> &'static str {
        "Apple Maps"
    }

    fn initialize(&mut self, container_id: &str, center: Coordinate, zoom: f64) -> LinkupResult<()> {
        if self.container.is_some() {
            return Ok(());
        }
        if !is_jwt(&self.token) {
            return Err(LinkupError::ExternalApi(
                "Apple Maps token is not a valid JWT".into(),
            ));
        }

        let (lat_span, lng_span) = span_for_zoom(zoom);
        self.region = Region {
            center,
            lat_span,
            lng_span,
        };
        self.container = Some(container_id.to_string());
        Ok(())
    }

    fn set_markers(&mut self, points: Vec<MapPoint>) {
        self.markers = points;
        let Some(bounds) = Bounds::around(&self.markers) else {
            return;
        };

        let usable_h = 1.0 - 2.0 * FIT_PADDING / FRAME_HEIGHT;
        let usable_w = 1.0 - 2.0 * FIT_PADDING / FRAME_WIDTH;
        self.region = Region {
            center: bounds.center(),
            lat_span: (bounds.lat_span() / usable_h).max(MIN_SPAN),
            lng_span: (bounds.lng_span() / usable_w).max(MIN_SPAN),
        };
    }

    // Recenters only; the span stays as it was.
    fn focus(&mut self, lat: f64, lng: f64, _zoom_hint: Option<f64>) {
        self.region.center = Coordinate::new(lat, lng);
    }

    fn markers(&self) -> &[MapPoint] {
        &self.markers
    }

    fn center(&self) -> Coordinate {
        self.region.center
    }

    fn view_url(&self) -> String {
        let r = &self.region;
        format!(
            "https://maps.apple.com/?ll={:.6},{:.6}&spn={:.6},{:.6}",
            r.center.lat, r.center.lng, r.lat_span, r.lng_span
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64) -> MapPoint {
        MapPoint {
            lat,
            lng,
            title: "x".into(),
            subtitle: String::new(),
        }
    }

    fn initialized() -> AppleMaps {
        let mut map = AppleMaps::new("aaa.bbb.ccc");
        map.initialize("map", Coordinate::new(34.05, -118.24), 11.0).unwrap();
        map
    }

    #[test]
    fn rejects_malformed_tokens() {
        for token in ["", "abc", "a.b", "a..c", "a.b.c.d", "a b.c.d"] {
            let mut map = AppleMaps::new(token);
            assert!(map.initialize("map", Coordinate::new(0.0, 0.0), 11.0).is_err());
        }
    }

    #[test]
    fn initialize_is_idempotent() {
        let mut map = initialized();
        map.initialize("other", Coordinate::new(0.0, 0.0), 2.0).unwrap();
        assert_eq!(map.center(), Coordinate::new(34.05, -118.24));
    }

    #[test]
    fn markers_fit_with_padding() {
        let mut map = initialized();
        map.set_markers(vec![point(34.0, -118.4), point(34.2, -118.0)]);

        let region = map.region();
        assert!((region.center.lat - 34.1).abs() < 1e-9);
        assert!((region.center.lng + 118.2).abs() < 1e-9);
        assert!(region.lat_span > 0.2);
        assert!(region.lng_span > 0.4);
        assert_eq!(map.markers().len(), 2);
    }

    #[test]
    fn empty_markers_keep_viewport() {
        let mut map = initialized();
        map.set_markers(vec![point(10.0, 10.0)]);
        let before = map.region();

        map.set_markers(Vec::new());
        assert!(map.markers().is_empty());
        assert_eq!(map.region(), before);
    }

    #[test]
    fn focus_keeps_span() {
        let mut map = initialized();
        let before = map.region();
        map.focus(40.7, -74.0, Some(15.0));

        assert_eq!(map.center(), Coordinate::new(40.7, -74.0));
        assert_eq!(map.region().lat_span, before.lat_span);
        assert!(map.view_url().starts_with("https://maps.apple.com/?ll=40.700000,-74.000000&spn="));
    }
}
