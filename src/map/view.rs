// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Headless map view.
//!
//! Implements the engine's projection contract for a fixed-size viewport
//! centered on a location, using Web Mercator math. Stands in for the map
//! widget: projection, bounds, and pixel hit tests, no drawing.

use airmap_core::projection::{GeoCoord, MarkerId, MarkerShape, Projection, ScreenBounds, ScreenPos};
use airmap_core::store::MarkerStore;

use super::mercator::WebMercator;

/// Highest zoom level the view accepts.
const MAX_ZOOM: u8 = 18;

/// A fixed-size viewport centered on a location at an integer zoom level.
#[derive(Debug)]
pub struct MapView<'a> {
    store: &'a MarkerStore,
    center: GeoCoord,
    zoom: u8,
    width: f32,
    height: f32,
}

impl<'a> MapView<'a> {
    /// Create a view over the given store.
    #[must_use]
    pub fn new(store: &'a MarkerStore, center: GeoCoord, zoom: u8, width: f32, height: f32) -> Self {
        Self {
            store,
            center,
            zoom: zoom.min(MAX_ZOOM),
            width,
            height,
        }
    }

    /// Same view at a different zoom level.
    #[must_use]
    pub fn at_zoom(&self, zoom: u8) -> MapView<'a> {
        MapView::new(self.store, self.center, zoom, self.width, self.height)
    }

    fn distance_to(&self, x: f32, y: f32, coord: GeoCoord) -> f32 {
        let pos = self.screen_position(coord);
        let dx = x - pos.x;
        let dy = y - pos.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Distance from a pixel to the projected polyline.
    fn distance_to_polyline(&self, x: f32, y: f32, points: &[GeoCoord]) -> Option<f32> {
        let projected: Vec<ScreenPos> = points.iter().map(|p| self.screen_position(*p)).collect();
        projected
            .windows(2)
            .map(|seg| distance_to_segment(x, y, seg[0], seg[1]))
            .min_by(f32::total_cmp)
    }
}

impl Projection for MapView<'_> {
    fn screen_position(&self, coord: GeoCoord) -> ScreenPos {
        let zoom = self.zoom;
        let x = WebMercator::lon_to_world_x(coord.lon, zoom)
            - WebMercator::lon_to_world_x(self.center.lon, zoom);
        let y = WebMercator::lat_to_world_y(coord.lat, zoom)
            - WebMercator::lat_to_world_y(self.center.lat, zoom);
        ScreenPos::new(x as f32 + self.width / 2.0, y as f32 + self.height / 2.0)
    }

    fn zoom_level(&self) -> u8 {
        self.zoom
    }

    fn viewport_bounds(&self) -> ScreenBounds {
        ScreenBounds::new(0.0, 0.0, self.width, self.height)
    }

    fn first_hit_marker_at(&self, x: f32, y: f32) -> Option<MarkerId> {
        // Airports draw on top of routes, so they win the hit scan
        for point in self.store.points() {
            if self.point_in_shape(x, y, &point.shape()) {
                return Some(MarkerId::Point(point.id));
            }
        }
        for edge in self.store.edges() {
            if self.point_in_shape(x, y, &edge.shape()) {
                return Some(MarkerId::Edge(edge.id));
            }
        }
        None
    }

    fn point_in_shape(&self, x: f32, y: f32, shape: &MarkerShape<'_>) -> bool {
        match shape {
            MarkerShape::Circle { center, radius } => self.distance_to(x, y, *center) <= *radius,
            MarkerShape::Polyline { points, stroke } => self
                .distance_to_polyline(x, y, points)
                .is_some_and(|distance| distance <= stroke / 2.0),
        }
    }
}

/// Distance from a pixel to a line segment.
fn distance_to_segment(x: f32, y: f32, a: ScreenPos, b: ScreenPos) -> f32 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let (apx, apy) = (x - a.x, y - a.y);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq > 0.0 {
        ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.x + t * abx - x, a.y + t * aby - y);
    (cx * cx + cy * cy).sqrt()
}
