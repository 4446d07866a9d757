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

//! Selection and hit-test controller.
//!
//! Tracks two independent single-slot selections: the hovered airport
//! (pointer-move) and the clicked marker (pointer-click). Each transition
//! clears the previous slot before probing, so at most one marker is ever
//! hovered and at most one clicked — the invariant holds by construction
//! instead of by flag discipline. Selection state never feeds back into the
//! visibility pipeline; it only drives the title and info affordances.

use crate::projection::{MarkerId, Projection};
use crate::store::{MarkerStore, PointId};
use crate::visibility::VisibilityFrame;

/// Single-slot hover and click tracking for one session.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    hovered: Option<PointId>,
    clicked: Option<MarkerId>,
}

impl SelectionTracker {
    /// Create a tracker with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently hovered airport, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<PointId> {
        self.hovered
    }

    /// Currently clicked marker, if any.
    #[must_use]
    pub fn clicked(&self) -> Option<MarkerId> {
        self.clicked
    }

    /// Whether the given airport is the hovered one.
    #[must_use]
    pub fn is_hovered(&self, id: PointId) -> bool {
        self.hovered == Some(id)
    }

    /// Whether the given marker is the clicked one.
    #[must_use]
    pub fn is_clicked(&self, marker: MarkerId) -> bool {
        self.clicked == Some(marker)
    }

    /// Pointer-move transition.
    ///
    /// Clears the previous hover, then scans the displayed airports in list
    /// order (= latitude order) and selects the first whose shape contains
    /// the pointer. A miss leaves nothing hovered.
    pub fn pointer_moved<P: Projection>(
        &mut self,
        store: &MarkerStore,
        frame: &VisibilityFrame,
        projection: &P,
        x: f32,
        y: f32,
    ) -> Option<PointId> {
        self.hovered = None;

        for index in frame.displayed().iter() {
            let point = &store.points()[index];
            if projection.point_in_shape(x, y, &point.shape()) {
                self.hovered = Some(point.id);
                break;
            }
        }

        self.hovered
    }

    /// Pointer-click transition.
    ///
    /// Clears the previous click, then asks the projection for the first
    /// marker drawn at the pixel. The hit counts only if that marker is
    /// currently shown (displayed airport or visible route); anything else
    /// leaves nothing clicked.
    pub fn pointer_clicked<P: Projection>(
        &mut self,
        store: &MarkerStore,
        frame: &VisibilityFrame,
        projection: &P,
        x: f32,
        y: f32,
    ) -> Option<MarkerId> {
        self.clicked = None;

        if let Some(marker) = projection.first_hit_marker_at(x, y) {
            if frame.is_marker_shown(store, marker) {
                self.clicked = Some(marker);
            }
        }

        self.clicked
    }

    /// Title line for the hovered airport.
    #[must_use]
    pub fn hover_title(&self, store: &MarkerStore) -> Option<String> {
        let point = store.point_by_id(self.hovered?)?;
        Some(point.title())
    }

    /// Info-box text for the clicked marker.
    #[must_use]
    pub fn click_info(&self, store: &MarkerStore) -> Option<String> {
        match self.clicked? {
            MarkerId::Point(id) => {
                let point = store.point_by_id(id)?;
                Some(format!(
                    "Airport Code: {}\nAltitude: {}\n{}",
                    point.code,
                    point.altitude,
                    point.title()
                ))
            }
            MarkerId::Edge(id) => {
                let edge = store.edge_by_id(id)?;
                Some(format!("Route {} -> {}", edge.source_id, edge.dest_id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{AirportRecord, RouteRecord};
    use crate::projection::{GeoCoord, MarkerShape, ScreenBounds, ScreenPos};
    use crate::visibility::compute_frame;

    /// Flat projection with circle hit tests and a scripted first-hit
    /// answer.
    struct FlatProjection {
        zoom: u8,
        bounds: ScreenBounds,
        first_hit: Option<MarkerId>,
    }

    impl Projection for FlatProjection {
        fn screen_position(&self, coord: GeoCoord) -> ScreenPos {
            ScreenPos::new(coord.lon as f32, coord.lat as f32)
        }

        fn zoom_level(&self) -> u8 {
            self.zoom
        }

        fn viewport_bounds(&self) -> ScreenBounds {
            self.bounds
        }

        fn first_hit_marker_at(&self, _x: f32, _y: f32) -> Option<MarkerId> {
            self.first_hit
        }

        fn point_in_shape(&self, x: f32, y: f32, shape: &MarkerShape<'_>) -> bool {
            match shape {
                MarkerShape::Circle { center, radius } => {
                    let pos = self.screen_position(*center);
                    let dx = x - pos.x;
                    let dy = y - pos.y;
                    (dx * dx + dy * dy).sqrt() <= *radius
                }
                MarkerShape::Polyline { .. } => false,
            }
        }
    }

    fn airport(id: u32, lat: f64, lon: f64) -> AirportRecord {
        AirportRecord {
            id,
            name: format!("Airport {id}"),
            city: "City".to_string(),
            country: "Country".to_string(),
            code: "AAA".to_string(),
            altitude: "100".to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    fn world(zoom: u8, first_hit: Option<MarkerId>) -> FlatProjection {
        FlatProjection {
            zoom,
            bounds: ScreenBounds::new(-180.0, -90.0, 180.0, 90.0),
            first_hit,
        }
    }

    #[test]
    fn test_hover_picks_first_in_latitude_order() {
        // Two overlapping airports; the lower-latitude one is earlier in
        // the list and wins the scan
        let store = MarkerStore::from_records(
            vec![airport(1, 10.0, 20.0), airport(2, 10.5, 20.0)],
            Vec::new(),
        );
        let projection = world(5, None);
        let frame = compute_frame(&store, &projection);
        let mut tracker = SelectionTracker::new();

        let hovered = tracker.pointer_moved(&store, &frame, &projection, 20.0, 10.2);
        assert_eq!(hovered, Some(1));
        assert!(tracker.is_hovered(1));
        assert_eq!(tracker.hover_title(&store).as_deref(), Some("Airport 1, City, Country"));
    }

    #[test]
    fn test_hover_miss_clears_previous() {
        let store = MarkerStore::from_records(vec![airport(1, 10.0, 20.0)], Vec::new());
        let projection = world(5, None);
        let frame = compute_frame(&store, &projection);
        let mut tracker = SelectionTracker::new();

        tracker.pointer_moved(&store, &frame, &projection, 20.0, 10.0);
        assert_eq!(tracker.hovered(), Some(1));

        let hovered = tracker.pointer_moved(&store, &frame, &projection, 120.0, 80.0);
        assert_eq!(hovered, None);
        assert_eq!(tracker.hovered(), None);
        assert_eq!(tracker.hover_title(&store), None);
    }

    #[test]
    fn test_at_most_one_hovered_after_any_sequence() {
        let store = MarkerStore::from_records(
            vec![airport(1, 10.0, 20.0), airport(2, 50.0, 60.0)],
            Vec::new(),
        );
        let projection = world(5, None);
        let frame = compute_frame(&store, &projection);
        let mut tracker = SelectionTracker::new();

        let probes = [(20.0, 10.0), (60.0, 50.0), (0.0, 0.0), (60.0, 50.0)];
        for (x, y) in probes {
            tracker.pointer_moved(&store, &frame, &projection, x, y);
            let hovered_count = store
                .points()
                .iter()
                .filter(|p| tracker.is_hovered(p.id))
                .count();
            assert!(hovered_count <= 1);
        }
        assert_eq!(tracker.hovered(), Some(2));
    }

    #[test]
    fn test_density_hidden_airport_not_hoverable() {
        // Zoom 4 keeps only the first airport of the shared band; hovering
        // the second must find nothing
        let store = MarkerStore::from_records(
            vec![airport(1, 10.0, 20.0), airport(2, 11.0, 60.0)],
            Vec::new(),
        );
        let projection = world(4, None);
        let frame = compute_frame(&store, &projection);
        let mut tracker = SelectionTracker::new();

        assert_eq!(
            tracker.pointer_moved(&store, &frame, &projection, 60.0, 11.0),
            None
        );
        assert_eq!(
            tracker.pointer_moved(&store, &frame, &projection, 20.0, 10.0),
            Some(1)
        );
    }

    #[test]
    fn test_click_selects_displayed_airport() {
        let store = MarkerStore::from_records(vec![airport(1, 10.0, 20.0)], Vec::new());
        let projection = world(5, Some(MarkerId::Point(1)));
        let frame = compute_frame(&store, &projection);
        let mut tracker = SelectionTracker::new();

        let clicked = tracker.pointer_clicked(&store, &frame, &projection, 20.0, 10.0);
        assert_eq!(clicked, Some(MarkerId::Point(1)));
        let info = tracker.click_info(&store).unwrap();
        assert!(info.contains("Airport Code: AAA"));
        assert!(info.contains("Altitude: 100"));
    }

    #[test]
    fn test_click_on_hidden_airport_ignored() {
        // The projection reports a hit, but the airport lost the density
        // sampling and is not displayed
        let store = MarkerStore::from_records(
            vec![airport(1, 10.0, 20.0), airport(2, 11.0, 60.0)],
            Vec::new(),
        );
        let projection = world(4, Some(MarkerId::Point(2)));
        let frame = compute_frame(&store, &projection);
        let mut tracker = SelectionTracker::new();

        assert_eq!(
            tracker.pointer_clicked(&store, &frame, &projection, 60.0, 11.0),
            None
        );
    }

    #[test]
    fn test_click_miss_clears_previous() {
        let store = MarkerStore::from_records(vec![airport(1, 10.0, 20.0)], Vec::new());
        let hit = world(5, Some(MarkerId::Point(1)));
        let miss = world(5, None);
        let frame = compute_frame(&store, &hit);
        let mut tracker = SelectionTracker::new();

        tracker.pointer_clicked(&store, &frame, &hit, 20.0, 10.0);
        assert_eq!(tracker.clicked(), Some(MarkerId::Point(1)));

        tracker.pointer_clicked(&store, &frame, &miss, 0.0, 0.0);
        assert_eq!(tracker.clicked(), None);
        assert_eq!(tracker.click_info(&store), None);
    }

    #[test]
    fn test_click_selects_visible_route() {
        let store = MarkerStore::from_records(
            vec![airport(1, 10.0, 20.0), airport(2, 50.0, 60.0)],
            vec![RouteRecord { source_id: 1, dest_id: 2 }],
        );
        let projection = world(5, Some(MarkerId::Edge(0)));
        let frame = compute_frame(&store, &projection);
        let mut tracker = SelectionTracker::new();

        let clicked = tracker.pointer_clicked(&store, &frame, &projection, 40.0, 30.0);
        assert_eq!(clicked, Some(MarkerId::Edge(0)));
        assert_eq!(tracker.click_info(&store).as_deref(), Some("Route 1 -> 2"));
    }

    #[test]
    fn test_hover_and_click_are_independent() {
        let store = MarkerStore::from_records(
            vec![airport(1, 10.0, 20.0), airport(2, 50.0, 60.0)],
            Vec::new(),
        );
        let projection = world(5, Some(MarkerId::Point(2)));
        let frame = compute_frame(&store, &projection);
        let mut tracker = SelectionTracker::new();

        tracker.pointer_moved(&store, &frame, &projection, 20.0, 10.0);
        tracker.pointer_clicked(&store, &frame, &projection, 60.0, 50.0);

        assert_eq!(tracker.hovered(), Some(1));
        assert_eq!(tracker.clicked(), Some(MarkerId::Point(2)));
    }
}
