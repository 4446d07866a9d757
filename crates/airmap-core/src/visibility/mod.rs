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

//! Per-frame visibility pipeline.
//!
//! One call recomputes everything the renderer needs for a frame, in the
//! required order: density sampler, then viewport filter, then route
//! joiner. The result is a fresh [`VisibilityFrame`] of bitmaps and
//! counters — visibility is never stored on the entities themselves, so a
//! recompute can't observe stale state from the previous zoom level.

pub mod routes;
pub mod sampler;
pub mod set;
pub mod viewport;

use log::debug;

pub use sampler::{ConfigError, DensityParams};
pub use set::IndexSet;

use crate::projection::{MarkerId, Projection};
use crate::store::{EdgeEntity, MarkerStore, PointEntity};

/// Visibility bitmaps and counters for one frame.
#[derive(Debug, Clone)]
pub struct VisibilityFrame {
    zoom: u8,
    density: DensityParams,
    /// Point indices kept by the density sampler.
    sampled: IndexSet,
    /// Point indices whose projection lies inside the viewport.
    in_viewport: IndexSet,
    /// sampled AND in_viewport.
    displayed: IndexSet,
    /// Edge indices with both endpoints displayed.
    visible_edges: IndexSet,
}

impl VisibilityFrame {
    /// Zoom level the frame was computed at.
    #[must_use]
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Density parameters the frame was computed with.
    #[must_use]
    pub fn density(&self) -> DensityParams {
        self.density
    }

    /// "N": points both inside the viewport and kept by density sampling.
    #[must_use]
    pub fn displayed_count(&self) -> usize {
        self.displayed.len()
    }

    /// "M": points inside the viewport, density limiting ignored.
    #[must_use]
    pub fn inside_viewport_count(&self) -> usize {
        self.in_viewport.len()
    }

    /// Number of currently visible routes.
    #[must_use]
    pub fn visible_edge_count(&self) -> usize {
        self.visible_edges.len()
    }

    /// Displayed point indices (ascending = latitude order).
    #[must_use]
    pub fn displayed(&self) -> &IndexSet {
        &self.displayed
    }

    /// In-viewport point indices, density ignored.
    #[must_use]
    pub fn in_viewport(&self) -> &IndexSet {
        &self.in_viewport
    }

    /// Visible edge indices.
    #[must_use]
    pub fn visible_edges(&self) -> &IndexSet {
        &self.visible_edges
    }

    /// Whether the point at an arena index is displayed.
    #[must_use]
    pub fn is_point_displayed(&self, index: usize) -> bool {
        self.displayed.contains(index)
    }

    /// Whether the edge at an arena index is visible.
    #[must_use]
    pub fn is_edge_visible(&self, index: usize) -> bool {
        self.visible_edges.contains(index)
    }

    /// Whether a marker id refers to a currently shown marker.
    #[must_use]
    pub fn is_marker_shown(&self, store: &MarkerStore, marker: MarkerId) -> bool {
        match marker {
            MarkerId::Point(id) => store
                .point_index(id)
                .is_some_and(|index| self.is_point_displayed(index)),
            MarkerId::Edge(id) => self.is_edge_visible(id as usize),
        }
    }

    /// Iterate the displayed points in latitude order.
    pub fn displayed_points<'a>(
        &'a self,
        store: &'a MarkerStore,
    ) -> impl Iterator<Item = &'a PointEntity> + 'a {
        self.displayed.iter().map(|index| &store.points()[index])
    }

    /// Iterate the visible edges in load order.
    pub fn displayed_edges<'a>(
        &'a self,
        store: &'a MarkerStore,
    ) -> impl Iterator<Item = &'a EdgeEntity> + 'a {
        self.visible_edges.iter().map(|index| &store.edges()[index])
    }
}

/// Recompute visibility for one frame using the fixed zoom policy.
#[must_use]
pub fn compute_frame<P: Projection>(store: &MarkerStore, projection: &P) -> VisibilityFrame {
    let zoom = projection.zoom_level();
    compute_frame_with(store, projection, DensityParams::for_zoom(zoom))
}

/// Recompute visibility for one frame with explicit density parameters.
///
/// Stage order is fixed: sampler, viewport filter, route joiner.
#[must_use]
pub fn compute_frame_with<P: Projection>(
    store: &MarkerStore,
    projection: &P,
    density: DensityParams,
) -> VisibilityFrame {
    let zoom = projection.zoom_level();

    let sampled = sampler::sample(store.points(), density);
    let in_viewport = viewport::all_inside_viewport(store.points(), projection);
    let displayed = sampled.intersection(&in_viewport);
    let visible_edges = routes::visible_edges(store, &displayed);

    debug!(
        "Frame at zoom {}: {} of {} airports displayed, {} routes",
        zoom,
        displayed.len(),
        in_viewport.len(),
        visible_edges.len()
    );

    VisibilityFrame {
        zoom,
        density,
        sampled,
        in_viewport,
        displayed,
        visible_edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{AirportRecord, RouteRecord};
    use crate::projection::{GeoCoord, MarkerShape, ScreenBounds, ScreenPos};

    struct FlatProjection {
        zoom: u8,
        bounds: ScreenBounds,
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
            None
        }

        fn point_in_shape(&self, _x: f32, _y: f32, _shape: &MarkerShape<'_>) -> bool {
            false
        }
    }

    fn airport(id: u32, lat: f64, lon: f64) -> AirportRecord {
        AirportRecord {
            id,
            name: String::new(),
            city: String::new(),
            country: String::new(),
            code: String::new(),
            altitude: String::new(),
            latitude: lat,
            longitude: lon,
        }
    }

    fn world_projection(zoom: u8) -> FlatProjection {
        FlatProjection {
            zoom,
            bounds: ScreenBounds::new(-180.0, -90.0, 180.0, 90.0),
        }
    }

    #[test]
    fn test_everything_displayed_at_high_zoom() {
        let store = MarkerStore::from_records(
            vec![
                airport(1, -85.0, 0.0),
                airport(2, -84.9, 0.0),
                airport(3, 12.0, 10.0),
            ],
            Vec::new(),
        );
        let frame = compute_frame(&store, &world_projection(5));

        // stride 1: every in-viewport point is displayed
        assert_eq!(frame.displayed_count(), frame.inside_viewport_count());
        assert_eq!(frame.displayed_count(), 3);
    }

    #[test]
    fn test_density_limits_at_low_zoom() {
        // Two airports share a 10-degree band; stride 6 keeps only the first
        let store = MarkerStore::from_records(
            vec![airport(1, -85.0, 0.0), airport(2, -84.0, 0.0)],
            Vec::new(),
        );
        let frame = compute_frame(&store, &world_projection(4));

        assert_eq!(frame.inside_viewport_count(), 2);
        assert_eq!(frame.displayed_count(), 1);
        assert!(frame.is_point_displayed(0));
        assert!(!frame.is_point_displayed(1));
    }

    #[test]
    fn test_offscreen_kept_point_not_displayed() {
        // Sampler keeps the point but the viewport filter drops it
        let store = MarkerStore::from_records(vec![airport(1, 50.0, 500.0)], Vec::new());
        let frame = compute_frame(&store, &world_projection(5));

        assert_eq!(frame.inside_viewport_count(), 0);
        assert_eq!(frame.displayed_count(), 0);
    }

    #[test]
    fn test_edge_follows_displayed_endpoints() {
        let store = MarkerStore::from_records(
            vec![airport(1, -85.0, 0.0), airport(2, 50.0, 400.0)],
            vec![RouteRecord { source_id: 1, dest_id: 2 }],
        );

        // Destination projects outside the viewport: no route
        let frame = compute_frame(&store, &world_projection(5));
        assert_eq!(frame.visible_edge_count(), 0);

        // Widen the viewport so both endpoints display: route appears
        let wide = FlatProjection {
            zoom: 5,
            bounds: ScreenBounds::new(-180.0, -90.0, 500.0, 90.0),
        };
        let frame = compute_frame(&store, &wide);
        assert_eq!(frame.visible_edge_count(), 1);
        assert!(frame.is_edge_visible(0));
    }

    #[test]
    fn test_marker_shown_dispatch() {
        let store = MarkerStore::from_records(
            vec![airport(1, -85.0, 0.0), airport(2, 50.0, 10.0)],
            vec![RouteRecord { source_id: 1, dest_id: 2 }],
        );
        let frame = compute_frame(&store, &world_projection(5));

        assert!(frame.is_marker_shown(&store, MarkerId::Point(1)));
        assert!(frame.is_marker_shown(&store, MarkerId::Edge(0)));
        assert!(!frame.is_marker_shown(&store, MarkerId::Point(99)));
    }
}
