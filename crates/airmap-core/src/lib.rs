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

//! Marker visibility engine for airport/route world maps.
//!
//! This library keeps a map of airports and flight routes legible across
//! zoom levels by bounding how many markers are shown at once. It is
//! organized as independent layers that compose into a per-frame pipeline:
//!
//! - **Feed layer**: OpenFlights `airports.dat` / `routes.dat` parsing with
//!   per-record skip on malformed rows
//! - **Store layer**: the entity arena — airports sorted by latitude once,
//!   routes with their polylines resolved at load
//! - **Visibility layer**: latitude-bucketed density sampler, viewport
//!   filter, and route joiner, recomputed in that order each frame into a
//!   fresh [`VisibilityFrame`]
//! - **Selection layer**: single-slot hover and click tracking over the
//!   displayed set
//!
//! Map rendering itself stays outside: anything that can project
//! coordinates and answer pixel hit tests implements
//! [`projection::Projection`] and drives the engine.
//!
//! # Quick Start
//!
//! ```
//! use airmap_core::feed;
//! use airmap_core::projection::{
//!     GeoCoord, MarkerId, MarkerShape, Projection, ScreenBounds, ScreenPos,
//! };
//! use airmap_core::store::MarkerStore;
//! use airmap_core::visibility::compute_frame;
//!
//! /// Minimal headless projection: one degree per pixel.
//! struct FlatMap;
//!
//! impl Projection for FlatMap {
//!     fn screen_position(&self, coord: GeoCoord) -> ScreenPos {
//!         ScreenPos::new(coord.lon as f32, coord.lat as f32)
//!     }
//!     fn zoom_level(&self) -> u8 {
//!         4
//!     }
//!     fn viewport_bounds(&self) -> ScreenBounds {
//!         ScreenBounds::new(-180.0, -90.0, 180.0, 90.0)
//!     }
//!     fn first_hit_marker_at(&self, _x: f32, _y: f32) -> Option<MarkerId> {
//!         None
//!     }
//!     fn point_in_shape(&self, _x: f32, _y: f32, _shape: &MarkerShape<'_>) -> bool {
//!         false
//!     }
//! }
//!
//! let airports = "\
//! 1,\"Goroka Airport\",\"Goroka\",\"Papua New Guinea\",\"GKA\",\"AYGA\",-6.08,145.39,5282
//! 2,\"Madang Airport\",\"Madang\",\"Papua New Guinea\",\"MAG\",\"AYMD\",-5.21,145.79,20
//! ";
//! let routes = "2B,410,GKA,1,MAG,2,,0,CR2\n";
//!
//! let store = MarkerStore::from_records(
//!     feed::parse_airports(airports.as_bytes()).unwrap(),
//!     feed::parse_routes(routes.as_bytes()).unwrap(),
//! );
//!
//! let frame = compute_frame(&store, &FlatMap);
//! println!(
//!     "{} out of {} airports displayed on the map",
//!     frame.displayed_count(),
//!     frame.inside_viewport_count()
//! );
//! # assert_eq!(frame.inside_viewport_count(), 2);
//! ```
//!
//! # Using Individual Layers
//!
//! The sampler works directly on a sorted point slice:
//!
//! ```
//! use airmap_core::visibility::sampler::{sample, DensityParams};
//!
//! let params = DensityParams::for_zoom(2); // 10-degree bands, every 30th
//! let kept = sample(&[], params);
//! assert!(kept.is_empty());
//! ```

pub mod feed;
pub mod projection;
pub mod select;
pub mod store;
pub mod visibility;

pub use projection::{GeoCoord, MarkerId, MarkerShape, Projection, ScreenBounds, ScreenPos};
pub use select::SelectionTracker;
pub use store::{EdgeEntity, EdgeId, MarkerStore, PointEntity, PointId};
pub use visibility::{
    compute_frame, compute_frame_with, ConfigError, DensityParams, IndexSet, VisibilityFrame,
};
