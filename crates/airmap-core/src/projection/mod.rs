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

//! Projection contract for the mapping layer.
//!
//! The visibility pipeline and the selection controller never talk to a map
//! widget directly. Everything they need from the rendering side — geo to
//! screen projection, the current zoom level, the viewport rectangle, and
//! pixel-level hit tests — comes through the [`Projection`] trait, so any
//! map backend (or a headless stand-in) can drive the engine.

use crate::store::{EdgeId, PointId};

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoord {
    /// Latitude in degrees (-90..90).
    pub lat: f64,
    /// Longitude in degrees (-180..180).
    pub lon: f64,
}

impl GeoCoord {
    /// Create a new coordinate.
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A position in screen-space pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPos {
    pub x: f32,
    pub y: f32,
}

impl ScreenPos {
    /// Create a new screen position.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The visible frame in screen-space pixels.
///
/// `(left, top)` is the top-left corner, `(right, bottom)` the bottom-right
/// one. All four edges are inclusive for containment tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl ScreenBounds {
    /// Create new bounds from edge coordinates.
    #[must_use]
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Check whether a screen position lies inside the bounds (edges
    /// inclusive).
    #[must_use]
    pub fn contains(&self, pos: ScreenPos) -> bool {
        pos.x >= self.left && pos.x <= self.right && pos.y >= self.top && pos.y <= self.bottom
    }
}

/// Identifier of any marker on the map, point or edge.
///
/// Replaces marker subclassing with a tagged variant: rendering and click
/// handling dispatch on the kind in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerId {
    /// An airport marker, identified by its stable feed id.
    Point(PointId),
    /// A route marker, identified by its load-order id.
    Edge(EdgeId),
}

/// Hit-testable geometry of a marker.
///
/// The projection backend decides what "inside" means in screen space;
/// the engine only describes the shape in geo coordinates plus its pixel
/// extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerShape<'a> {
    /// A circular point marker centered on a location.
    Circle {
        center: GeoCoord,
        /// Radius in pixels.
        radius: f32,
    },
    /// A stroked polyline marker.
    Polyline {
        points: &'a [GeoCoord],
        /// Stroke width in pixels.
        stroke: f32,
    },
}

/// Contract provided by the mapping layer.
///
/// Implement this trait to drive the engine from a real map widget or from
/// a headless projection. Hit-test queries return misses as `false`/`None`,
/// never errors.
pub trait Projection {
    /// Project a geographic coordinate to screen-space pixels.
    fn screen_position(&self, coord: GeoCoord) -> ScreenPos;

    /// Current integer zoom level of the map.
    fn zoom_level(&self) -> u8;

    /// Current visible frame in screen-space pixels.
    fn viewport_bounds(&self) -> ScreenBounds;

    /// First marker whose drawn geometry covers the given pixel, or `None`
    /// if the pixel is outside every marker.
    fn first_hit_marker_at(&self, x: f32, y: f32) -> Option<MarkerId>;

    /// Test whether a pixel lies inside a marker shape.
    fn point_in_shape(&self, x: f32, y: f32, shape: &MarkerShape<'_>) -> bool;
}
