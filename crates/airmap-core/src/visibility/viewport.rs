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

//! Viewport filter.
//!
//! Decides which points project inside the current screen frame. Pan and
//! zoom can change every frame, so this is a constant-time bounds
//! comparison per entity, recomputed per query rather than cached.

use super::set::IndexSet;
use crate::projection::{Projection, ScreenBounds};
use crate::store::PointEntity;

/// Whether a point's projected position lies inside the frame.
#[must_use]
pub fn inside_viewport<P: Projection>(
    point: &PointEntity,
    projection: &P,
    bounds: ScreenBounds,
) -> bool {
    bounds.contains(projection.screen_position(point.location()))
}

/// Indices of all points inside the viewport, density limiting ignored.
///
/// Feeds the "M" side of the "N of M airports displayed" counter.
#[must_use]
pub fn all_inside_viewport<P: Projection>(points: &[PointEntity], projection: &P) -> IndexSet {
    let bounds = projection.viewport_bounds();
    points
        .iter()
        .enumerate()
        .filter(|(_, point)| inside_viewport(point, projection, bounds))
        .map(|(index, _)| index)
        .collect()
}
