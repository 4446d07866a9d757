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

//! Route-visibility joiner.
//!
//! A route is shown only while both of its endpoint airports are on screen,
//! so the join must run after the sampler and the viewport filter have
//! produced the frame's displayed set. Starts from an empty set each frame
//! (full reset) for the same reason the sampler does: no stale visibility
//! may survive a recompute.

use super::set::IndexSet;
use crate::store::MarkerStore;

/// Indices of the edges whose source and destination are both in
/// `displayed_points` (a set of point arena indices).
///
/// Edges referencing ids absent from the point universe never resolve and
/// never match, for any displayed set.
#[must_use]
pub fn visible_edges(store: &MarkerStore, displayed_points: &IndexSet) -> IndexSet {
    let mut visible = IndexSet::with_capacity(store.edges().len());

    for (index, edge) in store.edges().iter().enumerate() {
        let shown = store
            .point_index(edge.source_id)
            .zip(store.point_index(edge.dest_id))
            .is_some_and(|(source, dest)| {
                displayed_points.contains(source) && displayed_points.contains(dest)
            });
        if shown {
            visible.insert(index);
        }
    }

    visible
}
