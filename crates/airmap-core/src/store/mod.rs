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

//! Geo-entity store.
//!
//! Holds the parsed airport (point) and route (edge) entities for a session.
//! Points are sorted by ascending latitude once at construction and never
//! re-shuffled afterwards — the density sampler depends on that order to map
//! latitude buckets onto contiguous index ranges. Entities are built once
//! from feed records and never deleted; all visibility and selection state
//! lives outside the store and is recomputed per frame.

use std::collections::HashMap;

use log::info;

use crate::feed::{AirportRecord, RouteRecord};
use crate::projection::{GeoCoord, MarkerShape};

/// Stable identifier of a point entity, taken from the feed.
pub type PointId = u32;

/// Identifier of an edge entity, assigned densely in load order.
pub type EdgeId = u32;

/// Drawn radius of a point marker in pixels.
pub const POINT_MARKER_RADIUS: f32 = 5.0;

/// Stroke width of an edge marker in pixels.
pub const EDGE_MARKER_STROKE: f32 = 3.0;

/// An airport marker on the world map.
#[derive(Debug, Clone)]
pub struct PointEntity {
    /// Stable feed id (OpenFlights airport id).
    pub id: PointId,
    /// Latitude in degrees (-90..90).
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Airport name.
    pub name: String,
    /// City served.
    pub city: String,
    /// Country.
    pub country: String,
    /// Airport code (IATA where present, ICAO otherwise).
    pub code: String,
    /// Field elevation, kept as the feed's opaque string.
    pub altitude: String,
}

impl PointEntity {
    /// Geographic location of the marker.
    #[must_use]
    pub fn location(&self) -> GeoCoord {
        GeoCoord::new(self.latitude, self.longitude)
    }

    /// Title line shown when the marker is hovered: "name, city, country".
    #[must_use]
    pub fn title(&self) -> String {
        format!("{}, {}, {}", self.name, self.city, self.country)
    }

    /// Hit-testable geometry of the marker.
    #[must_use]
    pub fn shape(&self) -> MarkerShape<'_> {
        MarkerShape::Circle {
            center: self.location(),
            radius: POINT_MARKER_RADIUS,
        }
    }
}

/// A route marker connecting two airports.
///
/// The endpoint ids may reference airports that are not present in the
/// store. Such edges are kept (entities are never deleted) but are
/// permanently unroutable: their polyline stays empty and they can never
/// join the visible set.
#[derive(Debug, Clone)]
pub struct EdgeEntity {
    /// Dense load-order id.
    pub id: EdgeId,
    /// Feed id of the source airport.
    pub source_id: PointId,
    /// Feed id of the destination airport.
    pub dest_id: PointId,
    /// Ordered polyline: source location, optional waypoints, destination
    /// location. Empty when either endpoint is unknown.
    pub waypoints: Vec<GeoCoord>,
}

impl EdgeEntity {
    /// Whether both endpoints resolved against the store at load time.
    #[must_use]
    pub fn is_routable(&self) -> bool {
        !self.waypoints.is_empty()
    }

    /// Hit-testable geometry of the marker.
    #[must_use]
    pub fn shape(&self) -> MarkerShape<'_> {
        MarkerShape::Polyline {
            points: &self.waypoints,
            stroke: EDGE_MARKER_STROKE,
        }
    }
}

/// Arena of all point and edge entities for a session.
#[derive(Debug, Default)]
pub struct MarkerStore {
    points: Vec<PointEntity>,
    edges: Vec<EdgeEntity>,
    index_by_id: HashMap<PointId, usize>,
}

impl MarkerStore {
    /// Build the store from parsed feed records.
    ///
    /// Points are sorted by ascending latitude; edge polylines are resolved
    /// against the point set. Duplicate point ids keep the first record.
    #[must_use]
    pub fn from_records(airports: Vec<AirportRecord>, routes: Vec<RouteRecord>) -> Self {
        let mut points: Vec<PointEntity> = airports
            .into_iter()
            .map(|record| PointEntity {
                id: record.id,
                latitude: record.latitude,
                longitude: record.longitude,
                name: record.name,
                city: record.city,
                country: record.country,
                code: record.code,
                altitude: record.altitude,
            })
            .collect();

        points.sort_by(|a, b| a.latitude.total_cmp(&b.latitude));

        let mut index_by_id = HashMap::with_capacity(points.len());
        for (index, point) in points.iter().enumerate() {
            index_by_id.entry(point.id).or_insert(index);
        }

        let edges: Vec<EdgeEntity> = routes
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let endpoints = index_by_id
                    .get(&record.source_id)
                    .zip(index_by_id.get(&record.dest_id));
                let waypoints = match endpoints {
                    Some((&source, &dest)) => {
                        vec![points[source].location(), points[dest].location()]
                    }
                    None => Vec::new(),
                };
                EdgeEntity {
                    id: index as EdgeId,
                    source_id: record.source_id,
                    dest_id: record.dest_id,
                    waypoints,
                }
            })
            .collect();

        let unroutable = edges.iter().filter(|e| !e.is_routable()).count();
        info!(
            "Store built: {} airports, {} routes ({} unroutable)",
            points.len(),
            edges.len(),
            unroutable
        );

        Self {
            points,
            edges,
            index_by_id,
        }
    }

    /// All point entities, in ascending latitude order.
    #[must_use]
    pub fn points(&self) -> &[PointEntity] {
        &self.points
    }

    /// All edge entities, in load order.
    #[must_use]
    pub fn edges(&self) -> &[EdgeEntity] {
        &self.edges
    }

    /// Arena index of a point by its stable feed id.
    #[must_use]
    pub fn point_index(&self, id: PointId) -> Option<usize> {
        self.index_by_id.get(&id).copied()
    }

    /// Look up a point by its stable feed id.
    #[must_use]
    pub fn point_by_id(&self, id: PointId) -> Option<&PointEntity> {
        self.point_index(id).map(|index| &self.points[index])
    }

    /// Look up an edge by its load-order id.
    #[must_use]
    pub fn edge_by_id(&self, id: EdgeId) -> Option<&EdgeEntity> {
        self.edges.get(id as usize)
    }

    /// Number of point entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the store holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
