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

//! Latitude-bucketed density sampler.
//!
//! Keeps the map legible when zoomed out by showing only every Nth airport
//! within fixed-width latitude bands. The point list is sorted by latitude,
//! so each band is a contiguous index range; a single forward scan with a
//! monotonic cursor finds every range in one O(n) pass regardless of the
//! bucket count.

use thiserror::Error;

use super::set::IndexSet;
use crate::store::PointEntity;

/// Zoom level at or above which every airport is shown.
const UNRESTRICTED_ZOOM: u8 = 5;

/// Zoom level at or above which the medium stride applies.
const MEDIUM_ZOOM: u8 = 3;

/// Latitude band width used by the zoom policy, in degrees.
const POLICY_BUCKET_WIDTH_DEG: f64 = 10.0;

/// Keep every 6th airport per band at medium zoom.
const MEDIUM_STRIDE: usize = 6;

/// Keep every 30th airport per band when zoomed far out.
const FAR_STRIDE: usize = 30;

/// Latitude domain bounds; buckets are half-open within [-90, 90).
const LAT_MIN: f64 = -90.0;
const LAT_MAX: f64 = 90.0;

/// Invalid sampler configuration. Fatal — unlike feed errors, these are
/// internal bugs, not bad input data.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("bucket width must be a positive number of degrees, got {0}")]
    InvalidBucketWidth(f64),

    #[error("stride must be at least 1, got {0}")]
    InvalidStride(usize),
}

/// Validated density-sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityParams {
    bucket_width_deg: f64,
    stride: usize,
}

impl DensityParams {
    /// Create parameters, failing fast on an invalid configuration.
    pub fn new(bucket_width_deg: f64, stride: usize) -> Result<Self, ConfigError> {
        if !bucket_width_deg.is_finite() || bucket_width_deg <= 0.0 {
            return Err(ConfigError::InvalidBucketWidth(bucket_width_deg));
        }
        if stride < 1 {
            return Err(ConfigError::InvalidStride(stride));
        }
        Ok(Self {
            bucket_width_deg,
            stride,
        })
    }

    /// Parameters that keep every airport (stride 1).
    #[must_use]
    pub fn unrestricted() -> Self {
        Self {
            bucket_width_deg: POLICY_BUCKET_WIDTH_DEG,
            stride: 1,
        }
    }

    /// Fixed zoom policy: zoom >= 5 shows everything, 3..5 keeps every 6th
    /// airport per 10-degree band, below 3 every 30th.
    #[must_use]
    pub fn for_zoom(zoom: u8) -> Self {
        if zoom >= UNRESTRICTED_ZOOM {
            Self::unrestricted()
        } else if zoom >= MEDIUM_ZOOM {
            Self {
                bucket_width_deg: POLICY_BUCKET_WIDTH_DEG,
                stride: MEDIUM_STRIDE,
            }
        } else {
            Self {
                bucket_width_deg: POLICY_BUCKET_WIDTH_DEG,
                stride: FAR_STRIDE,
            }
        }
    }

    /// Latitude band width in degrees.
    #[must_use]
    pub fn bucket_width_deg(&self) -> f64 {
        self.bucket_width_deg
    }

    /// Sampling interval within a band.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }
}

/// Compute the density-limited subset of `points`.
///
/// `points` must be sorted by ascending latitude (the store guarantees
/// this). Returns a fresh bitmap of kept arena indices — the full reset per
/// run is what keeps stale visibility from leaking between zoom levels.
///
/// Buckets are half-open: a point exactly on a boundary belongs to the
/// lower bucket. Within a bucket of k points, positions 0, stride,
/// 2*stride, ... are kept — exactly ceil(k / stride) points, always
/// including the bucket's first.
#[must_use]
pub fn sample(points: &[PointEntity], params: DensityParams) -> IndexSet {
    let mut kept = IndexSet::with_capacity(points.len());
    let width = params.bucket_width_deg();
    let stride = params.stride();

    let mut cursor = 0;
    let mut bucket = 0u32;
    loop {
        // Derive both edges from the bucket ordinal so float error cannot
        // accumulate across bands
        let lower = LAT_MIN + width * f64::from(bucket);
        let upper = LAT_MIN + width * f64::from(bucket + 1);
        if lower >= LAT_MAX || cursor >= points.len() {
            break;
        }

        let start = cursor;
        while cursor < points.len() && points[cursor].latitude < upper {
            cursor += 1;
        }

        let mut index = start;
        while index < cursor {
            kept.insert(index);
            index += stride;
        }

        bucket += 1;
    }

    kept
}
