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

//! Web Mercator projection utilities.
//!
//! World-pixel coordinates: at zoom z the world is a square of
//! `2^z * 256` pixels, x growing east from longitude -180, y growing south
//! from the top of the Mercator square.

/// Pixel size of one map tile.
pub const TILE_SIZE: f64 = 256.0;

/// Web Mercator projection utilities
pub struct WebMercator;

impl WebMercator {
    /// World width/height in pixels at a zoom level.
    #[must_use]
    pub fn world_size(zoom: u8) -> f64 {
        2_f64.powi(i32::from(zoom)) * TILE_SIZE
    }

    /// Convert longitude to world-pixel X.
    #[must_use]
    pub fn lon_to_world_x(lon: f64, zoom: u8) -> f64 {
        ((lon + 180.0) / 360.0) * Self::world_size(zoom)
    }

    /// Convert latitude to world-pixel Y.
    #[must_use]
    pub fn lat_to_world_y(lat: f64, zoom: u8) -> f64 {
        let lat_rad = lat.to_radians();
        let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0;
        y * Self::world_size(zoom)
    }

    /// Convert world-pixel X back to longitude.
    #[must_use]
    pub fn world_x_to_lon(x: f64, zoom: u8) -> f64 {
        x / Self::world_size(zoom) * 360.0 - 180.0
    }

    /// Convert world-pixel Y back to latitude.
    #[must_use]
    pub fn world_y_to_lat(y: f64, zoom: u8) -> f64 {
        let n = std::f64::consts::PI * (1.0 - 2.0 * y / Self::world_size(zoom));
        n.sinh().atan().to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_projects_to_world_center() {
        assert!((WebMercator::lon_to_world_x(0.0, 0) - 128.0).abs() < 1e-9);
        assert!((WebMercator::lat_to_world_y(0.0, 0) - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_world_edges() {
        assert!((WebMercator::lon_to_world_x(-180.0, 0)).abs() < 1e-9);
        assert!((WebMercator::lon_to_world_x(180.0, 0) - 256.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip() {
        for &(lat, lon) in &[(32.881, -117.238), (-6.0817, 145.392), (60.0, 10.0)] {
            let zoom = 9;
            let x = WebMercator::lon_to_world_x(lon, zoom);
            let y = WebMercator::lat_to_world_y(lat, zoom);
            assert!((WebMercator::world_x_to_lon(x, zoom) - lon).abs() < 1e-9);
            assert!((WebMercator::world_y_to_lat(y, zoom) - lat).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zoom_doubles_world() {
        let at_3 = WebMercator::lon_to_world_x(45.0, 3);
        let at_4 = WebMercator::lon_to_world_x(45.0, 4);
        assert!((at_4 - 2.0 * at_3).abs() < 1e-9);
    }
}
