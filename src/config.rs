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

//! Application configuration management.
//!
//! Persistent TOML configuration for the harness: feed file locations,
//! initial map center and zoom, and viewport size. Command-line arguments
//! override whatever is stored here.

use log::warn;
use serde::{Deserialize, Serialize};

/// Application name used for the config file location.
pub const APP_NAME: &str = "airmap";

fn default_config_version() -> u32 {
    1
}

fn default_airports_path() -> String {
    "data/airports.dat".to_string()
}

fn default_routes_path() -> String {
    "data/routes.dat".to_string()
}

// Initial view over San Diego, like the original applet
fn default_center_lat() -> f64 {
    32.881
}

fn default_center_lon() -> f64 {
    -117.238
}

fn default_zoom() -> u8 {
    4
}

fn default_viewport_width() -> f32 {
    1280.0
}

fn default_viewport_height() -> f32 {
    800.0
}

/// Application configuration stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    /// Configuration schema version for migrations
    #[serde(default = "default_config_version")]
    pub config_version: u32,

    /// Path to the OpenFlights airports.dat feed
    #[serde(default = "default_airports_path")]
    pub airports_path: String,

    /// Path to the OpenFlights routes.dat feed
    #[serde(default = "default_routes_path")]
    pub routes_path: String,

    /// Initial map center latitude in degrees
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    /// Initial map center longitude in degrees
    #[serde(default = "default_center_lon")]
    pub center_lon: f64,

    /// Initial integer zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Viewport width in pixels
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f32,

    /// Viewport height in pixels
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            airports_path: default_airports_path(),
            routes_path: default_routes_path(),
            center_lat: default_center_lat(),
            center_lon: default_center_lon(),
            zoom: default_zoom(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}

impl AppConfig {
    /// Load the stored configuration, falling back to defaults if the file
    /// is missing or unreadable.
    #[must_use]
    pub fn load() -> Self {
        match confy::load(APP_NAME, None) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }
}
