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

//! Headless harness for the marker visibility engine.
//!
//! Loads the OpenFlights feeds, builds the store, and runs the per-frame
//! visibility pipeline through a Web Mercator viewport, reporting the
//! status counters a map shell would render. A pointer probe option drives
//! the hover/click selection controller at a given pixel.

mod config;
mod map;

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use airmap_core::feed;
use airmap_core::projection::{GeoCoord, Projection};
use airmap_core::store::MarkerStore;
use airmap_core::visibility::compute_frame;
use airmap_core::SelectionTracker;

use config::AppConfig;
use map::MapView;

/// Zoom levels swept by `--sweep`, one per density-policy band.
const SWEEP_ZOOM_LEVELS: [u8; 3] = [2, 4, 6];

#[derive(Parser, Debug)]
#[command(name = "airmap", about = "Airport and route map visibility harness")]
struct Args {
    /// Path to the OpenFlights airports.dat feed
    #[arg(long)]
    airports: Option<PathBuf>,

    /// Path to the OpenFlights routes.dat feed
    #[arg(long)]
    routes: Option<PathBuf>,

    /// Map center latitude in degrees
    #[arg(long)]
    lat: Option<f64>,

    /// Map center longitude in degrees
    #[arg(long)]
    lon: Option<f64>,

    /// Integer zoom level
    #[arg(long)]
    zoom: Option<u8>,

    /// Probe a pixel for hover and click hit tests
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    probe: Option<Vec<f32>>,

    /// Also report counters across all density-policy zoom bands
    #[arg(long)]
    sweep: bool,
}

fn report_frame(store: &MarkerStore, view: &MapView<'_>) {
    let frame = compute_frame(store, view);
    println!("Zoom Level: {}", view.zoom_level());
    println!(
        "{} out of {} airports displayed on the map",
        frame.displayed_count(),
        frame.inside_viewport_count()
    );
    println!("{} routes visible", frame.visible_edge_count());
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();
    let config = AppConfig::load();

    let airports_path = args
        .airports
        .unwrap_or_else(|| PathBuf::from(&config.airports_path));
    let routes_path = args
        .routes
        .unwrap_or_else(|| PathBuf::from(&config.routes_path));

    info!("Loading feeds from {:?} and {:?}", airports_path, routes_path);
    let airports = feed::parse_airports(BufReader::new(File::open(&airports_path)?))?;
    let routes = feed::parse_routes(BufReader::new(File::open(&routes_path)?))?;
    let store = MarkerStore::from_records(airports, routes);

    let center = GeoCoord::new(
        args.lat.unwrap_or(config.center_lat),
        args.lon.unwrap_or(config.center_lon),
    );
    let zoom = args.zoom.unwrap_or(config.zoom);
    let view = MapView::new(
        &store,
        center,
        zoom,
        config.viewport_width,
        config.viewport_height,
    );

    report_frame(&store, &view);

    if args.sweep {
        for sweep_zoom in SWEEP_ZOOM_LEVELS {
            if sweep_zoom != zoom {
                println!();
                report_frame(&store, &view.at_zoom(sweep_zoom));
            }
        }
    }

    if let Some(probe) = args.probe {
        let (x, y) = (probe[0], probe[1]);
        let frame = compute_frame(&store, &view);
        let mut tracker = SelectionTracker::new();

        tracker.pointer_moved(&store, &frame, &view, x, y);
        match tracker.hover_title(&store) {
            Some(title) => println!("Hovering: {}", title),
            None => println!("Nothing under pointer at ({}, {})", x, y),
        }

        tracker.pointer_clicked(&store, &frame, &view, x, y);
        if let Some(text) = tracker.click_info(&store) {
            println!("{}", text);
        }
    }

    Ok(())
}
