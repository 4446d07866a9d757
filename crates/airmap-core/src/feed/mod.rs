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

//! Feed layer for OpenFlights data files.
//!
//! Parses the headerless CSV formats of `airports.dat` and `routes.dat`
//! into plain records for the store. Parsing is lenient at the record
//! level: a malformed row (unparsable numeric field, missing required
//! field, OpenFlights `\N` null in a required position) is skipped with a
//! warning and the rest of the feed still loads. Only I/O-level failures
//! surface to the caller.
//!
//! Row formats:
//! ```text
//! airports.dat: id,name,city,country,IATA,ICAO,lat,lon,altitude,...
//! routes.dat:   airline,airline_id,src,src_id,dst,dst_id,codeshare,...
//! ```

use std::io::Read;

use log::{info, warn};
use thiserror::Error;

use crate::store::PointId;

/// OpenFlights encodes missing values as `\N`.
const NULL_FIELD: &str = "\\N";

/// Errors for a single feed record.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid value for field '{field}': {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// A parsed airport row.
#[derive(Debug, Clone)]
pub struct AirportRecord {
    /// OpenFlights airport id.
    pub id: PointId,
    pub name: String,
    pub city: String,
    pub country: String,
    /// IATA code where present, ICAO otherwise; may be empty.
    pub code: String,
    /// Field elevation, kept as the feed's opaque string.
    pub altitude: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// A parsed route row: the two endpoint airport ids.
#[derive(Debug, Clone, Copy)]
pub struct RouteRecord {
    pub source_id: PointId,
    pub dest_id: PointId,
}

/// Fetch a field by index, treating absence and `\N` as missing.
fn field<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    name: &'static str,
) -> Result<&'r str, ParseError> {
    match record.get(index).map(str::trim) {
        Some(value) if !value.is_empty() && value != NULL_FIELD => Ok(value),
        _ => Err(ParseError::MissingField(name)),
    }
}

fn numeric_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &'static str,
) -> Result<T, ParseError> {
    let raw = field(record, index, name)?;
    raw.parse::<T>().map_err(|_| ParseError::InvalidValue {
        field: name,
        value: raw.to_string(),
    })
}

fn parse_airport_record(record: &csv::StringRecord) -> Result<AirportRecord, ParseError> {
    let id: PointId = numeric_field(record, 0, "id")?;
    let name = field(record, 1, "name")?.to_string();
    let city = field(record, 2, "city").unwrap_or_default().to_string();
    let country = field(record, 3, "country").unwrap_or_default().to_string();

    // Prefer the IATA code; fall back to ICAO when IATA is null
    let code = field(record, 4, "iata")
        .or_else(|_| field(record, 5, "icao"))
        .unwrap_or_default()
        .to_string();

    let latitude: f64 = numeric_field(record, 6, "latitude")?;
    let longitude: f64 = numeric_field(record, 7, "longitude")?;
    let altitude = field(record, 8, "altitude").unwrap_or_default().to_string();

    Ok(AirportRecord {
        id,
        name,
        city,
        country,
        code,
        altitude,
        latitude,
        longitude,
    })
}

fn parse_route_record(record: &csv::StringRecord) -> Result<RouteRecord, ParseError> {
    let source_id: PointId = numeric_field(record, 3, "source id")?;
    let dest_id: PointId = numeric_field(record, 5, "destination id")?;
    Ok(RouteRecord { source_id, dest_id })
}

fn reader_for<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source)
}

/// Parse an `airports.dat` feed.
///
/// Malformed rows are skipped, never fatal. Returns the successfully
/// parsed records; the skip count is logged.
pub fn parse_airports<R: Read>(source: R) -> Result<Vec<AirportRecord>, csv::Error> {
    let mut reader = reader_for(source);
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e),
            Err(e) => {
                skipped += 1;
                warn!("Skipping unreadable airport record: {}", e);
                continue;
            }
        };
        match parse_airport_record(&record) {
            Ok(airport) => records.push(airport),
            Err(e) => {
                skipped += 1;
                warn!("Skipping airport record: {}", e);
            }
        }
    }

    info!("Loaded {} airports ({} skipped)", records.len(), skipped);
    Ok(records)
}

/// Parse a `routes.dat` feed.
///
/// Rows whose endpoint ids are null or unparsable are skipped; rows whose
/// ids parse but reference airports absent from the store are kept — the
/// store marks those edges permanently unroutable.
pub fn parse_routes<R: Read>(source: R) -> Result<Vec<RouteRecord>, csv::Error> {
    let mut reader = reader_for(source);
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e),
            Err(e) => {
                skipped += 1;
                warn!("Skipping unreadable route record: {}", e);
                continue;
            }
        };
        match parse_route_record(&record) {
            Ok(route) => records.push(route),
            Err(e) => {
                skipped += 1;
                warn!("Skipping route record: {}", e);
            }
        }
    }

    info!("Loaded {} routes ({} skipped)", records.len(), skipped);
    Ok(records)
}
