pub mod city;
pub mod values;

use crate::error::LuftError;
use crate::model::{Coordinates, Pollutant, PollutantReading};
use chrono::{DateTime, NaiveDateTime, Utc};
use city::{is_valid_city, normalize_city};
use serde::{Deserialize, Serialize};
use std::path::Path;
use values::{in_plausible_range, parse_concentration};

const COL_CITY: &str = "City";
const COL_LOCATION: &str = "Location";
const COL_COORDINATES: &str = "Coordinates";
const COL_POLLUTANT: &str = "Pollutant";
const COL_VALUE: &str = "Value";
const COL_LAST_UPDATED: &str = "Last Updated";

/// Parsed dataset plus the rows that were filtered out, counted by cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub readings: Vec<PollutantReading>,
    pub skipped: SkipCounts,
}

/// Rows dropped during parsing, by cause. Dropping is per row and never
/// aborts the load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipCounts {
    /// Pollutant cell not one of the seven measured kinds.
    pub unknown_pollutant: usize,
    /// Empty or unparseable value cell.
    pub missing_value: usize,
    /// Negative value or sensor spike.
    pub out_of_range: usize,
    pub bad_coordinates: usize,
    pub bad_timestamp: usize,
    /// City cell is a monitoring-network code.
    pub invalid_city: usize,
}

impl SkipCounts {
    pub fn total(&self) -> usize {
        self.unknown_pollutant
            + self.missing_value
            + self.out_of_range
            + self.bad_coordinates
            + self.bad_timestamp
            + self.invalid_city
    }
}

/// Load a measurement CSV export from disk.
pub fn load_dataset(path: &Path) -> Result<Dataset, LuftError> {
    let bytes = std::fs::read(path).map_err(|e| LuftError::DatasetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_dataset(&bytes)
}

/// Parse a measurement CSV export.
///
/// The delimiter is sniffed from the header line (the source export is
/// semicolon-separated; comma works too). Rows failing the dataset's
/// plausibility filters are counted and dropped, never aborting the load.
pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset, LuftError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(bytes))
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let columns = Columns::locate(&headers)?;

    let mut readings = Vec::new();
    let mut skipped = SkipCounts::default();

    for record in reader.records() {
        let record = record?;
        match parse_row(&record, &columns) {
            Ok(reading) => readings.push(reading),
            Err(cause) => cause.count(&mut skipped),
        }
    }

    Ok(Dataset { readings, skipped })
}

struct Columns {
    city: usize,
    location: usize,
    coordinates: usize,
    pollutant: usize,
    value: usize,
    last_updated: usize,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Columns, LuftError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| LuftError::ParseError(format!("missing column '{}'", name)))
        };
        Ok(Columns {
            city: find(COL_CITY)?,
            location: find(COL_LOCATION)?,
            coordinates: find(COL_COORDINATES)?,
            pollutant: find(COL_POLLUTANT)?,
            value: find(COL_VALUE)?,
            last_updated: find(COL_LAST_UPDATED)?,
        })
    }
}

enum SkipCause {
    UnknownPollutant,
    MissingValue,
    OutOfRange,
    BadCoordinates,
    BadTimestamp,
    InvalidCity,
}

impl SkipCause {
    fn count(self, counts: &mut SkipCounts) {
        match self {
            SkipCause::UnknownPollutant => counts.unknown_pollutant += 1,
            SkipCause::MissingValue => counts.missing_value += 1,
            SkipCause::OutOfRange => counts.out_of_range += 1,
            SkipCause::BadCoordinates => counts.bad_coordinates += 1,
            SkipCause::BadTimestamp => counts.bad_timestamp += 1,
            SkipCause::InvalidCity => counts.invalid_city += 1,
        }
    }
}

fn parse_row(record: &csv::StringRecord, columns: &Columns) -> Result<PollutantReading, SkipCause> {
    let cell = |i: usize| record.get(i).unwrap_or("").trim();

    let pollutant =
        Pollutant::from_str_loose(cell(columns.pollutant)).ok_or(SkipCause::UnknownPollutant)?;

    let concentration = match parse_concentration(cell(columns.value)) {
        Ok(Some(v)) => v,
        _ => return Err(SkipCause::MissingValue),
    };
    if !in_plausible_range(concentration) {
        return Err(SkipCause::OutOfRange);
    }

    let coordinates =
        parse_coordinates(cell(columns.coordinates)).ok_or(SkipCause::BadCoordinates)?;
    let timestamp = parse_timestamp(cell(columns.last_updated)).ok_or(SkipCause::BadTimestamp)?;

    let station = cell(columns.location);
    // The export leaves the city blank for some stations; fall back to the
    // station name, as the source dashboard does.
    let raw_city = cell(columns.city);
    let city_source = if raw_city.is_empty() { station } else { raw_city };
    if !is_valid_city(city_source) {
        return Err(SkipCause::InvalidCity);
    }

    Ok(PollutantReading {
        pollutant,
        concentration,
        station: station.to_string(),
        city: Some(normalize_city(city_source)),
        timestamp,
        coordinates,
    })
}

/// Parse a "48.8566, 2.3522" coordinate cell into validated coordinates.
fn parse_coordinates(s: &str) -> Option<Coordinates> {
    let (lat, lon) = s.split_once(',')?;
    let latitude = lat.trim().parse::<f64>().ok()?;
    let longitude = lon.trim().parse::<f64>().ok()?;
    Coordinates::new(latitude, longitude)
}

/// Parse a "Last Updated" cell: RFC 3339 first, then the space-separated
/// variant, then a naive datetime assumed UTC.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    None
}

fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes.split(|&b| b == b'\n').next().unwrap_or(&[]);
    if first_line.contains(&b';') {
        b';'
    } else {
        b','
    }
}
