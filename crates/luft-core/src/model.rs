use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pollutant kinds present in the measurement dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "O3")]
    O3,
    #[serde(rename = "PM10")]
    Pm10,
    #[serde(rename = "PM2.5")]
    Pm25,
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "NO")]
    No,
    #[serde(rename = "CO")]
    Co,
}

impl Pollutant {
    pub const ALL: [Pollutant; 7] = [
        Pollutant::No2,
        Pollutant::O3,
        Pollutant::Pm10,
        Pollutant::Pm25,
        Pollutant::So2,
        Pollutant::No,
        Pollutant::Co,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pollutant::No2 => "NO2",
            Pollutant::O3 => "O3",
            Pollutant::Pm10 => "PM10",
            Pollutant::Pm25 => "PM2.5",
            Pollutant::So2 => "SO2",
            Pollutant::No => "NO",
            Pollutant::Co => "CO",
        }
    }

    /// Parse a pollutant code from a dataset cell.
    ///
    /// Tolerates case variations and a decimal comma ("pm2,5").
    pub fn from_str_loose(s: &str) -> Option<Pollutant> {
        let code = s.trim().to_uppercase().replace(',', ".");
        match code.as_str() {
            "NO2" => Some(Pollutant::No2),
            "O3" => Some(Pollutant::O3),
            "PM10" => Some(Pollutant::Pm10),
            "PM2.5" | "PM25" => Some(Pollutant::Pm25),
            "SO2" => Some(Pollutant::So2),
            "NO" => Some(Pollutant::No),
            "CO" => Some(Pollutant::Co),
            _ => None,
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Severity level of a reading or observation.
///
/// The derived ordering is the severity ordering (`Good < Moderate < High`),
/// so "worst of" reductions are `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Good,
    Moderate,
    High,
}

impl Level {
    /// Levels that carry an upper concentration bound, in ascending
    /// severity order. The worst level is the residual band.
    pub const BANDED: [Level; 2] = [Level::Good, Level::Moderate];

    pub const WORST: Level = Level::High;

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Good => "Good",
            Level::Moderate => "Moderate",
            Level::High => "High",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Station position in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Build validated coordinates. Returns None outside +-90 / +-180.
    pub fn new(latitude: f64, longitude: f64) -> Option<Coordinates> {
        if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
            Some(Coordinates {
                latitude,
                longitude,
            })
        } else {
            None
        }
    }
}

/// One measured concentration at one station and time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollutantReading {
    pub pollutant: Pollutant,
    /// Concentration in ug/m3.
    pub concentration: Decimal,
    /// Station identifier from the dataset's Location column.
    pub station: String,
    /// Normalized city name, when the dataset carries a usable one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub coordinates: Coordinates,
}

/// All readings captured at one station at one timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub station: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub coordinates: Coordinates,
    pub readings: Vec<PollutantReading>,
}
