use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PositionError;

pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, PositionError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(PositionError::InvalidCoordinate(format!(
                "non-finite coordinate ({latitude}, {longitude})"
            )));
        }
        if latitude < LATITUDE_RANGE.0 || latitude > LATITUDE_RANGE.1 {
            return Err(PositionError::InvalidCoordinate(format!(
                "latitude {latitude} outside [-90, 90]"
            )));
        }
        if longitude < LONGITUDE_RANGE.0 || longitude > LONGITUDE_RANGE.1 {
            return Err(PositionError::InvalidCoordinate(format!(
                "longitude {longitude} outside [-180, 180]"
            )));
        }
        // -0.0 compares equal to 0.0 but would display as "-0".
        Ok(Self {
            latitude: latitude + 0.0,
            longitude: longitude + 0.0,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = PositionError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

/// Renders degrees the way a browser stringifies numbers: shortest
/// round-trip digits, exponent notation below 1e-6.
pub fn format_degrees(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.abs() < 1e-6 {
        format!("{value:e}")
    } else {
        value.to_string()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}",
            format_degrees(self.latitude),
            format_degrees(self.longitude)
        )
    }
}

/// A single fix reported by a location provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub coordinate: Coordinate,
    pub accuracy_m: Option<f64>,
    pub captured_at: DateTime<Utc>,
    pub source: String,
}

impl Position {
    pub fn now(coordinate: Coordinate, source: impl Into<String>) -> Self {
        Self {
            coordinate,
            accuracy_m: None,
            captured_at: Utc::now(),
            source: source.into(),
        }
    }

    pub fn with_accuracy(mut self, accuracy_m: f64) -> Self {
        self.accuracy_m = Some(accuracy_m);
        self
    }
}
