use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::units::UnitProfile;

/// Astronomical data attached to a location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Astronomy {
    /// Moon illumination as reported by the provider, when available.
    pub moon_illumination: Option<String>,
}

/// Where an observation was taken. Sunrise/sunset are epoch seconds and stay
/// unset until a source node carries them; for the current observation they
/// are backfilled from the first daily forecast entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
    pub astronomy: Astronomy,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude, ..Self::default() }
    }
}

/// Sky condition and the atmospheric readings that describe it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Free-text summary from the provider, e.g. "Clear".
    pub description: String,
    /// Provider icon code as-is, e.g. "clear-day".
    pub icon_code: String,
    /// Icon code with day/night suffixes stripped, shared across providers.
    pub normalized_condition: String,
    pub dew_point: f64,
    pub humidity_pct: i32,
    pub visibility: f64,
    pub pressure: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub current: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    pub direction_deg: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Precipitation {
    pub amount: f64,
    pub probability: f64,
}

/// One canonical reading: "now", a single hour, or a single day.
///
/// Numeric fields absent in the source default to `0`, which is
/// indistinguishable from a true zero reading; min/max temperatures use
/// out-of-range sentinels instead so merge logic can tell "no data" apart
/// from a real extreme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub condition: Condition,
    pub temperature: Temperature,
    pub wind: Wind,
    pub precipitation: Precipitation,
    pub cloud_cover_pct: i32,
    pub location: Option<Location>,
    /// Slot time in epoch seconds; set only for series entries.
    pub timestamp: Option<i64>,
}

/// One slot of an hourly or daily series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: i64,
    pub observation: Observation,
}

/// Ordered forecast slots, exactly the cardinality and order of the source
/// array. No sorting or deduplication is performed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub entries: Vec<ForecastEntry>,
    pub units: UnitProfile,
}

impl ForecastSeries {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&ForecastEntry> {
        self.entries.first()
    }
}

/// Product of one normalization pass. Immutable once returned; a newer pass
/// replaces it wholesale, never field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationResult {
    pub current: Observation,
    pub hourly: ForecastSeries,
    pub daily: ForecastSeries,
    pub units: UnitProfile,
    pub last_updated: DateTime<Utc>,
}
