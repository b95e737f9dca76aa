use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

use crate::error::ProviderError;

/// Unit system selected in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Metric, UnitSystem::Imperial]
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = ProviderError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(ProviderError::Configuration(format!(
                "Unknown unit system '{value}'. Supported unit systems: metric, imperial."
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedUnit {
    KilometersPerHour,
    MilesPerHour,
}

impl std::fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SpeedUnit::KilometersPerHour => "km/h",
            SpeedUnit::MilesPerHour => "mph",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    Hectopascal,
    InchesOfMercury,
}

impl std::fmt::Display for PressureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PressureUnit::Hectopascal => "hPa",
            PressureUnit::InchesOfMercury => "inHg",
        })
    }
}

/// Unit metadata shared by every observation produced in one normalization
/// pass. The profile never converts values: source readings are assumed to
/// already be in the provider's native units for the selected system, and
/// the profile is carried for downstream display logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitProfile {
    pub temperature: TemperatureUnit,
    pub speed: SpeedUnit,
    pub pressure: PressureUnit,
}

impl UnitProfile {
    /// Derive the profile for a unit system. Pure and deterministic.
    pub fn for_system(system: UnitSystem) -> Self {
        match system {
            UnitSystem::Metric => Self {
                temperature: TemperatureUnit::Celsius,
                speed: SpeedUnit::KilometersPerHour,
                pressure: PressureUnit::Hectopascal,
            },
            UnitSystem::Imperial => Self {
                temperature: TemperatureUnit::Fahrenheit,
                speed: SpeedUnit::MilesPerHour,
                pressure: PressureUnit::InchesOfMercury,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_system_as_str_roundtrip() {
        for system in UnitSystem::all() {
            let parsed = UnitSystem::try_from(system.as_str()).expect("roundtrip should succeed");
            assert_eq!(*system, parsed);
        }
    }

    #[test]
    fn unit_system_parse_is_case_insensitive() {
        assert_eq!(UnitSystem::try_from("Metric").unwrap(), UnitSystem::Metric);
        assert_eq!(UnitSystem::try_from("IMPERIAL").unwrap(), UnitSystem::Imperial);
    }

    #[test]
    fn unknown_unit_system_error() {
        let err = UnitSystem::try_from("kelvin").unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(_)));
        assert!(err.to_string().contains("Unknown unit system"));
    }

    #[test]
    fn metric_profile() {
        let profile = UnitProfile::for_system(UnitSystem::Metric);
        assert_eq!(profile.temperature, TemperatureUnit::Celsius);
        assert_eq!(profile.speed, SpeedUnit::KilometersPerHour);
        assert_eq!(profile.pressure, PressureUnit::Hectopascal);
    }

    #[test]
    fn imperial_profile() {
        let profile = UnitProfile::for_system(UnitSystem::Imperial);
        assert_eq!(profile.temperature, TemperatureUnit::Fahrenheit);
        assert_eq!(profile.speed, SpeedUnit::MilesPerHour);
        assert_eq!(profile.pressure, PressureUnit::InchesOfMercury);
    }

    #[test]
    fn profile_derivation_is_deterministic() {
        assert_eq!(
            UnitProfile::for_system(UnitSystem::Metric),
            UnitProfile::for_system(UnitSystem::Metric)
        );
    }
}
