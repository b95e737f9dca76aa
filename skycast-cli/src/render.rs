//! Human-friendly output formatting for canonical weather values.

use chrono::DateTime;

use skycast_core::model::{ForecastEntry, ForecastSeries, Observation};
use skycast_core::provider::forecastio::{TEMPERATURE_CEILING, TEMPERATURE_FLOOR};
use skycast_core::units::UnitProfile;

pub fn print_current(observation: &Observation, units: &UnitProfile) {
    println!("{}", current_summary(observation, units));
    println!(
        "wind {:.1} {} at {:.0}°, humidity {}%, pressure {:.1} {}",
        observation.wind.speed,
        units.speed,
        observation.wind.direction_deg,
        observation.condition.humidity_pct,
        observation.condition.pressure,
        units.pressure,
    );

    if let Some(location) = &observation.location {
        if let (Some(sunrise), Some(sunset)) = (location.sunrise, location.sunset) {
            println!("sunrise {}, sunset {}", format_timestamp(sunrise), format_timestamp(sunset));
        }
    }
}

pub fn print_series(title: &str, series: &ForecastSeries) {
    println!("{title}:");
    for entry in &series.entries {
        println!("  {}", entry_line(entry, &series.units));
    }
}

/// One-line current summary. Min/max are shown only when a real value is
/// present; the out-of-range defaults mean "no data supplied" and are
/// suppressed.
fn current_summary(observation: &Observation, units: &UnitProfile) -> String {
    let t = &observation.temperature;
    let mut line =
        format!("{} {:.1}{}", observation.condition.description, t.current, units.temperature);

    if t.min > TEMPERATURE_FLOOR {
        line.push_str(&format!(", low {:.1}{}", t.min, units.temperature));
    }
    if t.max < TEMPERATURE_CEILING {
        line.push_str(&format!(", high {:.1}{}", t.max, units.temperature));
    }

    line
}

fn entry_line(entry: &ForecastEntry, units: &UnitProfile) -> String {
    let observation = &entry.observation;
    let t = &observation.temperature;
    let mut line =
        format!("{}  {}", format_timestamp(entry.timestamp), observation.condition.description);

    if t.min > TEMPERATURE_FLOOR && t.max < TEMPERATURE_CEILING {
        line.push_str(&format!("  {:.1}{u} / {:.1}{u}", t.min, t.max, u = units.temperature));
    } else {
        line.push_str(&format!("  {:.1}{}", t.current, units.temperature));
    }

    line
}

fn format_timestamp(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| format!("@{ts}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::model::{Condition, Temperature};
    use skycast_core::units::UnitSystem;

    fn metric() -> UnitProfile {
        UnitProfile::for_system(UnitSystem::Metric)
    }

    fn observation(description: &str, temperature: Temperature) -> Observation {
        Observation {
            condition: Condition { description: description.to_string(), ..Condition::default() },
            temperature,
            ..Observation::default()
        }
    }

    #[test]
    fn format_timestamp_renders_utc() {
        assert_eq!(format_timestamp(1000), "1970-01-01 00:16");
    }

    #[test]
    fn current_summary_suppresses_missing_extremes() {
        let observation = observation(
            "Clear",
            Temperature { current: 18.0, min: TEMPERATURE_FLOOR, max: TEMPERATURE_CEILING },
        );

        assert_eq!(current_summary(&observation, &metric()), "Clear 18.0°C");
    }

    #[test]
    fn current_summary_shows_real_extremes() {
        let observation =
            observation("Clear", Temperature { current: 18.0, min: 10.0, max: 20.0 });

        assert_eq!(
            current_summary(&observation, &metric()),
            "Clear 18.0°C, low 10.0°C, high 20.0°C"
        );
    }

    #[test]
    fn entry_line_prefers_min_max_when_present() {
        let observation = observation("Rain", Temperature { current: 0.0, min: 7.9, max: 18.0 });

        let entry = ForecastEntry { timestamp: 0, observation };
        let line = entry_line(&entry, &metric());

        assert!(line.contains("Rain"));
        assert!(line.contains("7.9°C / 18.0°C"));
    }
}
