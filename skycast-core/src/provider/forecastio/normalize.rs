//! Normalization of raw Forecast.io payloads into the canonical model.
//!
//! The three payload sections share one observation schema, so a single
//! field extractor serves "now", hourly slots and daily slots alike. Field
//! names vary per node (a `currently` node has no `temperatureMin`, an
//! hourly node no `sunriseTime`), which is why nodes are walked dynamically
//! instead of deserialized into a fixed struct: every leaf is optional and
//! falls back to a named default.

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::{
    error::ProviderError,
    model::{ForecastEntry, ForecastSeries, Location, NormalizationResult, Observation},
    units::UnitProfile,
};

/// Upper bound on accepted payload size. Oversized payloads are rejected
/// before JSON parsing so a hostile input cannot force excessive iteration.
pub(crate) const MAX_PAYLOAD_BYTES: usize = 1 << 20;

/// Sentinel for an absent minimum temperature: absolute zero in Celsius,
/// below any physically possible reading.
pub const TEMPERATURE_FLOOR: f64 = -273.15;

/// Sentinel for an absent maximum temperature: the melting point of
/// aluminium in Celsius, above any plausible reading.
pub const TEMPERATURE_CEILING: f64 = 660.3;

fn opt_f64(node: &Value, key: &str) -> Option<f64> {
    node.get(key).and_then(Value::as_f64)
}

fn opt_f64_or(node: &Value, key: &str, default: f64) -> f64 {
    opt_f64(node, key).unwrap_or(default)
}

fn opt_i64(node: &Value, key: &str) -> Option<i64> {
    node.get(key).and_then(Value::as_i64)
}

fn opt_string(node: &Value, key: &str) -> String {
    match node.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Present-and-non-null fields rendered to text, e.g. a numeric `moonPhase`.
fn opt_display(node: &Value, key: &str) -> Option<String> {
    match node.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    }
}

/// Fractional 0..=1 source value as an integer percentage. Scaled before
/// rounding so 0.525 keeps its resolution and becomes 53.
fn percent(node: &Value, key: &str) -> i32 {
    (opt_f64_or(node, key, 0.0) * 100.0).round() as i32
}

/// Strip day/night suffixes from an icon code to get a provider-neutral
/// condition token: "clear-day" -> "clear ", "partly-cloudy-night" ->
/// "partly-cloudy", "fog" -> "fog".
fn normalize_condition(icon: &str) -> String {
    icon.replace("-day", " ").replace("-night", "")
}

/// Read one raw observation node into `seed`.
///
/// Fails only when `node` is not a JSON object; missing individual fields
/// are never errors and fall back to `0` for generic numerics or to the
/// min/max temperature sentinels.
pub(crate) fn extract_observation(
    node: &Value,
    mut seed: Observation,
) -> Result<Observation, ProviderError> {
    if !node.is_object() {
        return Err(ProviderError::malformed(
            "observation",
            format!("expected a JSON object, got: {node}"),
        ));
    }

    seed.condition.description = opt_string(node, "summary");
    let icon = opt_string(node, "icon");
    seed.condition.normalized_condition = normalize_condition(&icon);
    seed.condition.icon_code = icon;

    seed.precipitation.amount = opt_f64_or(node, "precipIntensity", 0.0);
    seed.precipitation.probability = opt_f64_or(node, "precipProbability", 0.0);

    seed.temperature.current = opt_f64_or(node, "temperature", 0.0);
    seed.temperature.min = opt_f64_or(node, "temperatureMin", TEMPERATURE_FLOOR);
    seed.temperature.max = opt_f64_or(node, "temperatureMax", TEMPERATURE_CEILING);

    seed.condition.dew_point = opt_f64_or(node, "dewPoint", 0.0);
    seed.wind.speed = opt_f64_or(node, "windSpeed", 0.0);
    seed.wind.direction_deg = opt_f64_or(node, "windBearing", 0.0);

    seed.cloud_cover_pct = percent(node, "cloudCover");
    seed.condition.humidity_pct = percent(node, "humidity");
    seed.condition.visibility = opt_f64_or(node, "visibility", 0.0);
    seed.condition.pressure = opt_f64_or(node, "pressure", 0.0);

    let sunrise = opt_i64(node, "sunriseTime");
    let sunset = opt_i64(node, "sunsetTime");
    let moon = opt_display(node, "moonPhase");
    if sunrise.is_some() || sunset.is_some() || moon.is_some() {
        let location = seed.location.get_or_insert_with(Location::default);
        location.sunrise = sunrise.or(location.sunrise);
        location.sunset = sunset.or(location.sunset);
        if moon.is_some() {
            location.astronomy.moon_illumination = moon;
        }
    }

    Ok(seed)
}

/// Build a forecast series from a raw array, preserving its cardinality and
/// order exactly. A slot with no `time` gets timestamp `0`.
pub(crate) fn assemble_series(
    nodes: &[Value],
    units: UnitProfile,
) -> Result<ForecastSeries, ProviderError> {
    let mut entries = Vec::with_capacity(nodes.len());

    for node in nodes {
        let mut observation = extract_observation(node, Observation::default())?;
        let timestamp = opt_i64(node, "time").unwrap_or(0);
        observation.timestamp = Some(timestamp);
        entries.push(ForecastEntry { timestamp, observation });
    }

    Ok(ForecastSeries { entries, units })
}

/// The `currently` section has no sunrise/sunset and no min/max temperature,
/// so day 0 of the daily series supplies them: sunrise/sunset are copied
/// into the current location, and min/max replace the current sentinels only
/// when they tighten the range. A rejected comparison is logged, never an
/// error.
fn backfill_from_first_day(day0: &Value, current: &mut Observation) {
    let location = current.location.get_or_insert_with(Location::default);
    location.sunrise = opt_i64(day0, "sunriseTime");
    location.sunset = opt_i64(day0, "sunsetTime");

    let day0_min = opt_f64_or(day0, "temperatureMin", TEMPERATURE_FLOOR);
    if day0_min > current.temperature.min {
        current.temperature.min = day0_min;
    } else {
        debug!(
            day0_min,
            current_min = current.temperature.min,
            "day-0 minimum does not tighten the range, keeping current value"
        );
    }

    let day0_max = opt_f64_or(day0, "temperatureMax", TEMPERATURE_CEILING);
    if day0_max < current.temperature.max {
        current.temperature.max = day0_max;
    } else {
        debug!(
            day0_max,
            current_max = current.temperature.max,
            "day-0 maximum does not tighten the range, keeping current value"
        );
    }
}

fn section_array<'a>(
    root: &'a Value,
    section: &'static str,
) -> Result<&'a [Value], ProviderError> {
    let block = root
        .get(section)
        .ok_or_else(|| ProviderError::malformed(section, "section is missing"))?;

    block
        .get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| ProviderError::malformed(section, "`data` must be an array"))
}

/// One normalization pass: raw payload text in, all three canonical outputs
/// out. Any failure aborts the whole pass; partial results never escape.
pub(crate) fn normalize(
    payload: &str,
    units: UnitProfile,
) -> Result<NormalizationResult, ProviderError> {
    if payload.len() > MAX_PAYLOAD_BYTES {
        return Err(ProviderError::malformed(
            "payload",
            format!("{} bytes exceeds the {MAX_PAYLOAD_BYTES} byte limit", payload.len()),
        ));
    }

    let root: Value = serde_json::from_str(payload)
        .map_err(|e| ProviderError::malformed("payload", e.to_string()))?;

    let latitude = opt_f64(&root, "latitude")
        .ok_or_else(|| ProviderError::malformed("latitude", "missing or not a number"))?;
    let longitude = opt_f64(&root, "longitude")
        .ok_or_else(|| ProviderError::malformed("longitude", "missing or not a number"))?;

    let currently = root
        .get("currently")
        .ok_or_else(|| ProviderError::malformed("currently", "section is missing"))?;
    if !currently.is_object() {
        return Err(ProviderError::malformed("currently", "expected a JSON object"));
    }

    let seed = Observation {
        location: Some(Location::new(latitude, longitude)),
        ..Observation::default()
    };
    let mut current = extract_observation(currently, seed)?;

    let hourly = assemble_series(section_array(&root, "hourly")?, units)?;

    let daily_nodes = section_array(&root, "daily")?;
    let daily = assemble_series(daily_nodes, units)?;
    if let Some(day0) = daily_nodes.first() {
        backfill_from_first_day(day0, &mut current);
    }

    Ok(NormalizationResult { current, hourly, daily, units, last_updated: Utc::now() })
}
