//! Forecast.io provider.
//!
//! This provider has no city lookup of its own: requests are keyed by
//! latitude/longitude, so callers resolve place names to coordinates through
//! a geocoding service first. One raw payload carries all three sections
//! (`currently`, `hourly.data`, `daily.data`) sharing a single observation
//! schema, and one normalization pass produces all three canonical outputs.

use chrono::{Duration, Utc};
use parking_lot::Mutex;
use tracing::debug;

use crate::{
    error::ProviderError,
    model::{ForecastSeries, NormalizationResult, Observation},
    provider::{ForecastRequest, Operation, WeatherProvider},
    units::{UnitProfile, UnitSystem},
};

mod normalize;

pub use normalize::{TEMPERATURE_CEILING, TEMPERATURE_FLOOR};

const BASE_URL: &str = "https://api.forecast.io/forecast/";

/// How long a normalization result keeps being served without re-parsing.
/// A policy knob, not physics; override with
/// [`ForecastIoProvider::with_staleness_window`].
const DEFAULT_STALENESS_WINDOW_SECS: i64 = 5 * 60;

/// Memoizes the last successful [`NormalizationResult`] and serves it while
/// it is younger than the staleness window.
///
/// The read-check-replace sequence runs under one lock scope, so concurrent
/// callers never both refresh; a lost race costs a wasted parse, never a
/// corrupt result.
#[derive(Debug)]
pub struct FreshnessCache {
    window: Duration,
    slot: Mutex<Option<NormalizationResult>>,
}

impl FreshnessCache {
    pub fn new(window: Duration) -> Self {
        Self { window, slot: Mutex::new(None) }
    }

    /// Return the cached result while it is fresh, otherwise run `refresh`
    /// and replace the slot wholesale with its output.
    ///
    /// A failed refresh leaves the previous value in place and propagates
    /// the error, so callers can always tell "failed this call" from
    /// "served from cache".
    pub fn get_or_refresh<F>(&self, refresh: F) -> Result<NormalizationResult, ProviderError>
    where
        F: FnOnce() -> Result<NormalizationResult, ProviderError>,
    {
        let mut slot = self.slot.lock();

        if let Some(cached) = slot.as_ref() {
            // Elapsed time since the last successful pass. The window is
            // exceeded only once `now - last_updated` grows past it.
            let age = Utc::now() - cached.last_updated;
            if age <= self.window {
                debug!(age_secs = age.num_seconds(), "serving cached normalization result");
                return Ok(cached.clone());
            }
            debug!(age_secs = age.num_seconds(), "cached result is stale, re-normalizing");
        }

        let fresh = refresh()?;
        *slot = Some(fresh.clone());
        Ok(fresh)
    }
}

/// Forecast.io provider: a unit profile plus freshness-gated normalization.
#[derive(Debug)]
pub struct ForecastIoProvider {
    api_key: String,
    system: UnitSystem,
    units: UnitProfile,
    cache: FreshnessCache,
}

impl ForecastIoProvider {
    pub fn new(api_key: String, system: UnitSystem) -> Self {
        Self {
            api_key,
            system,
            units: UnitProfile::for_system(system),
            cache: FreshnessCache::new(Duration::seconds(DEFAULT_STALENESS_WINDOW_SECS)),
        }
    }

    /// Replace the staleness window. Mostly for tests and embedding
    /// applications with their own refresh cadence.
    #[must_use]
    pub fn with_staleness_window(mut self, window: Duration) -> Self {
        self.cache = FreshnessCache::new(window);
        self
    }

    pub fn units(&self) -> &UnitProfile {
        &self.units
    }

    fn result_for(&self, payload: &str) -> Result<NormalizationResult, ProviderError> {
        self.cache.get_or_refresh(|| normalize::normalize(payload, self.units))
    }
}

impl WeatherProvider for ForecastIoProvider {
    fn current_conditions(&self, payload: &str) -> Result<Observation, ProviderError> {
        Ok(self.result_for(payload)?.current)
    }

    fn hourly_forecast(&self, payload: &str) -> Result<ForecastSeries, ProviderError> {
        Ok(self.result_for(payload)?.hourly)
    }

    fn daily_forecast(&self, payload: &str) -> Result<ForecastSeries, ProviderError> {
        Ok(self.result_for(payload)?.daily)
    }

    fn request_url(&self, request: &ForecastRequest) -> Result<String, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::Configuration(
                "An API key is required to build a Forecast.io request URL.".to_string(),
            ));
        }

        let units = match self.system {
            UnitSystem::Metric => "ca",
            UnitSystem::Imperial => "us",
        };

        Ok(format!(
            "{BASE_URL}{}/{},{}?units={units}",
            self.api_key, request.latitude, request.longitude
        ))
    }

    fn supported_operations(&self) -> &'static [Operation] {
        &[Operation::CurrentConditions, Operation::HourlyForecast, Operation::DailyForecast]
    }
}
