use crate::{
    Config,
    error::ProviderError,
    model::{ForecastSeries, Location, Observation},
    provider::forecastio::ForecastIoProvider,
};
use std::{convert::TryFrom, fmt::Debug};

pub mod forecastio;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    ForecastIo,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::ForecastIo => "forecastio",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::ForecastIo]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = ProviderError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "forecastio" => Ok(ProviderId::ForecastIo),
            _ => Err(ProviderError::Configuration(format!(
                "Unknown provider '{value}'. Supported providers: forecastio."
            ))),
        }
    }
}

/// Operations a provider variant may implement. Variants that lack one
/// report it here and fail calls with [`ProviderError::Unsupported`] rather
/// than silently returning nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CurrentConditions,
    HourlyForecast,
    DailyForecast,
    CitySearch,
    HistoricalRange,
}

/// A forecast request keyed by coordinates. Providers without a city lookup
/// report [`Operation::CitySearch`] as unsupported; callers resolve names to
/// coordinates through a geocoding service first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRequest {
    pub latitude: f64,
    pub longitude: f64,
}

/// Abstraction over weather providers.
///
/// The accessors take an already-fetched raw payload and normalize it into
/// the canonical model; repeat calls within the provider's staleness window
/// are served from its freshness cache without re-parsing. Fetching the
/// payload itself is the transport layer's job (see [`crate::fetch`]),
/// driven by [`WeatherProvider::request_url`].
pub trait WeatherProvider: Send + Sync + Debug {
    /// Normalize `payload` and return the current conditions.
    fn current_conditions(&self, payload: &str) -> Result<Observation, ProviderError>;

    /// Normalize `payload` and return the hourly forecast series.
    fn hourly_forecast(&self, payload: &str) -> Result<ForecastSeries, ProviderError>;

    /// Normalize `payload` and return the daily forecast series.
    fn daily_forecast(&self, payload: &str) -> Result<ForecastSeries, ProviderError>;

    /// URL the transport layer should fetch for `request`.
    fn request_url(&self, request: &ForecastRequest) -> Result<String, ProviderError>;

    fn city_search(&self, _query: &str) -> Result<Vec<Location>, ProviderError> {
        Err(ProviderError::Unsupported("city search"))
    }

    fn historical_range(
        &self,
        _request: &ForecastRequest,
        _start: i64,
        _end: i64,
    ) -> Result<ForecastSeries, ProviderError> {
        Err(ProviderError::Unsupported("historical range"))
    }

    fn supported_operations(&self) -> &'static [Operation];

    fn supports(&self, operation: Operation) -> bool {
        self.supported_operations().contains(&operation)
    }
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> Result<Box<dyn WeatherProvider>, ProviderError> {
    let api_key = config.provider_api_key(id).ok_or_else(|| {
        ProviderError::Configuration(format!(
            "No API key configured for provider '{id}'.\n\
                 Hint: run `skycast configure {id}` and enter your API key."
        ))
    })?;

    let unit_system = config.unit_system()?;

    let boxed: Box<dyn WeatherProvider> = match id {
        ProviderId::ForecastIo => {
            Box::new(ForecastIoProvider::new(api_key.to_owned(), unit_system))
        }
    };

    Ok(boxed)
}

/// Construct the default provider from config, using `default_provider` field.
pub fn default_provider_from_config(
    config: &Config,
) -> Result<Box<dyn WeatherProvider>, ProviderError> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config)
}
