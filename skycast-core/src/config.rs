use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf};

use crate::{error::ProviderError, provider::ProviderId, units::UnitSystem};

/// Configuration for a single provider (e.g., API key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional default provider id, e.g. "forecastio".
    pub default_provider: Option<String>,

    /// Unit system selector, "metric" or "imperial". Absent means metric.
    pub unit_system: Option<String>,

    /// Example TOML:
    /// [providers.forecastio]
    /// api_key = "..."
    pub providers: HashMap<String, ProviderConfig>,
}

impl Config {
    /// Return the default provider as a strongly-typed ProviderId.
    pub fn default_provider_id(&self) -> Result<ProviderId, ProviderError> {
        let s = self.default_provider.as_ref().ok_or_else(|| {
            ProviderError::Configuration(
                "No default provider configured.\n\
                 Hint: run `skycast configure <provider>` (e.g. `skycast configure forecastio`) first."
                    .to_string(),
            )
        })?;

        ProviderId::try_from(s.as_str())
    }

    /// Parse the configured unit system selector. Absent means metric;
    /// an unrecognized value is a configuration error, surfaced before any
    /// payload is touched.
    pub fn unit_system(&self) -> Result<UnitSystem, ProviderError> {
        match self.unit_system.as_deref() {
            Some(selector) => UnitSystem::try_from(selector),
            None => Ok(UnitSystem::Metric),
        }
    }

    /// Store the unit system selector as string.
    pub fn set_unit_system(&mut self, system: UnitSystem) {
        self.unit_system = Some(system.as_str().to_string());
    }

    pub fn has_provider(&self, id: ProviderId) -> bool {
        self.providers.contains_key(id.as_str())
    }

    pub fn provider_config(&self, id: ProviderId) -> Option<&ProviderConfig> {
        self.providers.get(id.as_str())
    }

    /// Store default provider as string.
    pub fn set_default_provider(&mut self, id: ProviderId) {
        self.default_provider = Some(id.as_str().to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Convenience helper: set/replace a provider API key and optionally set default provider.
    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        self.providers.insert(provider_id.as_str().to_string(), ProviderConfig { api_key });

        if self.default_provider.is_none() {
            self.default_provider = Some(provider_id.to_string());
        }
    }

    /// Returns API key for a provider, if present.
    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<&str> {
        self.providers.get(provider_id.as_str()).map(|cfg| cfg.api_key.as_str())
    }

    pub fn is_provider_configured(&self, provider_id: ProviderId) -> bool {
        self.provider_api_key(provider_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderId;

    #[test]
    fn default_provider_id_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.default_provider_id().unwrap_err();

        assert!(err.to_string().contains("No default provider configured"));
    }

    #[test]
    fn set_api_key_and_default_for_provider() {
        let mut cfg = Config::default();

        cfg.upsert_provider_api_key(ProviderId::ForecastIo, "FIO_KEY".into());

        let default = cfg.default_provider_id().expect("default provider must exist");
        assert_eq!(default, ProviderId::ForecastIo);

        let key = cfg.provider_api_key(ProviderId::ForecastIo);
        assert_eq!(key, Some("FIO_KEY"));
        assert!(cfg.is_provider_configured(ProviderId::ForecastIo));
    }

    #[test]
    fn unit_system_defaults_to_metric() {
        let cfg = Config::default();
        assert_eq!(cfg.unit_system().unwrap(), UnitSystem::Metric);
    }

    #[test]
    fn unit_system_roundtrips_through_setter() {
        let mut cfg = Config::default();
        cfg.set_unit_system(UnitSystem::Imperial);
        assert_eq!(cfg.unit_system().unwrap(), UnitSystem::Imperial);
    }

    #[test]
    fn unknown_unit_system_is_a_configuration_error() {
        let cfg = Config { unit_system: Some("kelvin".to_string()), ..Config::default() };
        let err = cfg.unit_system().unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(_)));
    }

    #[test]
    fn unit_system_survives_toml_roundtrip() {
        let mut cfg = Config::default();
        cfg.set_unit_system(UnitSystem::Imperial);
        cfg.upsert_provider_api_key(ProviderId::ForecastIo, "FIO_KEY".into());

        let toml = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&toml).expect("parse");

        assert_eq!(parsed.unit_system().unwrap(), UnitSystem::Imperial);
        assert!(parsed.is_provider_configured(ProviderId::ForecastIo));
    }

    #[test]
    fn set_default_provider_overrides_default() {
        let mut cfg = Config::default();

        cfg.upsert_provider_api_key(ProviderId::ForecastIo, "FIO_KEY".into());
        cfg.set_default_provider(ProviderId::ForecastIo);

        let default = cfg.default_provider_id().expect("default provider must exist");
        assert_eq!(default, ProviderId::ForecastIo);
    }
}
