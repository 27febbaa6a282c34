use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf, time::Duration};

use crate::{model::Coordinate, provider::Vendor};

/// Environment variable that overrides the OpenWeather key from the config file.
pub const OPENWEATHER_KEY_ENV: &str = "OWM_API_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for a single provider (e.g., API key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Base URLs of every upstream service. Overridable so tests can point at a mock server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub openweather: String,
    pub open_meteo: String,
    pub nominatim: String,
    pub tiles: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            openweather: "https://api.openweathermap.org".to_string(),
            open_meteo: "https://api.open-meteo.com".to_string(),
            nominatim: "https://nominatim.openstreetmap.org".to_string(),
            tiles: "https://tile.openweathermap.org".to_string(),
        }
    }
}

impl Endpoints {
    /// Point every endpoint at the same base URL.
    pub fn all_at(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            openweather: base.clone(),
            open_meteo: base.clone(),
            nominatim: base.clone(),
            tiles: base,
        }
    }
}

/// Home position used by `locate` when the host has no geolocation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HomeConfig {
    pub lat: f64,
    pub lon: f64,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language for country names and geocoder results, e.g. "en" or "th".
    pub locale: String,

    pub http_timeout_secs: u64,

    pub home: Option<HomeConfig>,

    pub endpoints: Endpoints,

    /// Example TOML:
    /// [providers.openweather]
    /// api_key = "..."
    pub providers: HashMap<String, ProviderConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            http_timeout_secs: DEFAULT_TIMEOUT_SECS,
            home: None,
            endpoints: Endpoints::default(),
            providers: HashMap::new(),
        }
    }
}

impl Config {
    /// Load config from disk with environment overrides applied on top.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;
        cfg.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    /// Use this one before `save` so env values never end up in the file.
    pub fn load_file() -> Result<Self> {
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
        let dirs = ProjectDirs::from("dev", "globe-weather", "globe-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply overrides from a variable lookup (the process environment in production).
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(OPENWEATHER_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.set_provider_api_key(Vendor::OpenWeather, key.trim().to_string());
        }
    }

    /// Set or replace a provider API key.
    pub fn set_provider_api_key(&mut self, vendor: Vendor, api_key: String) {
        self.providers.insert(vendor.as_str().to_string(), ProviderConfig { api_key });
    }

    /// Returns API key for a provider, if present.
    pub fn provider_api_key(&self, vendor: Vendor) -> Option<&str> {
        self.providers
            .get(vendor.as_str())
            .map(|cfg| cfg.api_key.as_str())
            .filter(|k| !k.is_empty())
    }

    pub fn is_provider_configured(&self, vendor: Vendor) -> bool {
        !vendor.requires_api_key() || self.provider_api_key(vendor).is_some()
    }

    pub fn home_position(&self) -> Option<Coordinate> {
        self.home.map(|h| Coordinate::new(h.lat, h.lon))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.max(1))
    }

    /// Value for `Accept-Language`, the configured locale with English as fallback.
    pub fn accept_language(&self) -> String {
        let locale = self.locale.trim();
        if locale.is_empty() || locale.eq_ignore_ascii_case("en") {
            "en".to_string()
        } else {
            format!("{locale},en")
        }
    }
}
