use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::{convert::TryFrom, fmt::Debug, sync::Arc};

use crate::{
    Config,
    error::ProviderError,
    model::{Condition, Coordinate, ProviderForecast},
    provider::{
        composite::CompositeTier,
        onecall::{OneCallTier, OneCallVersion},
        openmeteo::OpenMeteoTier,
    },
};

pub mod composite;
pub mod onecall;
pub mod openmeteo;

/// Upstream services the app talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    OpenWeather,
    OpenMeteo,
    Nominatim,
}

impl Vendor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::OpenWeather => "openweather",
            Vendor::OpenMeteo => "open-meteo",
            Vendor::Nominatim => "nominatim",
        }
    }

    pub const fn all() -> &'static [Vendor] {
        &[Vendor::OpenWeather, Vendor::OpenMeteo, Vendor::Nominatim]
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(self, Vendor::OpenWeather)
    }
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Vendor {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" | "owm" => Ok(Vendor::OpenWeather),
            "open-meteo" | "openmeteo" => Ok(Vendor::OpenMeteo),
            "nominatim" => Ok(Vendor::Nominatim),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, open-meteo, nominatim."
            )),
        }
    }
}

/// Forecast sources, in the order the chain tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierId {
    OneCall3,
    OneCall25,
    Composite,
    OpenMeteo,
}

impl TierId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierId::OneCall3 => "onecall-3.0",
            TierId::OneCall25 => "onecall-2.5",
            TierId::Composite => "composite",
            TierId::OpenMeteo => "open-meteo",
        }
    }

    pub const fn all() -> &'static [TierId] {
        &[TierId::OneCall3, TierId::OneCall25, TierId::Composite, TierId::OpenMeteo]
    }

    pub fn vendor(&self) -> Vendor {
        match self {
            TierId::OpenMeteo => Vendor::OpenMeteo,
            _ => Vendor::OpenWeather,
        }
    }
}

impl std::fmt::Display for TierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One source of forecast data, normalized into the shared shape.
#[async_trait]
pub trait ForecastTier: Send + Sync + Debug {
    fn id(&self) -> TierId;

    async fn fetch(&self, coord: Coordinate) -> Result<ProviderForecast, ProviderError>;
}

/// Source of "now", injectable so date bucketing can be tested.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// Construct the four tiers in fallback order.
pub fn tiers_from_config(config: &Config, http: &Client) -> Vec<Box<dyn ForecastTier>> {
    let owm_key = config.provider_api_key(Vendor::OpenWeather).map(str::to_owned);
    let owm_base = config.endpoints.openweather.clone();

    vec![
        Box::new(OneCallTier::new(
            OneCallVersion::V3,
            owm_key.clone(),
            owm_base.clone(),
            http.clone(),
        )),
        Box::new(OneCallTier::new(
            OneCallVersion::V25,
            owm_key.clone(),
            owm_base.clone(),
            http.clone(),
        )),
        Box::new(CompositeTier::new(owm_key, owm_base, http.clone())),
        Box::new(OpenMeteoTier::new(config.endpoints.open_meteo.clone(), http.clone())),
    ]
}

/// OpenWeather's `weather[]` element, shared by every OpenWeather endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OwCondition {
    #[serde(default)]
    icon: String,
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
}

impl From<OwCondition> for Condition {
    fn from(w: OwCondition) -> Self {
        Condition {
            icon: w.icon,
            main: w.main,
            description: w.description,
        }
    }
}

/// First element of an OpenWeather `weather[]` array.
pub(crate) fn first_condition(weather: &[OwCondition]) -> Option<Condition> {
    weather.first().cloned().map(Condition::from)
}

/// The key, or the error every OpenWeather call fails with when there is none.
pub(crate) fn require_key(key: Option<&str>) -> Result<&str, ProviderError> {
    key.ok_or_else(|| ProviderError::MissingApiKey(Vendor::OpenWeather.to_string()))
}
