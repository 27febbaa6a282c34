use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::ProviderError,
    http::{get_json, lat_lon},
    model::{Coordinate, DailyOutlook, ProviderForecast, WeatherSnapshot},
    provider::{ForecastTier, OwCondition, TierId, first_condition, require_key},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneCallVersion {
    V3,
    /// Legacy API, same call shape.
    V25,
}

impl OneCallVersion {
    fn path(&self) -> &'static str {
        match self {
            OneCallVersion::V3 => "/data/3.0/onecall",
            OneCallVersion::V25 => "/data/2.5/onecall",
        }
    }
}

/// OpenWeather One Call: current and daily in a single request.
#[derive(Debug, Clone)]
pub struct OneCallTier {
    version: OneCallVersion,
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl OneCallTier {
    pub fn new(
        version: OneCallVersion,
        api_key: Option<String>,
        base_url: String,
        http: Client,
    ) -> Self {
        Self { version, api_key, base_url, http }
    }
}

#[derive(Debug, Deserialize)]
struct OcCurrent {
    temp: f64,
    feels_like: Option<f64>,
    #[serde(default)]
    weather: Vec<OwCondition>,
}

#[derive(Debug, Deserialize)]
struct OcDailyTemp {
    max: f64,
    min: f64,
}

#[derive(Debug, Deserialize)]
struct OcDaily {
    dt: i64,
    temp: OcDailyTemp,
    #[serde(default)]
    weather: Vec<OwCondition>,
}

#[derive(Debug, Deserialize)]
struct OcResponse {
    timezone: Option<String>,
    current: Option<OcCurrent>,
    #[serde(default)]
    daily: Vec<OcDaily>,
}

impl OcResponse {
    fn normalize(self, what: &str) -> Result<ProviderForecast, ProviderError> {
        let current = self.current.ok_or_else(|| ProviderError::empty(what))?;
        if self.daily.is_empty() {
            return Err(ProviderError::empty(what));
        }

        let daily = self
            .daily
            .into_iter()
            .map(|d| DailyOutlook {
                timestamp: d.dt,
                temp_max: d.temp.max,
                temp_min: d.temp.min,
                condition: first_condition(&d.weather),
            })
            .collect();

        Ok(ProviderForecast {
            current: WeatherSnapshot {
                temperature: current.temp,
                feels_like: current.feels_like.unwrap_or(current.temp),
                condition: first_condition(&current.weather),
            },
            daily,
            timezone_label: self.timezone.unwrap_or_else(|| "Location/Unknown".to_string()),
        })
    }
}

#[async_trait]
impl ForecastTier for OneCallTier {
    fn id(&self) -> TierId {
        match self.version {
            OneCallVersion::V3 => TierId::OneCall3,
            OneCallVersion::V25 => TierId::OneCall25,
        }
    }

    async fn fetch(&self, coord: Coordinate) -> Result<ProviderForecast, ProviderError> {
        let what = self.id().as_str();
        let key = require_key(self.api_key.as_deref())?;
        let url = format!("{}{}", self.base_url, self.version.path());

        tracing::debug!(tier = what, %coord, "requesting one call forecast");

        let parsed: OcResponse = get_json(
            self.http
                .get(url)
                .query(&lat_lon(coord.latitude, coord.longitude))
                .query(&[
                    ("units", "metric"),
                    ("exclude", "minutely,hourly,alerts"),
                    ("appid", key),
                ]),
            what,
        )
        .await?;

        parsed.normalize(what)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_native_shape() {
        let body = serde_json::json!({
            "timezone": "Asia/Bangkok",
            "current": {
                "temp": 31.2,
                "feels_like": 36.0,
                "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}]
            },
            "daily": [
                {"dt": 1_700_000_000, "temp": {"min": 25.0, "max": 33.5, "day": 31.0},
                 "weather": [{"main": "Rain", "description": "light rain", "icon": "10d"}]},
                {"dt": 1_700_086_400, "temp": {"min": 24.0, "max": 32.0}, "weather": []}
            ]
        });
        let parsed: OcResponse = serde_json::from_value(body).expect("valid one call body");
        let forecast = parsed.normalize("onecall-3.0").expect("normalizes");

        assert_eq!(forecast.timezone_label, "Asia/Bangkok");
        assert_eq!(forecast.current.temperature, 31.2);
        assert_eq!(forecast.current.feels_like, 36.0);
        assert_eq!(forecast.current.condition.as_ref().map(|c| c.icon.as_str()), Some("03d"));
        assert_eq!(forecast.daily.len(), 2);
        assert_eq!(forecast.daily[0].temp_max, 33.5);
        assert_eq!(forecast.daily[0].condition.as_ref().map(|c| c.main.as_str()), Some("Rain"));
        assert!(forecast.daily[1].condition.is_none());
    }

    #[test]
    fn missing_current_is_an_empty_result() {
        let parsed: OcResponse =
            serde_json::from_value(serde_json::json!({"timezone": "UTC", "daily": []}))
                .expect("valid body");
        let err = parsed.normalize("onecall-2.5").unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResult(_)));
    }

    #[tokio::test]
    async fn fails_fast_without_api_key() {
        let tier = OneCallTier::new(
            OneCallVersion::V3,
            None,
            "http://127.0.0.1:9".to_string(),
            Client::new(),
        );
        let err = tier.fetch(Coordinate::new(0.0, 0.0)).await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingApiKey(_)));
    }
}
