use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::ProviderError,
    http::get_json,
    model::{Condition, Coordinate, DailyOutlook, ProviderForecast, WeatherSnapshot},
    provider::{ForecastTier, TierId},
};

/// Independent provider, no API key. Used when every OpenWeather tier failed.
#[derive(Debug, Clone)]
pub struct OpenMeteoTier {
    base_url: String,
    http: Client,
}

impl OpenMeteoTier {
    pub fn new(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }
}

/// Map a WMO weather code onto OpenWeather's icon/main/description shape.
/// See: https://open-meteo.com/en/docs#weathervariables
pub fn condition_for_code(code: Option<i64>) -> Condition {
    let (icon, main, description) = match code {
        Some(0) => ("01d", "Clear", "Clear sky"),
        Some(1) => ("02d", "Mainly Clear", "Mainly clear"),
        Some(2) => ("03d", "Partly Cloudy", "Partly cloudy"),
        Some(3) => ("04d", "Overcast", "Overcast"),
        Some(45 | 48) => ("50d", "Fog", "Fog"),
        Some(51..=57) => ("09d", "Drizzle", "Drizzle"),
        Some(61..=67 | 80..=82) => ("10d", "Rain", "Rain"),
        Some(71..=77 | 85..=86) => ("13d", "Snow", "Snow"),
        Some(95..=99) => ("11d", "Thunderstorm", "Thunderstorm"),
        _ => ("01d", "Clear", "Clear"),
    };
    Condition::new(icon, main, description)
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: Option<f64>,
    weather_code: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct OmDaily {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    weather_code: Vec<Option<i64>>,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    timezone: Option<String>,
    current: Option<OmCurrent>,
    daily: Option<OmDaily>,
}

impl OmResponse {
    fn normalize(self) -> Result<ProviderForecast, ProviderError> {
        let what = TierId::OpenMeteo.as_str();
        let current = self.current.ok_or_else(|| ProviderError::empty(what))?;
        let temperature = current.temperature_2m.ok_or_else(|| ProviderError::empty(what))?;

        let daily_src = self.daily.unwrap_or_default();
        let daily: Vec<DailyOutlook> = daily_src
            .time
            .iter()
            .enumerate()
            .filter_map(|(i, day)| {
                let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;
                let temp_max = daily_src.temperature_2m_max.get(i).copied().flatten()?;
                let temp_min = daily_src.temperature_2m_min.get(i).copied().flatten()?;
                let code = daily_src.weather_code.get(i).copied().flatten();
                Some(DailyOutlook {
                    timestamp: date.and_hms_opt(0, 0, 0)?.and_utc().timestamp(),
                    temp_max,
                    temp_min,
                    condition: Some(condition_for_code(code)),
                })
            })
            .collect();

        if daily.is_empty() {
            return Err(ProviderError::empty(what));
        }

        Ok(ProviderForecast {
            current: WeatherSnapshot {
                temperature,
                feels_like: temperature,
                condition: Some(condition_for_code(current.weather_code)),
            },
            daily,
            timezone_label: self
                .timezone
                .filter(|tz| !tz.is_empty())
                .unwrap_or_else(|| "Location/Unknown".to_string()),
        })
    }
}

#[async_trait]
impl ForecastTier for OpenMeteoTier {
    fn id(&self) -> TierId {
        TierId::OpenMeteo
    }

    async fn fetch(&self, coord: Coordinate) -> Result<ProviderForecast, ProviderError> {
        tracing::debug!(tier = "open-meteo", %coord, "requesting forecast");

        let parsed: OmResponse = get_json(
            self.http
                .get(format!("{}/v1/forecast", self.base_url))
                .query(&[
                    ("latitude", coord.latitude.to_string()),
                    ("longitude", coord.longitude.to_string()),
                ])
                .query(&[
                    ("current", "temperature_2m,weather_code"),
                    ("daily", "weather_code,temperature_2m_max,temperature_2m_min"),
                    ("timezone", "auto"),
                ]),
            TierId::OpenMeteo.as_str(),
        )
        .await?;

        parsed.normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn main_for(code: i64) -> String {
        condition_for_code(Some(code)).main
    }

    #[test]
    fn exact_codes() {
        assert_eq!(main_for(0), "Clear");
        assert_eq!(main_for(1), "Mainly Clear");
        assert_eq!(main_for(2), "Partly Cloudy");
        assert_eq!(main_for(3), "Overcast");
        assert_eq!(main_for(45), "Fog");
        assert_eq!(main_for(48), "Fog");
        assert_eq!(condition_for_code(Some(48)).icon, "50d");
    }

    #[test]
    fn code_ranges() {
        for code in 51..=57 {
            assert_eq!(main_for(code), "Drizzle", "code {code}");
        }
        for code in (61..=67).chain(80..=82) {
            assert_eq!(main_for(code), "Rain", "code {code}");
        }
        for code in (71..=77).chain(85..=86) {
            assert_eq!(main_for(code), "Snow", "code {code}");
        }
        for code in 95..=99 {
            assert_eq!(main_for(code), "Thunderstorm", "code {code}");
        }
    }

    #[test]
    fn unknown_codes_default_to_clear() {
        for code in [4, 44, 58, 68, 83, 90, 100, -1] {
            assert_eq!(main_for(code), "Clear", "code {code}");
        }
        let none = condition_for_code(None);
        assert_eq!(none.icon, "01d");
        assert_eq!(none.description, "Clear");
    }

    #[test]
    fn normalizes_daily_arrays() {
        let body = serde_json::json!({
            "timezone": "Asia/Bangkok",
            "current": {"temperature_2m": 29.4, "weather_code": 63},
            "daily": {
                "time": ["2024-06-15", "2024-06-16", "2024-06-17"],
                "temperature_2m_max": [33.1, null, 31.0],
                "temperature_2m_min": [25.2, 24.0, 24.5],
                "weather_code": [95, 2, null]
            }
        });
        let parsed: OmResponse = serde_json::from_value(body).expect("valid body");
        let forecast = parsed.normalize().expect("normalizes");

        assert_eq!(forecast.current.temperature, 29.4);
        assert_eq!(forecast.current.feels_like, 29.4);
        assert_eq!(forecast.current.condition.as_ref().map(|c| c.main.as_str()), Some("Rain"));
        assert_eq!(forecast.daily.len(), 2);
        assert_eq!(forecast.daily[0].timestamp, 1_718_409_600);
        assert_eq!(forecast.daily[0].condition.as_ref().map(|c| c.icon.as_str()), Some("11d"));
        assert_eq!(forecast.daily[1].condition.as_ref().map(|c| c.main.as_str()), Some("Clear"));
        assert_eq!(forecast.timezone_label, "Asia/Bangkok");
    }

    #[test]
    fn missing_timezone_gets_placeholder() {
        let body = serde_json::json!({
            "current": {"temperature_2m": 10.0},
            "daily": {"time": ["2024-01-01"], "temperature_2m_max": [12.0], "temperature_2m_min": [8.0]}
        });
        let parsed: OmResponse = serde_json::from_value(body).expect("valid body");
        assert_eq!(parsed.normalize().expect("normalizes").timezone_label, "Location/Unknown");
    }
}
