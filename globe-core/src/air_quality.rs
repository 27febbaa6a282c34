use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    Config,
    error::ProviderError,
    http::{get_json, lat_lon},
    model::{AirComponents, AirQualityRecord, Coordinate},
    provider::{Vendor, require_key},
};

/// Air quality from OpenWeather's air pollution endpoint. Runs independently of the forecast chain.
#[derive(Debug, Clone)]
pub struct AirQualityFetcher {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct ApMain {
    aqi: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct ApItem {
    main: Option<ApMain>,
    #[serde(default)]
    components: AirComponentsWire,
}

#[derive(Debug, Default, Deserialize)]
struct AirComponentsWire {
    co: Option<f64>,
    no: Option<f64>,
    no2: Option<f64>,
    o3: Option<f64>,
    so2: Option<f64>,
    pm2_5: Option<f64>,
    pm10: Option<f64>,
    nh3: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ApResponse {
    #[serde(default)]
    list: Vec<ApItem>,
}

impl AirQualityFetcher {
    pub fn new(config: &Config, http: Client) -> Self {
        Self {
            api_key: config.provider_api_key(Vendor::OpenWeather).map(str::to_owned),
            base_url: config.endpoints.openweather.clone(),
            http,
        }
    }

    pub async fn fetch(&self, coord: Coordinate) -> Result<AirQualityRecord, ProviderError> {
        let coord = Coordinate::new(coord.latitude, coord.longitude);
        let key = require_key(self.api_key.as_deref())?;

        let parsed: ApResponse = get_json(
            self.http
                .get(format!("{}/data/2.5/air_pollution", self.base_url))
                .query(&lat_lon(coord.latitude, coord.longitude))
                .query(&[("appid", key)]),
            "air pollution",
        )
        .await?;

        let item = parsed
            .list
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::empty("air pollution"))?;
        let aqi = item
            .main
            .and_then(|m| m.aqi)
            .ok_or_else(|| ProviderError::empty("air pollution"))?;

        let c = item.components;
        Ok(AirQualityRecord {
            aqi,
            components: AirComponents {
                co: c.co,
                no: c.no,
                no2: c.no2,
                o3: c.o3,
                so2: c.so2,
                pm2_5: c.pm2_5,
                pm10: c.pm10,
                nh3: c.nh3,
            },
        })
    }
}

/// Display information for an AQI level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AqiInfo {
    pub label_th: &'static str,
    pub label_en: &'static str,
    /// CSS hex color of the badge.
    pub color: &'static str,
}

impl AqiInfo {
    pub fn for_index(aqi: i64) -> Self {
        let (label_th, label_en, color) = match aqi {
            1 => ("ดี", "Good", "#2ecc71"),
            2 => ("พอใช้", "Fair", "#f1c40f"),
            3 => ("ปานกลาง", "Moderate", "#e67e22"),
            4 => ("แย่", "Poor", "#8d5a2b"),
            5 => ("แย่มาก", "Very Poor", "#c0392b"),
            _ => ("ไม่ทราบ", "Unknown", "#7f8c8d"),
        };
        Self { label_th, label_en, color }
    }

    pub fn labels(&self) -> (&'static str, &'static str) {
        (self.label_th, self.label_en)
    }
}

impl AirQualityRecord {
    pub fn info(&self) -> AqiInfo {
        AqiInfo::for_index(i64::from(self.aqi))
    }
}

/// What the AQI panel shows. `Unavailable` is deliberately separate from `Loading`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AirQualityStatus {
    #[default]
    Idle,
    Loading,
    Ready(AirQualityRecord),
    Unavailable(String),
}

impl AirQualityStatus {
    pub fn from_result(result: Result<AirQualityRecord, ProviderError>) -> Self {
        match result {
            Ok(record) => Self::Ready(record),
            Err(e) => {
                tracing::warn!(error = %e, "air quality fetch failed");
                Self::Unavailable(e.to_string())
            }
        }
    }

    pub fn record(&self) -> Option<&AirQualityRecord> {
        match self {
            Self::Ready(record) => Some(record),
            _ => None,
        }
    }
}
