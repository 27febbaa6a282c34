use serde::{Deserialize, Serialize};

use crate::coord;

/// A normalized position on the globe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, clamping latitude and wrapping longitude.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        coord::normalize(latitude, longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Weather condition in OpenWeather's `{icon, main, description}` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub icon: String,
    pub main: String,
    pub description: String,
}

impl Condition {
    pub fn new(icon: &str, main: &str, description: &str) -> Self {
        Self {
            icon: icon.to_string(),
            main: main.to_string(),
            description: description.to_string(),
        }
    }

    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub feels_like: f64,
    pub condition: Option<Condition>,
}

/// One calendar day of outlook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyOutlook {
    /// Epoch seconds.
    pub timestamp: i64,
    pub temp_max: f64,
    pub temp_min: f64,
    pub condition: Option<Condition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceInfo {
    pub city_name: Option<String>,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
}

impl PlaceInfo {
    pub fn is_empty(&self) -> bool {
        self.city_name.is_none() && self.country_code.is_none() && self.country_name.is_none()
    }
}

/// What a single forecast tier produces before the place is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderForecast {
    pub current: WeatherSnapshot,
    pub daily: Vec<DailyOutlook>,
    pub timezone_label: String,
}

impl ProviderForecast {
    pub fn into_record(self, place: Option<PlaceInfo>) -> ForecastRecord {
        ForecastRecord {
            current: self.current,
            daily: self.daily,
            timezone_label: self.timezone_label,
            place,
        }
    }
}

/// The merged record handed to the view layer. Replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub current: WeatherSnapshot,
    pub daily: Vec<DailyOutlook>,
    pub timezone_label: String,
    pub place: Option<PlaceInfo>,
}

impl ForecastRecord {
    /// Heading for the forecast panel: the country name when known, else a
    /// name derived from the timezone label (`Asia/Ho_Chi_Minh` -> `Ho Chi Minh`).
    pub fn location_label(&self) -> String {
        if let Some(country) = self.place.as_ref().and_then(|p| p.country_name.as_deref()) {
            return country.to_string();
        }
        self.timezone_label
            .split('/')
            .nth(1)
            .filter(|s| !s.is_empty())
            .map(|s| s.replace('_', " "))
            .unwrap_or_else(|| "Current Location".to_string())
    }

    pub fn city_label(&self) -> Option<&str> {
        self.place.as_ref().and_then(|p| p.city_name.as_deref())
    }

    /// Days after today, as shown in the outlook list.
    pub fn upcoming(&self, days: usize) -> &[DailyOutlook] {
        let start = self.daily.len().min(1);
        let end = self.daily.len().min(start + days);
        &self.daily[start..end]
    }
}

/// Pollutant concentrations in μg/m³.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirComponents {
    pub co: Option<f64>,
    pub no: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub so2: Option<f64>,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    pub nh3: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityRecord {
    /// OpenWeather air quality index, 1 (good) to 5 (very poor).
    pub aqi: u8,
    pub components: AirComponents,
}
