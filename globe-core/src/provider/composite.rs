//! Last OpenWeather resort: current weather plus the free 3-hour forecast,
//! folded into daily buckets locally.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::{
    error::ProviderError,
    http::{get_json, lat_lon},
    model::{Condition, Coordinate, DailyOutlook, ProviderForecast, WeatherSnapshot},
    provider::{Clock, ForecastTier, OwCondition, TierId, first_condition, require_key, system_clock},
};

#[derive(Clone)]
pub struct CompositeTier {
    api_key: Option<String>,
    base_url: String,
    http: Client,
    clock: Clock,
}

impl std::fmt::Debug for CompositeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeTier")
            .field("base_url", &self.base_url)
            .field("has_key", &self.api_key.is_some())
            .finish()
    }
}

impl CompositeTier {
    pub fn new(api_key: Option<String>, base_url: String, http: Client) -> Self {
        Self { api_key, base_url, http, clock: system_clock() }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

/// One fixed-interval forecast step.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSlot {
    pub timestamp: i64,
    pub temperature: Option<f64>,
    pub condition: Option<Condition>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    dt: Option<i64>,
    name: Option<String>,
    main: Option<OwMain>,
    #[serde(default)]
    weather: Vec<OwCondition>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: Option<OwMain>,
    #[serde(default)]
    weather: Vec<OwCondition>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    list: Vec<OwForecastEntry>,
    city: Option<OwCity>,
}

fn utc_date(ts: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}

fn midnight_epoch(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0).map(|ndt| ndt.and_utc().timestamp()).unwrap_or_default()
}

/// Group slots by UTC calendar date, ascending.
///
/// Max/min come from the numeric temperatures of the day; the condition is
/// taken from the slot at index `n / 2` in arrival order. A day without any
/// numeric temperature uses that representative slot's temperature for both,
/// or 0 when it has none either.
pub fn aggregate_daily(slots: &[ForecastSlot]) -> BTreeMap<NaiveDate, DailyOutlook> {
    let mut groups: BTreeMap<NaiveDate, Vec<&ForecastSlot>> = BTreeMap::new();
    for slot in slots {
        if let Some(date) = utc_date(slot.timestamp) {
            groups.entry(date).or_default().push(slot);
        }
    }

    groups
        .into_iter()
        .map(|(date, items)| {
            let representative = items[items.len() / 2];
            let temps = items.iter().filter_map(|s| s.temperature).filter(|t| t.is_finite());

            let (min, max) = temps.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
                (lo.min(t), hi.max(t))
            });
            let (temp_min, temp_max) = if min.is_finite() && max.is_finite() {
                (min, max)
            } else {
                let t = representative.temperature.unwrap_or(0.0);
                (t, t)
            };

            let outlook = DailyOutlook {
                timestamp: midnight_epoch(date),
                temp_max,
                temp_min,
                condition: representative.condition.clone(),
            };
            (date, outlook)
        })
        .collect()
}

/// Bucket the slots and make sure today has an entry, synthesizing it from
/// current conditions when the forecast starts tomorrow.
pub fn build_daily(
    current: &WeatherSnapshot,
    current_dt: Option<i64>,
    slots: &[ForecastSlot],
    now: DateTime<Utc>,
) -> Vec<DailyOutlook> {
    let mut buckets = aggregate_daily(slots);
    let today = now.date_naive();

    buckets.entry(today).or_insert_with(|| DailyOutlook {
        timestamp: current_dt.unwrap_or_else(|| now.timestamp()),
        temp_max: current.temperature,
        temp_min: current.temperature,
        condition: current.condition.clone(),
    });

    buckets.into_values().collect()
}

/// `City/<name>` label in the same shape as an IANA zone name.
fn city_timezone_label(name: &str) -> String {
    format!("City/{}", name.split_whitespace().collect::<Vec<_>>().join("_"))
}

fn non_empty(name: Option<String>) -> Option<String> {
    name.filter(|n| !n.trim().is_empty())
}

#[async_trait]
impl ForecastTier for CompositeTier {
    fn id(&self) -> TierId {
        TierId::Composite
    }

    async fn fetch(&self, coord: Coordinate) -> Result<ProviderForecast, ProviderError> {
        let key = require_key(self.api_key.as_deref())?;
        let query = lat_lon(coord.latitude, coord.longitude);
        let extra = [("units", "metric"), ("appid", key)];

        tracing::debug!(tier = "composite", %coord, "requesting current weather and 3-hour forecast");

        let current_req = self
            .http
            .get(format!("{}/data/2.5/weather", self.base_url))
            .query(&query)
            .query(&extra);
        let forecast_req = self
            .http
            .get(format!("{}/data/2.5/forecast", self.base_url))
            .query(&query)
            .query(&extra);

        let (current, forecast): (OwCurrentResponse, OwForecastResponse) = tokio::try_join!(
            get_json(current_req, "composite current weather"),
            get_json(forecast_req, "composite 3-hour forecast"),
        )?;

        let main = current.main.as_ref();
        let temperature = main
            .and_then(|m| m.temp)
            .ok_or_else(|| ProviderError::empty("composite current weather"))?;

        let snapshot = WeatherSnapshot {
            temperature,
            feels_like: main.and_then(|m| m.feels_like).unwrap_or(temperature),
            condition: first_condition(&current.weather),
        };

        let slots: Vec<ForecastSlot> = forecast
            .list
            .iter()
            .map(|e| ForecastSlot {
                timestamp: e.dt,
                temperature: e.main.as_ref().and_then(|m| m.temp),
                condition: first_condition(&e.weather),
            })
            .collect();

        let daily = build_daily(&snapshot, current.dt, &slots, (self.clock)());

        let city = non_empty(forecast.city.and_then(|c| c.name))
            .or_else(|| non_empty(current.name))
            .unwrap_or_else(|| "Location".to_string());

        Ok(ProviderForecast {
            current: snapshot,
            daily,
            timezone_label: city_timezone_label(&city),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const DAY: i64 = 1_718_409_600; // 2024-06-15T00:00:00Z

    fn cond(main: &str) -> Option<Condition> {
        Some(Condition::new("01d", main, main))
    }

    fn day_slots(start: i64, temps: &[f64]) -> Vec<ForecastSlot> {
        temps
            .iter()
            .enumerate()
            .map(|(i, t)| ForecastSlot {
                timestamp: start + i as i64 * 3 * 3600,
                temperature: Some(*t),
                condition: cond(&format!("slot-{i}")),
            })
            .collect()
    }

    #[test]
    fn one_day_bucket_takes_extremes_and_positional_median() {
        let slots = day_slots(DAY, &[10.0, 12.0, 15.0, 18.0, 20.0, 17.0, 14.0, 11.0]);
        let buckets = aggregate_daily(&slots);

        assert_eq!(buckets.len(), 1);
        let day = buckets.values().next().expect("one bucket");
        assert_eq!(day.temp_max, 20.0);
        assert_eq!(day.temp_min, 10.0);
        assert_eq!(day.condition, cond("slot-4"));
        assert_eq!(day.timestamp, DAY);
    }

    #[test]
    fn slots_split_on_utc_midnight() {
        let mut slots = day_slots(DAY + 18 * 3600, &[20.0, 22.0]);
        slots.extend(day_slots(DAY + 86_400, &[5.0, 7.0, 9.0]));
        let buckets: Vec<DailyOutlook> = aggregate_daily(&slots).into_values().collect();

        assert_eq!(buckets.len(), 2);
        assert_eq!((buckets[0].temp_min, buckets[0].temp_max), (20.0, 22.0));
        assert_eq!((buckets[1].temp_min, buckets[1].temp_max), (5.0, 9.0));
        assert!(buckets[0].timestamp < buckets[1].timestamp);
    }

    #[test]
    fn day_without_temperatures_uses_representative_or_zero() {
        let slots = vec![
            ForecastSlot { timestamp: DAY, temperature: None, condition: cond("a") },
            ForecastSlot { timestamp: DAY + 3600, temperature: None, condition: cond("b") },
        ];
        let day = aggregate_daily(&slots).into_values().next().expect("bucket");
        assert_eq!((day.temp_min, day.temp_max), (0.0, 0.0));
        assert_eq!(day.condition, cond("b"));
    }

    #[test]
    fn today_is_synthesized_when_forecast_starts_tomorrow() {
        let now = Utc.timestamp_opt(DAY + 22 * 3600, 0).single().expect("valid time");
        let current = WeatherSnapshot { temperature: 27.5, feels_like: 30.0, condition: cond("Clear") };
        let slots = day_slots(DAY + 86_400, &[24.0, 26.0]);

        let daily = build_daily(&current, Some(DAY + 21 * 3600), &slots, now);

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].timestamp, DAY + 21 * 3600);
        assert_eq!((daily[0].temp_min, daily[0].temp_max), (27.5, 27.5));
        assert_eq!(daily[0].condition, cond("Clear"));
        assert_eq!(daily[1].temp_max, 26.0);
    }

    #[test]
    fn existing_today_bucket_is_kept() {
        let now = Utc.timestamp_opt(DAY + 3600, 0).single().expect("valid time");
        let current = WeatherSnapshot { temperature: 99.0, feels_like: 99.0, condition: None };
        let slots = day_slots(DAY, &[10.0, 14.0]);

        let daily = build_daily(&current, None, &slots, now);

        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].temp_max, 14.0);
    }

    #[test]
    fn city_label_replaces_whitespace() {
        assert_eq!(city_timezone_label("Ho Chi  Minh City"), "City/Ho_Chi_Minh_City");
    }
}
