//! Terminal rendering of session state.

use chrono::DateTime;
use globe_core::{
    AirQualityStatus, CameraMove, Coordinate, ForecastStatus, Session, WeatherSnapshot,
};

/// Days listed under "Next days".
const OUTLOOK_DAYS: usize = 5;

pub fn forecast_json(session: &Session) -> serde_json::Value {
    match session.forecast_status() {
        ForecastStatus::Ready(record) => serde_json::json!({
            "location": record.location_label(),
            "city": record.city_label(),
            "record": record,
        }),
        ForecastStatus::Loading | ForecastStatus::NoData => serde_json::Value::Null,
    }
}

fn describe_weather(w: &WeatherSnapshot) -> String {
    let sky = w
        .condition
        .as_ref()
        .map(|c| c.description.as_str())
        .unwrap_or("n/a");
    format!("{:.1}°C (feels like {:.1}°C), {sky}", w.temperature, w.feels_like)
}

fn day_name(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%a %d %b").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

pub fn print_forecast(session: &Session, position: Coordinate) {
    let record = match session.forecast_status() {
        ForecastStatus::Ready(record) => record,
        ForecastStatus::Loading => {
            println!("Loading forecast for {position}...");
            return;
        }
        ForecastStatus::NoData => {
            println!("No weather data available for {position}.");
            return;
        }
    };

    println!("{}", record.location_label());
    if let Some(city) = record.city_label() {
        println!("  {city}");
    }
    println!("  {position} ({})", record.timezone_label);
    println!();
    println!("Now: {}", describe_weather(&record.current));

    let upcoming = record.upcoming(OUTLOOK_DAYS);
    if !upcoming.is_empty() {
        println!();
        println!("Next days:");
        for day in upcoming {
            let sky = day.condition.as_ref().map(|c| c.main.as_str()).unwrap_or("-");
            println!(
                "  {:<11} {:>5.1}° / {:>5.1}°  {sky}",
                day_name(day.timestamp),
                day.temp_max,
                day.temp_min
            );
        }
    }
}

pub fn print_air_quality(status: &AirQualityStatus) {
    println!();
    match status {
        AirQualityStatus::Ready(record) => {
            let info = record.info();
            println!("Air quality: {} {} ({}) [AQI {}]", info.label_en, info.label_th, info.color, record.aqi);
            let c = &record.components;
            let parts: Vec<String> = [("PM2.5", c.pm2_5), ("PM10", c.pm10), ("O3", c.o3), ("NO2", c.no2)]
                .into_iter()
                .filter_map(|(name, v)| v.map(|v| format!("{name} {v:.1}")))
                .collect();
            if !parts.is_empty() {
                println!("  {} μg/m³", parts.join(", "));
            }
        }
        AirQualityStatus::Unavailable(reason) => println!("Air quality: unavailable ({reason})"),
        AirQualityStatus::Loading => println!("Air quality: loading..."),
        AirQualityStatus::Idle => {}
    }
}

pub fn describe_camera(camera: &CameraMove) -> String {
    match camera {
        CameraMove::FlyTo { center, zoom } => format!("fly to {center} at zoom {zoom}"),
        CameraMove::PanTo { center } => format!("pan to {center}"),
        CameraMove::FitBounds { bounds, max_zoom, padding_px } => format!(
            "fit S{:.2} W{:.2} N{:.2} E{:.2} (max zoom {max_zoom}, padding {padding_px}px)",
            bounds.south, bounds.west, bounds.north, bounds.east
        ),
    }
}
