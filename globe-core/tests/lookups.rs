//! Integration tests for geocoding, search and air quality against a mock server.

use globe_core::{
    AirQualityFetcher, Config, Coordinate, Endpoints, Level, PlaceResolver, ProviderError,
    SearchError, Searcher, Vendor,
};
use reqwest::Client;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, key: Option<&str>) -> Config {
    let mut cfg = Config::default();
    cfg.endpoints = Endpoints::all_at(&server.uri());
    if let Some(key) = key {
        cfg.set_provider_api_key(Vendor::OpenWeather, key.to_string());
    }
    cfg
}

#[tokio::test]
async fn structured_reverse_maps_country_code_to_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .and(query_param("limit", "1"))
        .and(query_param("appid", "KEY"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{ "name": "Paris", "country": "FR" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let cfg = config_for(&server, Some("KEY"));
    let place = PlaceResolver::new(&cfg, Client::new())
        .resolve(Coordinate::new(48.8566, 2.3522))
        .await;

    assert_eq!(place.city_name.as_deref(), Some("Paris"));
    assert_eq!(place.country_code.as_deref(), Some("FR"));
    assert_eq!(place.country_name.as_deref(), Some("France"));
}

#[tokio::test]
async fn nominatim_widens_zoom_until_an_address_appears() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("zoom", "16"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "error": "Unable to geocode" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("zoom", "14"))
        .and(query_param("format", "jsonv2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "address": { "town": "Hua Hin", "state": "Prachuap Khiri Khan", "country": "Thailand", "country_code": "th" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("zoom", "12"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let cfg = config_for(&server, Some("KEY"));
    let place = PlaceResolver::new(&cfg, Client::new())
        .resolve(Coordinate::new(12.57, 99.96))
        .await;

    assert_eq!(place.city_name.as_deref(), Some("Hua Hin"));
    assert_eq!(place.country_code.as_deref(), Some("TH"));
    assert_eq!(place.country_name.as_deref(), Some("Thailand"));
}

#[tokio::test]
async fn thai_locale_is_sent_to_nominatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(header("accept-language", "th,en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "address": { "city": "กรุงเทพมหานคร", "country": "ประเทศไทย", "country_code": "th" }
        })))
        .mount(&server)
        .await;

    let mut cfg = config_for(&server, None);
    cfg.locale = "th".into();
    let place = PlaceResolver::new(&cfg, Client::new())
        .resolve(Coordinate::new(13.7563, 100.5018))
        .await;

    assert_eq!(place.country_name.as_deref(), Some("ประเทศไทย"));
}

#[tokio::test]
async fn every_geocoder_failing_gives_an_empty_place() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(503))
        .expect(4)
        .mount(&server)
        .await;

    let cfg = config_for(&server, Some("KEY"));
    let place = PlaceResolver::new(&cfg, Client::new())
        .resolve(Coordinate::new(0.0, -150.0))
        .await;

    assert!(place.is_empty());
}

#[tokio::test]
async fn air_quality_reads_first_entry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/air_pollution"))
        .and(query_param("appid", "KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "coord": { "lon": 100.5, "lat": 13.75 },
            "list": [{
                "dt": 1_718_409_600,
                "main": { "aqi": 3 },
                "components": { "co": 400.5, "no2": 12.1, "o3": 60.0, "pm2_5": 35.2, "pm10": 48.0 }
            }]
        })))
        .mount(&server)
        .await;

    let cfg = config_for(&server, Some("KEY"));
    let record = AirQualityFetcher::new(&cfg, Client::new())
        .fetch(Coordinate::new(13.75, 100.5))
        .await
        .expect("air quality");

    assert_eq!(record.aqi, 3);
    assert_eq!(record.components.pm2_5, Some(35.2));
    assert_eq!(record.components.so2, None);
    assert_eq!(record.info().label_en, "Moderate");
}

#[tokio::test]
async fn air_quality_empty_list_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/air_pollution"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "list": [] })))
        .mount(&server)
        .await;

    let cfg = config_for(&server, Some("KEY"));
    let err = AirQualityFetcher::new(&cfg, Client::new())
        .fetch(Coordinate::new(0.0, 0.0))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::EmptyResult(_)));
}

#[tokio::test]
async fn air_quality_http_error_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/air_pollution"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let cfg = config_for(&server, Some("KEY"));
    let err = AirQualityFetcher::new(&cfg, Client::new())
        .fetch(Coordinate::new(0.0, 0.0))
        .await
        .unwrap_err();

    match err {
        ProviderError::Network { status, .. } => assert_eq!(status.map(|s| s.as_u16()), Some(429)),
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn search_country_hit_carries_bounds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Thailand"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "lat": "14.8971921",
            "lon": "100.83273",
            "type": "administrative",
            "boundingbox": ["5.612851", "20.4648337", "97.3436", "105.636812"],
            "display_name": "Thailand"
        }])))
        .mount(&server)
        .await;

    let cfg = config_for(&server, Some("KEY"));
    let hit = Searcher::new(&cfg, Client::new())
        .search("  Thailand ")
        .await
        .expect("hit");

    assert_eq!(hit.level, Level::Country);
    let bounds = hit.bounds.expect("bounds");
    assert_eq!(bounds.south, 5.612851);
    assert_eq!(bounds.east, 105.636812);
    assert_eq!(hit.display_name.as_deref(), Some("Thailand"));
}

#[tokio::test]
async fn search_falls_back_to_openweather_direct() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Chiang Mai"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "name": "Chiang Mai", "lat": 18.7883, "lon": 98.9853, "country": "TH" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = config_for(&server, Some("KEY"));
    let hit = Searcher::new(&cfg, Client::new())
        .search("Chiang Mai")
        .await
        .expect("hit");

    assert_eq!(hit.level, Level::Place);
    assert_eq!(hit.position, Coordinate::new(18.7883, 98.9853));
    assert_eq!(hit.display_name.as_deref(), Some("Chiang Mai, TH"));
}

#[tokio::test]
async fn search_with_no_results_anywhere_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let cfg = config_for(&server, Some("KEY"));
    let err = Searcher::new(&cfg, Client::new())
        .search("Atlantis")
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::NotFound(q) if q == "Atlantis"));
}
