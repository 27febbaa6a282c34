//! Forward search: free text to a position plus a zoom hint.

use reqwest::{Client, header::ACCEPT_LANGUAGE};
use serde::{Deserialize, Serialize};

use crate::{
    Config,
    error::{ProviderError, SearchError},
    http::get_json,
    model::Coordinate,
    provider::Vendor,
    view::{Bounds, Level},
};

/// Result types Nominatim uses for administrative areas large enough to fit by bounds.
const LARGE_ADMIN_TYPES: [&str; 4] = ["country", "state", "province", "region"];

/// Span in degrees above which a hit is treated as a country-sized area.
const LARGE_AREA_SPAN_DEG: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub position: Coordinate,
    pub level: Level,
    pub bounds: Option<Bounds>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Searcher {
    api_key: Option<String>,
    openweather_url: String,
    nominatim_url: String,
    accept_language: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct NominatimHit {
    lat: String,
    lon: String,
    #[serde(default)]
    boundingbox: Vec<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwDirectHit {
    lat: f64,
    lon: f64,
    name: Option<String>,
    country: Option<String>,
}

impl Searcher {
    pub fn new(config: &Config, http: Client) -> Self {
        Self {
            api_key: config.provider_api_key(Vendor::OpenWeather).map(str::to_owned),
            openweather_url: config.endpoints.openweather.clone(),
            nominatim_url: config.endpoints.nominatim.clone(),
            accept_language: config.accept_language(),
            http,
        }
    }

    pub async fn search(&self, query: &str) -> Result<SearchHit, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        match self.nominatim(query).await {
            Ok(Some(hit)) => return Ok(hit),
            Ok(None) => tracing::debug!(query, "nominatim search returned nothing"),
            Err(e) => tracing::warn!(query, error = %e, "nominatim search failed"),
        }

        match self.openweather(query).await {
            Ok(Some(hit)) => Ok(hit),
            Ok(None) => Err(SearchError::NotFound(query.to_string())),
            Err(e) => {
                tracing::warn!(query, error = %e, "openweather direct geocoding failed");
                Err(SearchError::NotFound(query.to_string()))
            }
        }
    }

    async fn nominatim(&self, query: &str) -> Result<Option<SearchHit>, ProviderError> {
        let hits: Vec<NominatimHit> = get_json(
            self.http
                .get(format!("{}/search", self.nominatim_url))
                .header(ACCEPT_LANGUAGE, self.accept_language.as_str())
                .query(&[
                    ("format", "json"),
                    ("q", query),
                    ("limit", "1"),
                    ("addressdetails", "1"),
                    ("polygon_geojson", "0"),
                ]),
            "nominatim search",
        )
        .await?;

        Ok(hits.into_iter().next().and_then(classify))
    }

    async fn openweather(&self, query: &str) -> Result<Option<SearchHit>, ProviderError> {
        let key = crate::provider::require_key(self.api_key.as_deref())?;

        let hits: Vec<OwDirectHit> = get_json(
            self.http
                .get(format!("{}/geo/1.0/direct", self.openweather_url))
                .query(&[("q", query), ("limit", "1"), ("appid", key)]),
            "openweather direct geocode",
        )
        .await?;

        Ok(hits.into_iter().next().map(|hit| {
            let display_name = match (hit.name, hit.country) {
                (Some(name), Some(country)) => Some(format!("{name}, {country}")),
                (name, _) => name,
            };
            SearchHit {
                position: Coordinate::new(hit.lat, hit.lon),
                level: Level::Place,
                bounds: None,
                display_name,
            }
        }))
    }
}

/// Decide between city-level and country-level handling for a Nominatim hit.
fn classify(hit: NominatimHit) -> Option<SearchHit> {
    let lat: f64 = hit.lat.trim().parse().ok()?;
    let lon: f64 = hit.lon.trim().parse().ok()?;
    let position = Coordinate::new(lat, lon);

    let bounds = parse_bounding_box(&hit.boundingbox);
    let is_large_admin = hit
        .kind
        .as_deref()
        .is_some_and(|k| LARGE_ADMIN_TYPES.contains(&k));

    let (level, bounds) = match bounds {
        Some(b) if is_large_admin || b.lat_span() > LARGE_AREA_SPAN_DEG || b.lon_span() > LARGE_AREA_SPAN_DEG => {
            (Level::Country, Some(b))
        }
        _ => (Level::Place, None),
    };

    Some(SearchHit {
        position,
        level,
        bounds,
        display_name: hit.display_name,
    })
}

/// Nominatim orders the box as `[south, north, west, east]`, all strings.
fn parse_bounding_box(raw: &[String]) -> Option<Bounds> {
    if raw.len() != 4 {
        return None;
    }
    let mut vals = [0.0f64; 4];
    for (slot, s) in vals.iter_mut().zip(raw) {
        *slot = s.trim().parse().ok()?;
    }
    let [south, north, west, east] = vals;
    Some(Bounds { south, west, north, east })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(kind: &str, bbox: [&str; 4]) -> NominatimHit {
        NominatimHit {
            lat: "14.0".into(),
            lon: "100.6".into(),
            boundingbox: bbox.iter().map(|s| s.to_string()).collect(),
            kind: Some(kind.into()),
            display_name: None,
        }
    }

    #[test]
    fn small_city_is_place_level() {
        let h = classify(hit("city", ["13.9", "14.1", "100.5", "100.7"])).expect("hit");
        assert_eq!(h.level, Level::Place);
        assert!(h.bounds.is_none());
    }

    #[test]
    fn admin_type_is_country_level_even_when_small() {
        let h = classify(hit("state", ["13.9", "14.1", "100.5", "100.7"])).expect("hit");
        assert_eq!(h.level, Level::Country);
        let b = h.bounds.expect("bounds");
        assert_eq!((b.south, b.west, b.north, b.east), (13.9, 100.5, 14.1, 100.7));
    }

    #[test]
    fn large_span_is_country_level() {
        let h = classify(hit("administrative", ["5.6", "20.5", "97.3", "105.6"])).expect("hit");
        assert_eq!(h.level, Level::Country);
    }

    #[test]
    fn missing_bounding_box_is_place_level() {
        let mut raw = hit("country", ["0", "0", "0", "0"]);
        raw.boundingbox.clear();
        let h = classify(raw).expect("hit");
        assert_eq!(h.level, Level::Place);
    }

    #[test]
    fn unparsable_coordinates_are_dropped() {
        let mut raw = hit("city", ["1", "2", "3", "4"]);
        raw.lat = "north".into();
        assert!(classify(raw).is_none());
    }

    #[tokio::test]
    async fn empty_query_is_rejected() {
        let searcher = Searcher::new(&Config::default(), Client::new());
        let err = searcher.search("   ").await.unwrap_err();
        assert!(matches!(err, SearchError::EmptyQuery));
    }
}
