//! Reverse geocoding: coordinates to a city/country label.
//!
//! OpenWeather's structured reverse geocoder is asked first; when it has
//! nothing (or fails) Nominatim is tried at decreasing zoom levels. The
//! whole thing is best-effort and resolves to an empty [`PlaceInfo`] rather
//! than an error.

use async_trait::async_trait;
use reqwest::{Client, header::ACCEPT_LANGUAGE};
use serde::Deserialize;
use std::fmt::Debug;

use crate::{
    Config,
    error::ProviderError,
    http::{get_json, lat_lon},
    model::{Coordinate, PlaceInfo},
    provider::{Vendor, require_key},
    region::region_name,
};

/// Nominatim zoom levels, finest first: building, street, town, city.
pub const NOMINATIM_ZOOMS: [u8; 4] = [16, 14, 12, 10];

/// Seam between the forecast chain and whatever resolves place names.
#[async_trait]
pub trait PlaceLookup: Send + Sync + Debug {
    async fn lookup(&self, coord: Coordinate) -> Result<PlaceInfo, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct PlaceResolver {
    api_key: Option<String>,
    openweather_url: String,
    nominatim_url: String,
    locale: String,
    accept_language: String,
    http: Client,
}

impl PlaceResolver {
    pub fn new(config: &Config, http: Client) -> Self {
        Self {
            api_key: config.provider_api_key(Vendor::OpenWeather).map(str::to_owned),
            openweather_url: config.endpoints.openweather.clone(),
            nominatim_url: config.endpoints.nominatim.clone(),
            locale: config.locale.clone(),
            accept_language: config.accept_language(),
            http,
        }
    }

    /// Resolve a place for `coord`. Never fails; unknown places come back with every field `None`.
    pub async fn resolve(&self, coord: Coordinate) -> PlaceInfo {
        match self.try_resolve(coord).await {
            Ok(place) => place,
            Err(e) => {
                tracing::debug!(%coord, error = %e, "reverse geocoding found nothing");
                PlaceInfo::default()
            }
        }
    }

    async fn try_resolve(&self, coord: Coordinate) -> Result<PlaceInfo, ProviderError> {
        match self.structured(coord).await {
            Ok(Some(place)) => return Ok(place),
            Ok(None) => tracing::debug!(%coord, "structured reverse geocoder returned no place"),
            Err(e) => tracing::warn!(%coord, error = %e, "structured reverse geocoder failed"),
        }

        let mut last = String::from("no address at any zoom level");
        for zoom in NOMINATIM_ZOOMS {
            match self.free_text(coord, zoom).await {
                Ok(Some(place)) => return Ok(place),
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(%coord, zoom, error = %e, "nominatim reverse failed");
                    last = e.to_string();
                }
            }
        }

        Err(ProviderError::ResolutionExhausted {
            attempts: 1 + NOMINATIM_ZOOMS.len(),
            last,
        })
    }

    async fn structured(&self, coord: Coordinate) -> Result<Option<PlaceInfo>, ProviderError> {
        let key = require_key(self.api_key.as_deref())?;

        let items: Vec<OwGeoItem> = get_json(
            self.http
                .get(format!("{}/geo/1.0/reverse", self.openweather_url))
                .query(&lat_lon(coord.latitude, coord.longitude))
                .query(&[("limit", "1"), ("appid", key)]),
            "openweather reverse geocode",
        )
        .await?;

        let Some(item) = items.into_iter().next() else {
            return Ok(None);
        };

        let city_name = non_empty(item.name);
        let country_code = non_empty(item.country);
        let country_name = country_code.as_deref().map(|code| {
            region_name(code, &self.locale)
                .map(str::to_owned)
                .unwrap_or_else(|| code.to_string())
        });

        if city_name.is_none() && country_name.is_none() {
            return Ok(None);
        }
        Ok(Some(PlaceInfo { city_name, country_code, country_name }))
    }

    async fn free_text(&self, coord: Coordinate, zoom: u8) -> Result<Option<PlaceInfo>, ProviderError> {
        let response: NominatimReverse = get_json(
            self.http
                .get(format!("{}/reverse", self.nominatim_url))
                .header(ACCEPT_LANGUAGE, self.accept_language.as_str())
                .query(&lat_lon(coord.latitude, coord.longitude))
                .query(&[
                    ("format", "jsonv2".to_string()),
                    ("zoom", zoom.to_string()),
                    ("addressdetails", "1".to_string()),
                ]),
            "nominatim reverse",
        )
        .await?;

        Ok(response.address.and_then(NominatimAddress::into_place))
    }
}

#[async_trait]
impl PlaceLookup for PlaceResolver {
    async fn lookup(&self, coord: Coordinate) -> Result<PlaceInfo, ProviderError> {
        Ok(self.resolve(coord).await)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
struct OwGeoItem {
    name: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimReverse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    hamlet: Option<String>,
    suburb: Option<String>,
    county: Option<String>,
    state: Option<String>,
    country: Option<String>,
    country_code: Option<String>,
}

impl NominatimAddress {
    fn into_place(self) -> Option<PlaceInfo> {
        // city > town > village > hamlet > suburb > county > state
        let city_name = non_empty(self.city)
            .or_else(|| non_empty(self.town))
            .or_else(|| non_empty(self.village))
            .or_else(|| non_empty(self.hamlet))
            .or_else(|| non_empty(self.suburb))
            .or_else(|| non_empty(self.county))
            .or_else(|| non_empty(self.state));
        let country_name = non_empty(self.country);

        if city_name.is_none() && country_name.is_none() {
            return None;
        }

        Some(PlaceInfo {
            city_name,
            country_code: non_empty(self.country_code).map(|c| c.to_uppercase()),
            country_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_priority_prefers_city() {
        let addr = NominatimAddress {
            town: Some("Rangsit".into()),
            state: Some("Pathum Thani".into()),
            country: Some("Thailand".into()),
            country_code: Some("th".into()),
            ..Default::default()
        };
        let place = addr.into_place().expect("place");
        assert_eq!(place.city_name.as_deref(), Some("Rangsit"));
        assert_eq!(place.country_code.as_deref(), Some("TH"));
        assert_eq!(place.country_name.as_deref(), Some("Thailand"));
    }

    #[test]
    fn falls_through_to_state() {
        let addr = NominatimAddress {
            suburb: Some("  ".into()),
            state: Some("Bavaria".into()),
            ..Default::default()
        };
        let place = addr.into_place().expect("place");
        assert_eq!(place.city_name.as_deref(), Some("Bavaria"));
        assert!(place.country_name.is_none());
    }

    #[test]
    fn empty_address_yields_nothing() {
        assert!(NominatimAddress::default().into_place().is_none());
    }

    #[tokio::test]
    async fn unreachable_everything_resolves_to_empty_place() {
        let mut cfg = Config::default();
        cfg.endpoints = crate::config::Endpoints::all_at("http://127.0.0.1:9");
        let resolver = PlaceResolver::new(&cfg, Client::new());

        let place = resolver.resolve(Coordinate::new(0.0, 0.0)).await;
        assert!(place.is_empty());
    }
}
