//! Forecast acquisition with ordered fallback across providers.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use reqwest::Client;

use crate::{
    Config,
    error::ProviderError,
    geocode::{PlaceLookup, PlaceResolver},
    model::{Coordinate, ForecastRecord},
    provider::{ForecastTier, tiers_from_config},
};

/// Tries each [`ForecastTier`] in order and returns the first success, merged
/// with the place resolved concurrently for the same coordinate.
#[derive(Debug)]
pub struct ProviderChain {
    tiers: Vec<Box<dyn ForecastTier>>,
    places: Arc<dyn PlaceLookup>,
    loading: AtomicBool,
}

/// Clears the loading flag when the chain settles, however it settles.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn set(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ProviderChain {
    pub fn new(tiers: Vec<Box<dyn ForecastTier>>, places: Arc<dyn PlaceLookup>) -> Self {
        Self {
            tiers,
            places,
            loading: AtomicBool::new(false),
        }
    }

    /// The standard four-tier chain with the default place resolver.
    pub fn from_config(config: &Config, http: &Client) -> Self {
        let places = Arc::new(PlaceResolver::new(config, http.clone()));
        Self::new(tiers_from_config(config, http), places)
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Fetch a forecast for `coord`. `None` means every provider failed, which is
    /// a displayable "no data" state rather than an error.
    pub async fn fetch(&self, coord: Coordinate) -> Option<ForecastRecord> {
        match self.try_fetch(coord).await {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::error!(%coord, error = %e, "all forecast providers failed");
                None
            }
        }
    }

    /// Like [`fetch`](Self::fetch) but reports exhaustion as [`ProviderError::ResolutionExhausted`].
    pub async fn try_fetch(&self, coord: Coordinate) -> Result<ForecastRecord, ProviderError> {
        let _loading = LoadingGuard::set(&self.loading);
        let coord = Coordinate::new(coord.latitude, coord.longitude);

        let mut last_error = String::from("no providers configured");
        for tier in &self.tiers {
            // A failed weather call drops the in-flight lookup so the next tier starts at once.
            let place = async {
                Ok::<_, ProviderError>(self
                    .places
                    .lookup(coord)
                    .await
                    .map_err(|e| tracing::warn!(%coord, error = %e, "place lookup failed"))
                    .ok())
            };

            match tokio::try_join!(tier.fetch(coord), place) {
                Ok((forecast, place)) => {
                    tracing::info!(tier = %tier.id(), %coord, "forecast acquired");
                    return Ok(forecast.into_record(place));
                }
                Err(e) => {
                    tracing::warn!(tier = %tier.id(), %coord, error = %e, "forecast tier failed, trying next");
                    last_error = e.to_string();
                }
            }
        }

        Err(ProviderError::ResolutionExhausted {
            attempts: self.tiers.len(),
            last: last_error,
        })
    }
}
