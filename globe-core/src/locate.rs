use async_trait::async_trait;
use std::fmt::Debug;

use crate::model::Coordinate;

/// Where the viewer starts when the host cannot tell us where the user is (Bangkok).
pub const FALLBACK_POSITION: Coordinate = Coordinate {
    latitude: 13.7563,
    longitude: 100.5018,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum LocationError {
    #[error("Location service unavailable")]
    ServiceUnavailable,
}

/// Host-provided position query.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinate, LocationError>;
}

/// Geolocator backed by a configured position; unavailable when none is set.
#[derive(Debug, Clone, Default)]
pub struct FixedLocator {
    position: Option<Coordinate>,
}

impl FixedLocator {
    pub fn new(position: Option<Coordinate>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Geolocator for FixedLocator {
    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        self.position.ok_or(LocationError::ServiceUnavailable)
    }
}

/// Position for the first load: the located one, or [`FALLBACK_POSITION`].
pub async fn initial_position(locator: &dyn Geolocator) -> Coordinate {
    match locator.current_position().await {
        Ok(position) => position,
        Err(e) => {
            tracing::warn!(error = %e, "geolocation failed, starting at fallback position");
            FALLBACK_POSITION
        }
    }
}
