//! Core library for the globe weather viewer.
//!
//! This crate defines:
//! - Coordinate normalization and the shared forecast/air-quality models
//! - The forecast provider chain with its four fallback tiers
//! - Reverse and forward geocoding
//! - View state, overlay tiles and the camera policy renderers follow
//! - Configuration & credentials handling
//!
//! It is used by `globe-cli`, but renderers or services can drive it the same way.

pub mod air_quality;
pub mod chain;
pub mod config;
pub mod coord;
pub mod error;
pub mod geocode;
pub mod http;
pub mod locate;
pub mod model;
pub mod provider;
pub mod region;
pub mod search;
pub mod session;
pub mod tiles;
pub mod view;

pub use air_quality::{AirQualityFetcher, AirQualityStatus, AqiInfo};
pub use chain::ProviderChain;
pub use config::{Config, Endpoints, ProviderConfig};
pub use coord::normalize;
pub use error::{ProviderError, SearchError};
pub use geocode::{PlaceLookup, PlaceResolver};
pub use model::{
    AirQualityRecord, Condition, Coordinate, DailyOutlook, ForecastRecord, PlaceInfo,
    WeatherSnapshot,
};
pub use provider::{ForecastTier, TierId, Vendor};
pub use search::{SearchHit, Searcher};
pub use session::{ForecastStatus, Selection, Services, Session, Ticket};
pub use tiles::OverlayLayer;
pub use view::{CameraMove, Level, Trigger, ViewMeta, ViewState};
