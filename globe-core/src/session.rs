//! Application state and the services that feed it.
//!
//! Every position change bumps a generation counter and hands back a
//! [`Ticket`]. Results are applied only when their ticket is still the
//! latest, so a slow fetch for an old position can't overwrite a newer one.

use anyhow::{Context, Result};

use crate::{
    Config,
    air_quality::{AirQualityFetcher, AirQualityStatus},
    chain::ProviderChain,
    error::ProviderError,
    http::build_client,
    model::{AirQualityRecord, Coordinate, ForecastRecord},
    search::{SearchHit, Searcher},
    tiles::TileUrls,
    view::ViewState,
};

/// A user-initiated (or initial) position change.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Initial(Coordinate),
    Search(SearchHit),
    Click(Coordinate),
    Locate(Coordinate),
}

/// Proof of which position change a fetch belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticket {
    generation: u64,
    pub position: Coordinate,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForecastStatus<'a> {
    Loading,
    Ready(&'a ForecastRecord),
    /// Every provider failed for this position.
    NoData,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub view: ViewState,
    forecast: Option<ForecastRecord>,
    forecast_loading: bool,
    air_quality: AirQualityStatus,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a position change and start a new generation.
    pub fn select(&mut self, selection: Selection) -> Ticket {
        match selection {
            Selection::Initial(pos) => self.view.select_initial(pos),
            Selection::Search(hit) => self.view.select_from_search(hit.position, hit.level, hit.bounds),
            Selection::Click(pos) => self.view.select_from_click(pos),
            Selection::Locate(pos) => self.view.select_from_locate(pos),
        }

        self.generation += 1;
        self.forecast_loading = true;
        self.air_quality = AirQualityStatus::Loading;

        let position = self.view.position.unwrap_or(crate::locate::FALLBACK_POSITION);
        Ticket { generation: self.generation, position }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply a finished forecast fetch. Returns `false` when the ticket is stale.
    pub fn apply_forecast(&mut self, ticket: &Ticket, forecast: Option<ForecastRecord>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                stale = ticket.generation,
                latest = self.generation,
                "dropping forecast for superseded position"
            );
            return false;
        }
        self.forecast = forecast;
        self.forecast_loading = false;
        true
    }

    /// Apply a finished air quality fetch. Returns `false` when the ticket is stale.
    pub fn apply_air_quality(
        &mut self,
        ticket: &Ticket,
        result: Result<AirQualityRecord, ProviderError>,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                stale = ticket.generation,
                latest = self.generation,
                "dropping air quality for superseded position"
            );
            return false;
        }
        self.air_quality = AirQualityStatus::from_result(result);
        true
    }

    pub fn apply(&mut self, loaded: Loaded) -> bool {
        let forecast = self.apply_forecast(&loaded.ticket, loaded.forecast);
        let air = self.apply_air_quality(&loaded.ticket, loaded.air_quality);
        forecast && air
    }

    pub fn forecast_status(&self) -> ForecastStatus<'_> {
        if self.forecast_loading {
            return ForecastStatus::Loading;
        }
        match &self.forecast {
            Some(record) => ForecastStatus::Ready(record),
            None => ForecastStatus::NoData,
        }
    }

    pub fn air_quality(&self) -> &AirQualityStatus {
        &self.air_quality
    }
}

/// Results of one load, still tagged with the ticket they were fetched for.
#[derive(Debug)]
pub struct Loaded {
    pub ticket: Ticket,
    pub forecast: Option<ForecastRecord>,
    pub air_quality: Result<AirQualityRecord, ProviderError>,
}

/// Everything that talks to the network, built once from config around one HTTP client.
#[derive(Debug)]
pub struct Services {
    pub chain: ProviderChain,
    pub air_quality: AirQualityFetcher,
    pub searcher: Searcher,
    pub tiles: TileUrls,
}

impl Services {
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = build_client(config).context("Failed to build HTTP client")?;
        let api_key = config
            .provider_api_key(crate::provider::Vendor::OpenWeather)
            .map(str::to_owned);

        Ok(Self {
            chain: ProviderChain::from_config(config, &http),
            air_quality: AirQualityFetcher::new(config, http.clone()),
            searcher: Searcher::new(config, http),
            tiles: TileUrls::new(config.endpoints.tiles.clone(), api_key),
        })
    }

    /// Fetch forecast and air quality for a ticket. The two run concurrently
    /// and neither waits on the other's failure.
    pub async fn load(&self, ticket: Ticket) -> Loaded {
        let (forecast, air_quality) = tokio::join!(
            self.chain.fetch(ticket.position),
            self.air_quality.fetch(ticket.position),
        );
        Loaded { ticket, forecast, air_quality }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{AirComponents, DailyOutlook, WeatherSnapshot},
        view::{Level, Trigger},
    };

    fn record(temp: f64) -> ForecastRecord {
        ForecastRecord {
            current: WeatherSnapshot { temperature: temp, feels_like: temp, condition: None },
            daily: vec![DailyOutlook { timestamp: 0, temp_max: temp, temp_min: temp, condition: None }],
            timezone_label: "UTC".into(),
            place: None,
        }
    }

    fn aqi(level: u8) -> AirQualityRecord {
        AirQualityRecord { aqi: level, components: AirComponents::default() }
    }

    #[test]
    fn newer_selection_wins_over_late_result() {
        let mut session = Session::new();
        let first = session.select(Selection::Click(Coordinate::new(10.0, 10.0)));
        let second = session.select(Selection::Click(Coordinate::new(20.0, 20.0)));

        assert!(session.apply_forecast(&second, Some(record(2.0))));
        assert!(!session.apply_forecast(&first, Some(record(1.0))));

        match session.forecast_status() {
            ForecastStatus::Ready(rec) => assert_eq!(rec.current.temperature, 2.0),
            other => panic!("unexpected status {other:?}"),
        }
    }

    #[test]
    fn selection_marks_loading_until_applied() {
        let mut session = Session::new();
        let ticket = session.select(Selection::Initial(Coordinate::new(13.75, 100.5)));

        assert_eq!(session.forecast_status(), ForecastStatus::Loading);
        assert_eq!(session.air_quality(), &AirQualityStatus::Loading);

        session.apply_forecast(&ticket, None);
        assert_eq!(session.forecast_status(), ForecastStatus::NoData);
    }

    #[test]
    fn air_quality_failure_is_unavailable_not_loading() {
        let mut session = Session::new();
        let ticket = session.select(Selection::Click(Coordinate::new(0.0, 0.0)));

        session.apply_air_quality(&ticket, Err(ProviderError::empty("air pollution")));
        assert!(matches!(session.air_quality(), AirQualityStatus::Unavailable(_)));

        let ticket = session.select(Selection::Click(Coordinate::new(1.0, 1.0)));
        session.apply_air_quality(&ticket, Ok(aqi(2)));
        assert_eq!(session.air_quality().record().map(|r| r.aqi), Some(2));
    }

    #[test]
    fn search_selection_sets_meta() {
        let mut session = Session::new();
        let hit = SearchHit {
            position: Coordinate::new(15.0, 101.0),
            level: Level::Country,
            bounds: None,
            display_name: Some("Thailand".into()),
        };
        let ticket = session.select(Selection::Search(hit));

        assert_eq!(ticket.position, Coordinate::new(15.0, 101.0));
        assert_eq!(session.view.meta.trigger, Some(Trigger::Search));
        assert_eq!(session.view.meta.level, Some(Level::Country));
    }

    #[test]
    fn apply_reports_staleness() {
        let mut session = Session::new();
        let old = session.select(Selection::Click(Coordinate::new(0.0, 0.0)));
        let _new = session.select(Selection::Locate(Coordinate::new(1.0, 1.0)));

        let applied = session.apply(Loaded {
            ticket: old,
            forecast: Some(record(1.0)),
            air_quality: Ok(aqi(1)),
        });
        assert!(!applied);
        assert_eq!(session.forecast_status(), ForecastStatus::Loading);
    }

    #[test]
    fn ticket_positions_are_normalized() {
        let mut session = Session::new();
        let ticket = session.select(Selection::Click(Coordinate { latitude: -120.0, longitude: 540.0 }));
        assert_eq!(ticket.position, Coordinate { latitude: -90.0, longitude: -180.0 });
        assert_eq!(ticket.generation(), 1);
    }
}
