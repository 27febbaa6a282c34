use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use globe_core::{
    Config, Coordinate, OverlayLayer, Selection, Services, Session, Vendor,
    locate::{FixedLocator, initial_position},
    tiles::{GLOBE_TEXTURE_ZOOM, texture_size_px},
    view::ViewState,
};
use inquire::{Password, Text};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "globe-weather", version, about = "Weather for any point on the globe")]
pub struct Cli {
    /// Log provider fallbacks and requests to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, e.g. "openweather".
        vendor: String,
    },

    /// Show the forecast for a searched place, a coordinate, or the home position.
    Forecast {
        /// Place or country name to search for.
        #[arg(conflicts_with_all = ["lat", "lon"])]
        query: Option<String>,

        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Resolve a place name to a position and zoom hint.
    Search {
        query: String,
    },

    /// Show air quality at a coordinate.
    Air {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Print the starting position (configured home, or the fallback).
    Locate,

    /// Print overlay tile URLs for a layer.
    Tiles {
        layer: String,

        /// Zoom of the stitched globe texture.
        #[arg(long, default_value_t = GLOBE_TEXTURE_ZOOM)]
        zoom: u8,
    },

    /// List overlay layers, optionally toggling some on.
    Layers {
        #[arg(long = "toggle")]
        toggle: Vec<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { vendor } => configure(&vendor),
            Command::Forecast { query, lat, lon, json } => forecast(query, lat.zip(lon), json).await,
            Command::Search { query } => search(&query).await,
            Command::Air { lat, lon } => air(Coordinate::new(lat, lon)).await,
            Command::Locate => locate().await,
            Command::Tiles { layer, zoom } => tiles(&layer, zoom),
            Command::Layers { toggle } => layers(&toggle),
        }
    }
}

fn configure(vendor: &str) -> anyhow::Result<()> {
    let vendor = Vendor::try_from(vendor)?;
    let mut config = Config::load_file()?;

    if vendor.requires_api_key() {
        let api_key = Password::new(&format!("API key for {vendor}:"))
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?;
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            bail!("API key must not be empty");
        }
        config.set_provider_api_key(vendor, api_key);
    } else {
        println!("{vendor} needs no API key.");
    }

    let locale = Text::new("Display language (en or th):")
        .with_default(&config.locale)
        .prompt()
        .context("Failed to read locale")?;
    config.locale = locale.trim().to_lowercase();

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn forecast(query: Option<String>, coord: Option<(f64, f64)>, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let services = Services::from_config(&config)?;
    let mut session = Session::new();

    let selection = match (query, coord) {
        (None, Some((lat, lon))) => Selection::Click(Coordinate::new(lat, lon)),
        (Some(_), Some(_)) => bail!("Give either a place name or --lat/--lon, not both"),
        (Some(query), None) => {
            let hit = services
                .searcher
                .search(&query)
                .await
                .with_context(|| format!("Could not find '{query}'"))?;
            Selection::Search(hit)
        }
        (None, None) => {
            let locator = FixedLocator::new(config.home_position());
            Selection::Initial(initial_position(&locator).await)
        }
    };

    let ticket = session.select(selection);
    let camera = session.view.camera();
    let loaded = services.load(ticket).await;
    session.apply(loaded);

    if json {
        let value = serde_json::json!({
            "position": ticket.position,
            "camera": camera,
            "forecast": output::forecast_json(&session),
            "air_quality": session.air_quality().record(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    output::print_forecast(&session, ticket.position);
    output::print_air_quality(session.air_quality());
    Ok(())
}

async fn search(query: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let services = Services::from_config(&config)?;
    let hit = services.searcher.search(query).await?;

    let mut view = ViewState::default();
    view.select_from_search(hit.position, hit.level, hit.bounds);

    println!("{}", hit.display_name.as_deref().unwrap_or(query));
    println!("  position: {}", hit.position);
    println!("  level:    {}", hit.level);
    if let Some(camera) = view.camera() {
        println!("  camera:   {}", output::describe_camera(&camera));
    }
    Ok(())
}

async fn air(coord: Coordinate) -> anyhow::Result<()> {
    let config = Config::load()?;
    let services = Services::from_config(&config)?;
    let status = globe_core::AirQualityStatus::from_result(services.air_quality.fetch(coord).await);
    output::print_air_quality(&status);
    Ok(())
}

async fn locate() -> anyhow::Result<()> {
    let config = Config::load()?;
    let locator = FixedLocator::new(config.home_position());
    let position = initial_position(&locator).await;

    let mut view = ViewState::default();
    view.select_from_locate(position);

    println!("{position}");
    if let Some(camera) = view.camera() {
        println!("  camera: {}", output::describe_camera(&camera));
    }
    Ok(())
}

fn tiles(layer: &str, zoom: u8) -> anyhow::Result<()> {
    let layer = OverlayLayer::try_from(layer)?;
    let config = Config::load()?;
    if !config.is_provider_configured(Vendor::OpenWeather) {
        tracing::warn!("no OpenWeather API key configured; tile requests will be rejected");
    }
    let services = Services::from_config(&config)?;

    println!("{} (opacity {})", layer.label(), layer.opacity());
    println!("template: {}", services.tiles.template(layer));
    let size = texture_size_px(zoom);
    println!("globe texture {size}x{size} px:");
    for tile in services.tiles.globe_texture_tiles(layer, zoom) {
        println!("  [{:>5},{:>5}] {}", tile.offset_x, tile.offset_y, tile.url);
    }
    Ok(())
}

fn layers(toggle: &[String]) -> anyhow::Result<()> {
    let mut view = ViewState::default();
    for name in toggle {
        view.layers.toggle(OverlayLayer::try_from(name.as_str())?);
    }

    for layer in OverlayLayer::all() {
        let mark = if view.layers.is_active(*layer) { "x" } else { " " };
        println!("[{mark}] {:<14} {}", layer.as_str(), layer.label());
    }
    Ok(())
}
