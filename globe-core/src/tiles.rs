//! Weather overlay tiles served by OpenWeather's map API.

use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

pub const TILE_SIZE_PX: u32 = 256;
/// Highest zoom the overlay server renders natively; the map upsamples beyond it.
pub const MAX_NATIVE_ZOOM: u8 = 10;
/// Zoom used when the globe stitches a whole-world overlay texture.
pub const GLOBE_TEXTURE_ZOOM: u8 = 2;

/// Dark base map under the overlays on the 2D view.
pub const BASEMAP_URL_TEMPLATE: &str = "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayLayer {
    Clouds,
    Precipitation,
    Pressure,
    Wind,
    Temperature,
}

impl OverlayLayer {
    pub const fn all() -> &'static [OverlayLayer] {
        &[
            OverlayLayer::Clouds,
            OverlayLayer::Precipitation,
            OverlayLayer::Pressure,
            OverlayLayer::Wind,
            OverlayLayer::Temperature,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OverlayLayer::Clouds => "clouds",
            OverlayLayer::Precipitation => "precipitation",
            OverlayLayer::Pressure => "pressure",
            OverlayLayer::Wind => "wind",
            OverlayLayer::Temperature => "temperature",
        }
    }

    /// Layer name in the tile server's URL scheme.
    pub fn tile_layer(&self) -> &'static str {
        match self {
            OverlayLayer::Clouds => "clouds_new",
            OverlayLayer::Precipitation => "precipitation_new",
            OverlayLayer::Pressure => "pressure_new",
            OverlayLayer::Wind => "wind_new",
            OverlayLayer::Temperature => "temp_new",
        }
    }

    pub fn opacity(&self) -> f32 {
        match self {
            OverlayLayer::Clouds | OverlayLayer::Wind => 0.6,
            OverlayLayer::Precipitation => 0.65,
            OverlayLayer::Pressure | OverlayLayer::Temperature => 0.5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OverlayLayer::Clouds => "Clouds",
            OverlayLayer::Precipitation => "Precipitation",
            OverlayLayer::Pressure => "Sea level pressure",
            OverlayLayer::Wind => "Wind speed",
            OverlayLayer::Temperature => "Temperature",
        }
    }
}

impl std::fmt::Display for OverlayLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for OverlayLayer {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();
        OverlayLayer::all()
            .iter()
            .copied()
            .find(|l| l.as_str() == lower || l.tile_layer() == lower)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown layer '{value}'. Supported layers: clouds, precipitation, pressure, wind, temperature."
                )
            })
    }
}

/// Builds overlay tile URLs for one tile server and key.
#[derive(Debug, Clone)]
pub struct TileUrls {
    base_url: String,
    api_key: Option<String>,
}

/// One tile of a stitched globe texture, with where it lands in the texture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextureTile {
    pub x: u32,
    pub y: u32,
    pub offset_x: u32,
    pub offset_y: u32,
    pub url: String,
}

impl TileUrls {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self { base_url, api_key }
    }

    /// Leaflet-style template with `{z}/{x}/{y}` placeholders.
    pub fn template(&self, layer: OverlayLayer) -> String {
        format!(
            "{}/map/{}/{{z}}/{{x}}/{{y}}.png?appid={}",
            self.base_url,
            layer.tile_layer(),
            self.api_key.as_deref().unwrap_or_default()
        )
    }

    pub fn tile_url(&self, layer: OverlayLayer, z: u8, x: u32, y: u32) -> String {
        format!(
            "{}/map/{}/{z}/{x}/{y}.png?appid={}",
            self.base_url,
            layer.tile_layer(),
            self.api_key.as_deref().unwrap_or_default()
        )
    }

    /// Every tile at zoom `z`, laid out row by row in a `2^z * 256` px square.
    pub fn globe_texture_tiles(&self, layer: OverlayLayer, z: u8) -> Vec<TextureTile> {
        let z = z.min(MAX_NATIVE_ZOOM);
        let tiles = 1u32 << z;
        (0..tiles)
            .flat_map(|y| (0..tiles).map(move |x| (x, y)))
            .map(|(x, y)| TextureTile {
                x,
                y,
                offset_x: x * TILE_SIZE_PX,
                offset_y: y * TILE_SIZE_PX,
                url: self.tile_url(layer, z, x, y),
            })
            .collect()
    }
}

/// Side length in pixels of the stitched texture at zoom `z`.
pub fn texture_size_px(z: u8) -> u32 {
    (1u32 << z.min(MAX_NATIVE_ZOOM)) * TILE_SIZE_PX
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> TileUrls {
        TileUrls::new("https://tile.openweathermap.org".into(), Some("KEY".into()))
    }

    #[test]
    fn layer_names_match_tile_server() {
        assert_eq!(OverlayLayer::Temperature.tile_layer(), "temp_new");
        assert_eq!(OverlayLayer::Clouds.tile_layer(), "clouds_new");
        assert_eq!(OverlayLayer::Precipitation.opacity(), 0.65);
    }

    #[test]
    fn layer_parses_from_either_name() {
        assert_eq!(OverlayLayer::try_from("Wind").expect("layer"), OverlayLayer::Wind);
        assert_eq!(OverlayLayer::try_from("temp_new").expect("layer"), OverlayLayer::Temperature);
        assert!(OverlayLayer::try_from("smog").is_err());
    }

    #[test]
    fn tile_url_is_templated() {
        assert_eq!(
            urls().tile_url(OverlayLayer::Pressure, 3, 4, 5),
            "https://tile.openweathermap.org/map/pressure_new/3/4/5.png?appid=KEY"
        );
        assert_eq!(
            urls().template(OverlayLayer::Wind),
            "https://tile.openweathermap.org/map/wind_new/{z}/{x}/{y}.png?appid=KEY"
        );
    }

    #[test]
    fn globe_texture_covers_the_grid() {
        let tiles = urls().globe_texture_tiles(OverlayLayer::Clouds, GLOBE_TEXTURE_ZOOM);
        assert_eq!(tiles.len(), 16);
        assert_eq!(texture_size_px(GLOBE_TEXTURE_ZOOM), 1024);

        let last = tiles.last().expect("tiles");
        assert_eq!((last.x, last.y, last.offset_x, last.offset_y), (3, 3, 768, 768));
        assert!(last.url.ends_with("/map/clouds_new/2/3/3.png?appid=KEY"));
    }
}
