//! View state owned by the application, and the camera policy the map renderer follows.

use serde::{Deserialize, Serialize};

use crate::{
    coord::{clamp_latitude, wrap_longitude},
    model::Coordinate,
    tiles::OverlayLayer,
};

pub const MIN_ZOOM: f64 = 3.0;
pub const MAX_ZOOM: f64 = 19.0;
/// Initial load and the locate button.
pub const DEFAULT_ZOOM: f64 = 15.0;
/// City-level search result.
pub const SEARCH_ZOOM: f64 = 14.0;
/// Country-level search result without usable bounds.
pub const COUNTRY_ZOOM: f64 = 6.0;
pub const FIT_PADDING_PX: u32 = 24;

/// Why the position last changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Search,
    Click,
    Locate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Place,
    Country,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Level::Place => "place",
            Level::Country => "country",
        })
    }
}

/// `[[south, west], [north, east]]` box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn lat_span(&self) -> f64 {
        (self.north - self.south).abs()
    }

    pub fn lon_span(&self) -> f64 {
        (self.east - self.west).abs()
    }

    /// Clamp latitudes and wrap longitudes into the canonical ranges.
    pub fn normalized(&self) -> Self {
        Self {
            south: clamp_latitude(self.south),
            west: wrap_longitude(self.west),
            north: clamp_latitude(self.north),
            east: wrap_longitude(self.east),
        }
    }

    pub fn crosses_dateline(&self) -> bool {
        self.east < self.west
    }
}

/// Transient description of the last position change, consumed by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewMeta {
    pub trigger: Option<Trigger>,
    pub level: Option<Level>,
    pub bounds: Option<Bounds>,
}

/// Overlay switches shared by the globe and the 2D map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerToggles {
    pub clouds: bool,
    pub precipitation: bool,
    pub pressure: bool,
    pub wind: bool,
    pub temperature: bool,
}

impl LayerToggles {
    fn slot(&mut self, layer: OverlayLayer) -> &mut bool {
        match layer {
            OverlayLayer::Clouds => &mut self.clouds,
            OverlayLayer::Precipitation => &mut self.precipitation,
            OverlayLayer::Pressure => &mut self.pressure,
            OverlayLayer::Wind => &mut self.wind,
            OverlayLayer::Temperature => &mut self.temperature,
        }
    }

    /// Flip one layer; returns its new state.
    pub fn toggle(&mut self, layer: OverlayLayer) -> bool {
        let slot = self.slot(layer);
        *slot = !*slot;
        *slot
    }

    pub fn is_active(&self, layer: OverlayLayer) -> bool {
        match layer {
            OverlayLayer::Clouds => self.clouds,
            OverlayLayer::Precipitation => self.precipitation,
            OverlayLayer::Pressure => self.pressure,
            OverlayLayer::Wind => self.wind,
            OverlayLayer::Temperature => self.temperature,
        }
    }

    pub fn active(&self) -> Vec<OverlayLayer> {
        OverlayLayer::all()
            .iter()
            .copied()
            .filter(|l| self.is_active(*l))
            .collect()
    }
}

/// Selected position, overlays and the pending view meta.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub position: Option<Coordinate>,
    pub layers: LayerToggles,
    pub flat_view: bool,
    pub meta: ViewMeta,
}

impl ViewState {
    /// Every position change goes through here: meta is replaced, never merged.
    fn set_position(&mut self, position: Coordinate, meta: ViewMeta) {
        self.position = Some(Coordinate::new(position.latitude, position.longitude));
        self.meta = meta;
    }

    pub fn select_initial(&mut self, position: Coordinate) {
        self.set_position(position, ViewMeta::default());
    }

    pub fn select_from_search(&mut self, position: Coordinate, level: Level, bounds: Option<Bounds>) {
        self.set_position(
            position,
            ViewMeta {
                trigger: Some(Trigger::Search),
                level: Some(level),
                bounds,
            },
        );
    }

    pub fn select_from_click(&mut self, position: Coordinate) {
        self.set_position(
            position,
            ViewMeta { trigger: Some(Trigger::Click), level: None, bounds: None },
        );
    }

    pub fn select_from_locate(&mut self, position: Coordinate) {
        self.set_position(
            position,
            ViewMeta { trigger: Some(Trigger::Locate), level: Some(Level::Place), bounds: None },
        );
    }

    /// Hand the pending meta to the renderer, leaving an empty one behind.
    pub fn take_meta(&mut self) -> ViewMeta {
        std::mem::take(&mut self.meta)
    }

    pub fn toggle_flat_view(&mut self) -> bool {
        self.flat_view = !self.flat_view;
        self.flat_view
    }

    /// Camera instruction for the current position and meta, if a position is set.
    pub fn camera(&self) -> Option<CameraMove> {
        self.position.map(|center| camera_move(center, &self.meta))
    }
}

/// What the 2D map should do after a position change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraMove {
    FlyTo { center: Coordinate, zoom: f64 },
    PanTo { center: Coordinate },
    FitBounds { bounds: Bounds, max_zoom: f64, padding_px: u32 },
}

fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Camera policy: bounds win, then the trigger decides.
pub fn camera_move(center: Coordinate, meta: &ViewMeta) -> CameraMove {
    let is_country = meta.level == Some(Level::Country);

    if let Some(raw) = meta.bounds {
        let b = raw.normalized();
        if b.crosses_dateline() {
            let lon_mid = wrap_longitude((b.west + b.east + 360.0) / 2.0);
            let lat_mid = (b.south + b.north) / 2.0;
            // Real east-west extent of a box that wraps past 180.
            let wrapped_span = 360.0 - b.lon_span();
            let zoom = if !is_country {
                COUNTRY_ZOOM
            } else if b.lat_span() > 40.0 || wrapped_span > 40.0 {
                3.5
            } else if b.lat_span() > 20.0 || wrapped_span > 20.0 {
                5.0
            } else {
                COUNTRY_ZOOM
            };
            return CameraMove::FlyTo {
                center: Coordinate { latitude: lat_mid, longitude: lon_mid },
                zoom: clamp_zoom(zoom),
            };
        }

        return CameraMove::FitBounds {
            bounds: b,
            max_zoom: if is_country { COUNTRY_ZOOM } else { 8.0 },
            padding_px: FIT_PADDING_PX,
        };
    }

    match meta.trigger {
        Some(Trigger::Search) => CameraMove::FlyTo {
            center,
            zoom: clamp_zoom(if is_country { COUNTRY_ZOOM } else { SEARCH_ZOOM }),
        },
        Some(Trigger::Click) => CameraMove::PanTo { center },
        Some(Trigger::Locate) | None => CameraMove::FlyTo {
            center,
            zoom: clamp_zoom(DEFAULT_ZOOM),
        },
    }
}
