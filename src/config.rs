use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// An RGBA color, unmultiplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub fn to_color32(self) -> egui::Color32 {
        let [r, g, b, a] = self.0;
        egui::Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

/// Style of the vector layer holding drawn features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorStyle {
    pub fill: Rgba,
    pub stroke_color: Rgba,
    pub stroke_width: f32,
    pub point_radius: f32,
    pub point_fill: Rgba,
}

impl Default for VectorStyle {
    fn default() -> Self {
        Self {
            fill: Rgba::rgba(255, 255, 255, 51),
            stroke_color: Rgba::rgb(0xff, 0xcc, 0x33),
            stroke_width: 2.0,
            point_radius: 7.0,
            point_fill: Rgba::rgb(0xff, 0xcc, 0x33),
        }
    }
}

/// Anchor of an overlay element relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Positioning {
    TopLeft,
    #[default]
    CenterCenter,
    BottomCenter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub positioning: Positioning,
    /// Whether pointer events over the marker are kept from the map
    pub stop_event: bool,
    pub radius: f32,
    pub color: Rgba,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            positioning: Positioning::CenterCenter,
            stop_event: false,
            radius: 6.0,
            color: Rgba::rgb(0xe5, 0x39, 0x35),
        }
    }
}

/// Initial view of the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Longitude/latitude in degrees
    pub center_lon_lat: [f64; 2],
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center_lon_lat: [0.0, 0.0],
            zoom: 2.0,
            min_zoom: 0.0,
            max_zoom: 19.0,
        }
    }
}

/// Everything needed to build a map view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct MapConfig {
    /// Id of the element the map surface is mounted on
    pub mount_target: String,
    pub viewport_height: f32,
    pub view: ViewConfig,
    pub style: VectorStyle,
    pub marker: MarkerConfig,
    /// Repeat the vector layer across the antimeridian
    pub wrap_x: bool,
    /// Pixel distance within which the modify interaction grabs a vertex
    pub vertex_tolerance: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            mount_target: "map".to_string(),
            viewport_height: 400.0,
            view: ViewConfig::default(),
            style: VectorStyle::default(),
            marker: MarkerConfig::default(),
            wrap_x: false,
            vertex_tolerance: 7.0,
        }
    }
}

impl MapConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
