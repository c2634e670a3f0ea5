#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod geometry;
pub mod host;
pub mod marker;
pub mod mode;
pub mod panels;
pub mod projection;
pub mod store;

mod components;

pub use app::MapDrawApp;
pub use config::MapConfig;
pub use error::{GeometryError, MapError};
pub use event::{DrawnFeature, EngineEvent, EventBus, EventHandler, MapViewEvent};
pub use geometry::{Coordinate, Geometry, GeometryKind};
pub use host::MapViewHost;
pub use marker::MarkerController;
pub use mode::{DrawMode, DrawModeController};
pub use store::{Feature, FeatureId, GeometryStore};
