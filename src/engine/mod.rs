//! The contract between the map view host and a map engine.
//!
//! The engine owns rendering, pan/zoom and raw input. The host only attaches
//! and detaches layers, interactions and overlays through [`MapEngine`], and
//! receives [`EngineEvent`](crate::event::EngineEvent)s back.

mod egui_engine;
mod headless;
mod sketch;
mod tiles;
mod triangulate;
mod view;

pub use egui_engine::EguiMapEngine;
pub use headless::{EngineCall, HeadlessEngine};
pub use sketch::Sketch;
pub use tiles::{PlacedTile, TileId, TileSource};
pub use view::MapView;

use crate::config::{MarkerConfig, VectorStyle};
use crate::error::EngineError;
use crate::geometry::{Coordinate, GeometryKind};

macro_rules! handle_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);
    };
}

handle_type!(
    /// Handle of a layer attached to the map
    LayerId
);
handle_type!(
    /// Handle of an interaction attached to the map
    InteractionId
);
handle_type!(
    /// Handle of an overlay attached to the map
    OverlayId
);

/// Hands out unique handles for one engine instance
#[derive(Debug, Default)]
pub struct HandleAllocator {
    next: u64,
}

impl HandleAllocator {
    fn bump(&mut self) -> u64 {
        self.next += 1;
        self.next
    }

    pub fn layer(&mut self) -> LayerId {
        LayerId(self.bump())
    }

    pub fn interaction(&mut self) -> InteractionId {
        InteractionId(self.bump())
    }

    pub fn overlay(&mut self) -> OverlayId {
        OverlayId(self.bump())
    }
}

/// Where the map surface should be mounted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountTarget {
    pub id: String,
}

impl MountTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerSpec {
    /// Base raster layer
    Tiles { source: TileSource },
    /// Vector layer rendering the geometry store
    Vector { style: VectorStyle, wrap_x: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionSpec {
    /// Sketch one geometry of `kind` and emit a draw-complete event
    Draw { kind: GeometryKind },
    /// Drag vertices of stored features
    Modify,
}

impl InteractionSpec {
    pub fn is_draw(&self) -> bool {
        matches!(self, Self::Draw { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySpec {
    pub marker: MarkerConfig,
}

/// Calls the host makes into a map engine
pub trait MapEngine {
    /// Attach the map surface to its host element
    fn mount(&mut self, target: &MountTarget) -> Result<(), EngineError>;

    /// Detach the map surface; the engine stops delivering events
    fn unmount(&mut self);

    fn add_layer(&mut self, layer: LayerSpec) -> LayerId;

    fn remove_layer(&mut self, id: LayerId);

    fn add_interaction(&mut self, interaction: InteractionSpec) -> InteractionId;

    /// Detach an interaction. Takes effect before the next input event.
    fn remove_interaction(&mut self, id: InteractionId);

    fn add_overlay(&mut self, overlay: OverlaySpec) -> OverlayId;

    fn set_overlay_position(&mut self, id: OverlayId, position: Option<Coordinate>);

    /// Remove an overlay from the map
    fn remove_overlay(&mut self, id: OverlayId);
}
