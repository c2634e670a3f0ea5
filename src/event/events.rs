use crate::engine::InteractionId;
use crate::geometry::{Coordinate, Geometry, GeometryKind, VertexPath};
use crate::mode::DrawMode;
use crate::store::FeatureId;

/// Input delivered by the map engine
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A click anywhere on the map
    MapClick(Coordinate),
    /// A draw interaction finished a geometry
    DrawComplete {
        interaction: InteractionId,
        geometry: Geometry,
    },
    /// The modify interaction dragged a vertex of a stored feature
    VertexMoved {
        feature: FeatureId,
        vertex: VertexPath,
        to: Coordinate,
    },
}

/// A feature that finished drawing, with the coordinates reported for it
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnFeature {
    pub id: FeatureId,
    pub kind: GeometryKind,
    pub coordinates: Vec<Coordinate>,
}

/// Events published by the map view host
#[derive(Debug, Clone, PartialEq)]
pub enum MapViewEvent {
    ModeChanged {
        old: DrawMode,
        new: DrawMode,
    },
    FeatureDrawn(DrawnFeature),
    FeatureModified {
        id: FeatureId,
    },
    MarkerMoved {
        position: Coordinate,
    },
    Disposed,
}
